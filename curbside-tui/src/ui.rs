use chrono::{Datelike, Local, NaiveDate};
use curbside_core::model::{Address, CalendarEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, FormField, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let header = Paragraph::new("curbside – next trash & recycling pickup")
        .block(Block::default().borders(Borders::ALL).title("Curbside"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::JurisdictionSelect => draw_jurisdiction_select(frame, app, *content_area),
        Screen::AddressForm => draw_address_form(frame, app, *content_area),
        Screen::EventView => draw_event_view(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::JurisdictionSelect => "↑/↓ move · Enter/Space select · q/Ctrl-C quit",
        Screen::AddressForm => {
            "Type to edit · Tab/↑/↓ switch field · Enter look up · Esc back · Ctrl-C quit"
        }
        Screen::EventView => "Esc/←/b back to address · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Looking up… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_jurisdiction_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = app
        .jurisdictions
        .iter()
        .enumerate()
        .map(|(idx, (_id, name))| {
            let prefix = if idx == app.jurisdiction_list_index {
                "> "
            } else {
                "  "
            };
            ListItem::new(format!("{prefix}{name}"))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select jurisdiction (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.jurisdictions.is_empty() {
        state.select(Some(app.jurisdiction_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_address_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // house number
            Constraint::Length(3), // direction
            Constraint::Length(3), // street name
            Constraint::Length(3), // street type
            Constraint::Length(3), // unit
            Constraint::Min(0),    // jurisdiction note
        ])
        .split(area);

    for (field, field_area) in FormField::ALL.iter().zip(layout_chunks.iter()) {
        let is_active = *field == app.active_field;
        let border_style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(app.field_value(*field))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(field.label()),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(input, *field_area);
    }

    if let (Some((id, name)), Some(note_area)) = (
        app.selected_jurisdiction.as_ref(),
        layout_chunks.get(FormField::ALL.len()),
    ) {
        let note = Paragraph::new(format!("Looking up in {name} ({id})"))
            .wrap(Wrap { trim: true });
        frame.render_widget(note, *note_area);
    }
}

fn draw_event_view(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = "Next pickup (Esc/←/b to go back)";

    if app.is_loading {
        let paragraph = Paragraph::new("Looking up schedule…")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let Some((address, event)) = &app.looked_up else {
        let paragraph = Paragraph::new("No pickup computed yet.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let today = Local::now().date_naive();
    let lines = event_lines(address, *event, today);

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn event_lines(address: &Address, event: CalendarEvent, today: NaiveDate) -> Vec<Line<'static>> {
    let pickup_style = if event.recycle {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };
    let pickup_label = if event.recycle {
        "Trash + recycling"
    } else {
        "Trash only"
    };

    vec![
        Line::from(address.street_line()),
        Line::from(format!(
            "{}, {}",
            address.city.to_uppercase(),
            address.state.to_uppercase()
        )),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "{}, {} {}",
                event.date.format("%A"),
                event.date.format("%B"),
                event.date.day()
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(relative_day_label(event.date, today)),
        Line::default(),
        Line::from(Span::styled(pickup_label, pickup_style)),
        Line::default(),
        Line::from(Span::styled(
            "Holiday weeks can shift a pickup by a day.",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ]
}

fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    let delta = (date - today).num_days();
    match delta {
        0 => "today".to_owned(),
        1 => "tomorrow".to_owned(),
        days if days > 1 => format!("in {days} days"),
        -1 => "yesterday".to_owned(),
        days => format!("{} days ago", days.abs()),
    }
}

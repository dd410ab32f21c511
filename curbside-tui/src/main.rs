//! Terminal UI for curbside that looks up the next trash and recycling pickup
//! for a street address.

mod app;
mod input;
mod ui;

use std::{io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use curbside_core::{plugin::JurisdictionRegistry, service::WasteEventService};
use curbside_provider_madison as madison;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Screen};
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    // Service setup; each provider owns its HTTP client configuration.
    let plugins = vec![madison::plugin()?];
    let registry = Arc::new(JurisdictionRegistry::new(plugins));
    let service = Arc::new(WasteEventService::new(registry));

    // App state
    let app = App::new(service);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::LookupNextPickup => {
                    let address = match app.build_address() {
                        Ok(address) => address,
                        Err(problem) => {
                            app.error_message = Some(problem);
                            continue;
                        }
                    };

                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    // Reference date defaults to today inside the service.
                    let res = app.service.next_waste_event(&address, None).await;

                    app.is_loading = false;
                    match res {
                        Ok(event) => {
                            app.looked_up = Some((address, event));
                            app.screen = Screen::EventView;
                        }
                        Err(err) => {
                            app.error_message = Some(format!("Lookup failed: {err}"));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

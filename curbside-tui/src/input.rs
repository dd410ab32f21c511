use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.next_waste_event`(...) for the address in the form
    LookupNextPickup,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Backspace, Char, Down, Enter, Esc, Left, Tab, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::JurisdictionSelect => match key.code {
            Up | Char('k') => {
                if app.jurisdiction_list_index > 0 {
                    app.jurisdiction_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.jurisdiction_list_index + 1 < app.jurisdictions.len() {
                    app.jurisdiction_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                app.select_current_jurisdiction();
            }
            Char('q') => {
                return Action::Quit;
            }
            _ => {}
        },

        Screen::AddressForm => match key.code {
            Tab | Down => {
                app.active_field = app.active_field.next();
            }
            BackTab | Up => {
                app.active_field = app.active_field.previous();
            }
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.field_value_mut(app.active_field).push(character);
                }
            }
            Backspace => {
                app.field_value_mut(app.active_field).pop();
            }
            Enter => {
                action = Action::LookupNextPickup;
            }
            Esc => {
                app.screen = Screen::JurisdictionSelect;
                app.error_message = None;
            }
            _ => {}
        },

        Screen::EventView => match key.code {
            Left | Esc | Char('b') => {
                app.screen = Screen::AddressForm;
            }
            Char('q') => {
                return Action::Quit;
            }
            _ => {}
        },
    }
    action
}

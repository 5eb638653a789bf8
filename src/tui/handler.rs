// File: src/tui/handler.rs
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // Popup swallows everything except close/quit
    if state.show_popup {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => state.show_popup = false,
            KeyCode::Char('q') => return Some(Action::Quit),
            _ => {}
        }
        return None;
    }

    let drawer_open = state.viewer.drawer().is_open();

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('r') => {
            state.message = "Refreshing...".to_string();
            return Some(Action::Refresh);
        }
        KeyCode::Char('t') => {
            state.viewer.toggle_theme();
            state.message = format!("{} theme", state.viewer.theme().label());
        }
        KeyCode::Tab | KeyCode::Char('m') => state.viewer.toggle_drawer(),
        KeyCode::Char('?') => state.show_full_help = !state.show_full_help,

        // List navigation when the drawer is open, map panning otherwise
        KeyCode::Down | KeyCode::Char('j') if drawer_open => state.next(),
        KeyCode::Up | KeyCode::Char('k') if drawer_open => state.previous(),
        KeyCode::Enter if drawer_open => state.open_popup(),

        KeyCode::Left | KeyCode::Char('h') => state.viewport.pan(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => state.viewport.pan(1, 0),
        KeyCode::Up | KeyCode::Char('k') => state.viewport.pan(0, 1),
        KeyCode::Down | KeyCode::Char('j') => state.viewport.pan(0, -1),
        KeyCode::Char('+') | KeyCode::Char('=') => state.viewport.zoom_in(),
        KeyCode::Char('-') => state.viewport.zoom_out(),
        KeyCode::Char('0') => state.viewport.reset(),
        _ => {}
    }
    None
}

mod browse;
mod command;
mod edit;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Focus};

/// Handle a key event in the current focus
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status = None;

    // Help overlay intercepts everything
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match app.focus {
        Focus::Browse => browse::handle_browse(app, key),
        Focus::Command => command::handle_command(app, key),
        Focus::Edit => edit::handle_edit(app, key),
    }
}

/// Tab cycles Browse → Command → Edit (when a note is open) → Browse
pub(super) fn cycle_focus(app: &mut App) {
    app.focus = match app.focus {
        Focus::Browse => Focus::Command,
        Focus::Command => {
            if app.open.is_some() {
                Focus::Edit
            } else {
                Focus::Browse
            }
        }
        Focus::Edit => Focus::Browse,
    };
}

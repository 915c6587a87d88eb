use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};

use super::cycle_focus;

pub(super) fn handle_command(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            app.focus = Focus::Browse;
            app.history_pos = None;
        }
        KeyCode::Tab => cycle_focus(app),
        KeyCode::Enter => {
            let line = std::mem::take(&mut app.command_input);
            app.command_cursor = 0;
            app.execute_command(&line);
        }

        // History
        KeyCode::Up => history_prev(app),
        KeyCode::Down => history_next(app),

        // Line editing
        KeyCode::Char('u') if ctrl => {
            app.command_input.clear();
            app.command_cursor = 0;
        }
        KeyCode::Backspace => {
            if app.command_cursor > 0 {
                app.command_cursor -= 1;
                remove_char_at(&mut app.command_input, app.command_cursor);
            }
        }
        KeyCode::Left => app.command_cursor = app.command_cursor.saturating_sub(1),
        KeyCode::Right => {
            if app.command_cursor < app.command_input.chars().count() {
                app.command_cursor += 1;
            }
        }
        KeyCode::Home => app.command_cursor = 0,
        KeyCode::End => app.command_cursor = app.command_input.chars().count(),
        KeyCode::Char(c) if !ctrl => {
            insert_char_at(&mut app.command_input, app.command_cursor, c);
            app.command_cursor += 1;
            app.history_pos = None;
        }
        _ => {}
    }
}

fn history_prev(app: &mut App) {
    if app.history.is_empty() {
        return;
    }
    let pos = match app.history_pos {
        None => app.history.len() - 1,
        Some(0) => 0,
        Some(p) => p - 1,
    };
    app.history_pos = Some(pos);
    app.command_input = app.history[pos].clone();
    app.command_cursor = app.command_input.chars().count();
}

fn history_next(app: &mut App) {
    let Some(pos) = app.history_pos else {
        return;
    };
    if pos + 1 < app.history.len() {
        app.history_pos = Some(pos + 1);
        app.command_input = app.history[pos + 1].clone();
    } else {
        app.history_pos = None;
        app.command_input.clear();
    }
    app.command_cursor = app.command_input.chars().count();
}

fn insert_char_at(s: &mut String, char_idx: usize, c: char) {
    let byte = s
        .char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(s.len());
    s.insert(byte, c);
}

fn remove_char_at(s: &mut String, char_idx: usize) {
    if let Some((byte, _)) = s.char_indices().nth(char_idx) {
        s.remove(byte);
    }
}

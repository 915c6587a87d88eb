use crossterm::event::{KeyCode, KeyEvent};

use crate::model::EntryKind;
use crate::tui::app::{App, Focus};

use super::cycle_focus;

pub(super) fn handle_browse(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Tab => cycle_focus(app),
        KeyCode::Char(':') => app.focus = Focus::Command,

        KeyCode::Char('j') | KeyCode::Down => {
            if app.browse_cursor + 1 < app.entries.len() {
                app.browse_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.browse_cursor = app.browse_cursor.saturating_sub(1);
        }
        KeyCode::Char('g') => app.browse_cursor = 0,
        KeyCode::Char('G') => {
            app.browse_cursor = app.entries.len().saturating_sub(1);
        }

        // Enter a folder or open a note
        KeyCode::Enter | KeyCode::Char('l') => open_selected(app),
        KeyCode::Char('e') => {
            if app
                .selected_entry()
                .is_some_and(|e| matches!(e.kind, EntryKind::Note { .. }))
            {
                open_selected(app);
            }
        }

        // Up one folder
        KeyCode::Char('h') | KeyCode::Backspace => {
            if !app.shell.session.at_root() {
                app.execute_command("cd ..");
            }
        }

        KeyCode::Char('r') => app.refresh_entries(),
        KeyCode::Char('v') => app.toggle_vim(),
        _ => {}
    }
}

fn open_selected(app: &mut App) {
    let Some(entry) = app.selected_entry() else {
        return;
    };
    match entry.kind {
        EntryKind::Folder => {
            let name = if entry.name.contains(char::is_whitespace) {
                format!("\"{}\"", entry.name)
            } else {
                entry.name.clone()
            };
            app.execute_command(&format!("cd {}", name));
            app.browse_cursor = 0;
        }
        EntryKind::Note { .. } => {
            // Open by root-relative title so `cd` can't orphan the buffer
            let rel = app.shell.session.cwd.join(&entry.name);
            let title = rel.to_string_lossy().replace('\\', "/");
            app.open_note(&title);
        }
    }
}

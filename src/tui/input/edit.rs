use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::tui::vim::{VimMode, VimSignal};

use super::cycle_focus;

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    if app.open.is_none() {
        app.close_editor();
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Save works in every mode
    if ctrl && key.code == KeyCode::Char('s') {
        app.save_open_note();
        return;
    }

    if app.vim_enabled {
        handle_vim(app, key);
    } else {
        handle_plain(app, key, ctrl);
    }
}

fn handle_vim(app: &mut App, key: KeyEvent) {
    // Esc in Normal mode leaves the editor; in Insert mode the overlay
    // consumes it as the mode switch
    if app.vim.mode == VimMode::Normal && key.code == KeyCode::Esc {
        app.close_editor();
        return;
    }
    if app.vim.mode == VimMode::Normal && key.code == KeyCode::Tab {
        cycle_focus(app);
        return;
    }

    let Some(open) = &mut app.open else { return };
    match app.vim.handle_key(&mut open.buffer, key) {
        VimSignal::Save => {
            // Enter in Normal mode: save and return to the browser
            app.save_open_note();
            app.close_editor();
        }
        VimSignal::Continue => {}
    }
}

fn handle_plain(app: &mut App, key: KeyEvent, ctrl: bool) {
    if key.code == KeyCode::Esc {
        app.close_editor();
        return;
    }
    if key.code == KeyCode::Tab {
        cycle_focus(app);
        return;
    }

    let Some(open) = &mut app.open else { return };
    let buf = &mut open.buffer;
    match key.code {
        KeyCode::Char('z') if ctrl => buf.undo(),
        KeyCode::Char('y') if ctrl => buf.redo(),
        KeyCode::Left => buf.move_left(),
        KeyCode::Right => buf.move_right(),
        KeyCode::Up => buf.move_up(),
        KeyCode::Down => buf.move_down(),
        KeyCode::Home => buf.line_start(),
        KeyCode::End => buf.line_end(),
        KeyCode::PageUp => buf.page_up(),
        KeyCode::PageDown => buf.page_down(),
        KeyCode::Enter => {
            buf.snapshot();
            buf.insert_newline();
        }
        KeyCode::Backspace => {
            buf.snapshot();
            buf.backspace();
        }
        KeyCode::Char(c) if !ctrl => buf.insert_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::NoteStore;
    use crate::model::Config;
    use crate::shell::Shell;
    use crate::tui::app::Focus;
    use crate::tui::input::handle_key;
    use tempfile::TempDir;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn editing_app(vim: bool) -> (TempDir, App) {
        let tmp = TempDir::new().unwrap();
        let store = NoteStore::open(&tmp.path().join("notes")).unwrap();
        let mut config = Config::default();
        config.editor.vim_mode = vim;
        let shell = Shell::new(store, config);
        let mut app = App::new(shell);
        app.execute_command("add n line one");
        app.execute_command("edit n");
        (tmp, app)
    }

    #[test]
    fn test_vim_enter_saves_and_closes() {
        let (_tmp, mut app) = editing_app(true);
        handle_key(&mut app, key('A'));
        for c in "!".chars() {
            handle_key(&mut app, key(c));
        }
        handle_key(&mut app, code(KeyCode::Esc)); // back to Normal
        handle_key(&mut app, code(KeyCode::Enter)); // save + close
        assert_eq!(app.focus, Focus::Browse);
        app.execute_command("show n");
        assert!(app.console.iter().any(|l| l == "line one!"));
    }

    #[test]
    fn test_vim_esc_in_normal_leaves_editor() {
        let (_tmp, mut app) = editing_app(true);
        handle_key(&mut app, code(KeyCode::Esc));
        assert_eq!(app.focus, Focus::Browse);
        // Buffer is kept, not discarded
        assert!(app.open.is_some());
    }

    #[test]
    fn test_plain_mode_types_text() {
        let (_tmp, mut app) = editing_app(false);
        for c in "hi ".chars() {
            handle_key(&mut app, key(c));
        }
        assert_eq!(app.open.as_ref().unwrap().buffer.lines, vec!["hi line one"]);
    }

    #[test]
    fn test_ctrl_s_saves_in_insert_mode() {
        let (_tmp, mut app) = editing_app(true);
        handle_key(&mut app, key('i'));
        handle_key(&mut app, key('x'));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );
        assert!(!app.open.as_ref().unwrap().buffer.dirty);
        // Still editing, still in Insert
        assert_eq!(app.focus, Focus::Edit);
        assert_eq!(app.vim.mode, VimMode::Insert);
    }
}

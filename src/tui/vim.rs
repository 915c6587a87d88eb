use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::editor::EditorBuffer;

/// The two overlay states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VimMode {
    Normal,
    Insert,
}

/// First key of a two-key sequence, held until the next key arrives.
/// Pending operators have no timeout; any non-completing key clears
/// them as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    Delete,
    Yank,
    Change,
    Go,
}

/// What the overlay asks the host to do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VimSignal {
    Continue,
    /// Enter in Normal mode: save the open note
    Save,
}

/// The vim key overlay: a two-state machine translating key events into
/// editor-buffer edits. Holds no buffer of its own; the host owns the
/// `EditorBuffer` and passes it in per key.
#[derive(Debug)]
pub struct VimState {
    pub mode: VimMode,
    pending: Pending,
    /// When a `k` was typed in Insert mode (for the `kj` escape)
    last_insert_k: Option<Instant>,
    kj_timeout: Duration,
}

impl VimState {
    pub fn new(kj_timeout_ms: u64) -> Self {
        VimState {
            mode: VimMode::Normal,
            pending: Pending::None,
            last_insert_k: None,
            kj_timeout: Duration::from_millis(kj_timeout_ms),
        }
    }

    /// Reset to Normal, dropping any half-typed sequence (used when a
    /// different note is opened).
    pub fn reset(&mut self) {
        self.mode = VimMode::Normal;
        self.pending = Pending::None;
        self.last_insert_k = None;
    }

    pub fn handle_key(&mut self, buf: &mut EditorBuffer, key: KeyEvent) -> VimSignal {
        self.handle_key_at(buf, key, Instant::now())
    }

    /// Testable entry point: the clock comes in from outside.
    pub fn handle_key_at(&mut self, buf: &mut EditorBuffer, key: KeyEvent, now: Instant) -> VimSignal {
        match self.mode {
            VimMode::Normal => self.handle_normal(buf, key),
            VimMode::Insert => {
                self.handle_insert(buf, key, now);
                VimSignal::Continue
            }
        }
    }

    // -----------------------------------------------------------------
    // Normal mode
    // -----------------------------------------------------------------

    fn handle_normal(&mut self, buf: &mut EditorBuffer, key: KeyEvent) -> VimSignal {
        // A pending operator consumes the next key, matching or not
        if self.pending != Pending::None {
            let pending = std::mem::replace(&mut self.pending, Pending::None);
            match (pending, key.code) {
                (Pending::Delete, KeyCode::Char('d')) => {
                    buf.snapshot();
                    buf.delete_line();
                }
                (Pending::Yank, KeyCode::Char('y')) => buf.yank_line(),
                (Pending::Change, KeyCode::Char('c')) => {
                    buf.snapshot();
                    buf.change_line();
                    self.mode = VimMode::Insert;
                }
                (Pending::Go, KeyCode::Char('g')) => buf.buffer_start(),
                // Unrecognized sequence: no-op
                _ => {}
            }
            return VimSignal::Continue;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => return VimSignal::Save,

            // Movement
            KeyCode::Char('h') | KeyCode::Left => buf.move_left(),
            KeyCode::Char('j') | KeyCode::Down => buf.move_down(),
            KeyCode::Char('k') | KeyCode::Up => buf.move_up(),
            KeyCode::Char('l') | KeyCode::Right => buf.move_right(),
            KeyCode::Char('w') => buf.move_word_forward(),
            KeyCode::Char('b') => buf.move_word_back(),
            KeyCode::Char('e') => buf.move_word_end(),
            KeyCode::Char('0') => buf.line_start(),
            KeyCode::Char('^') => buf.first_non_blank(),
            KeyCode::Char('$') => buf.line_end(),
            KeyCode::Char('G') => buf.buffer_end(),
            KeyCode::Char('u') if ctrl => buf.page_up(),
            KeyCode::Char('d') if ctrl => buf.page_down(),

            // Insert transitions
            KeyCode::Char('i') => self.enter_insert(buf),
            KeyCode::Char('a') => {
                buf.move_right();
                self.enter_insert(buf);
            }
            KeyCode::Char('I') => {
                buf.line_start();
                self.enter_insert(buf);
            }
            KeyCode::Char('A') => {
                buf.line_end();
                self.enter_insert(buf);
            }
            KeyCode::Char('o') => {
                buf.snapshot();
                buf.open_below();
                self.mode = VimMode::Insert;
            }
            KeyCode::Char('O') => {
                buf.snapshot();
                buf.open_above();
                self.mode = VimMode::Insert;
            }
            KeyCode::Char('C') => {
                buf.snapshot();
                buf.delete_to_eol();
                self.mode = VimMode::Insert;
            }

            // Deletes
            KeyCode::Char('x') => {
                buf.snapshot();
                buf.delete_char();
            }
            KeyCode::Char('X') => {
                buf.snapshot();
                buf.delete_char_before();
            }
            KeyCode::Char('D') => {
                buf.snapshot();
                buf.delete_to_eol();
            }

            // Copy/paste
            KeyCode::Char('p') => {
                buf.snapshot();
                buf.paste_after();
            }
            KeyCode::Char('P') => {
                buf.snapshot();
                buf.paste_before();
            }

            // Undo/redo
            KeyCode::Char('u') => buf.undo(),
            KeyCode::Char('r') if ctrl => buf.redo(),

            // Operators (two-key sequences)
            KeyCode::Char('d') => self.pending = Pending::Delete,
            KeyCode::Char('y') => self.pending = Pending::Yank,
            KeyCode::Char('c') => self.pending = Pending::Change,
            KeyCode::Char('g') => self.pending = Pending::Go,

            // Anything else: no-op
            _ => {}
        }
        VimSignal::Continue
    }

    fn enter_insert(&mut self, buf: &mut EditorBuffer) {
        // One snapshot per insert session: `u` undoes the whole insertion
        buf.snapshot();
        self.mode = VimMode::Insert;
    }

    // -----------------------------------------------------------------
    // Insert mode
    // -----------------------------------------------------------------

    fn handle_insert(&mut self, buf: &mut EditorBuffer, key: KeyEvent, now: Instant) {
        // Ctrl-chords never insert text
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }
        match key.code {
            KeyCode::Esc => {
                self.mode = VimMode::Normal;
                self.last_insert_k = None;
            }
            KeyCode::Char('j')
                if self
                    .last_insert_k
                    .is_some_and(|at| now.duration_since(at) < self.kj_timeout) =>
            {
                // `kj` escape: remove the `k` that was just typed
                buf.delete_char_before();
                self.mode = VimMode::Normal;
                self.last_insert_k = None;
            }
            KeyCode::Char('k') => {
                buf.insert_char('k');
                self.last_insert_k = Some(now);
            }
            KeyCode::Enter => {
                buf.insert_newline();
                self.last_insert_k = None;
            }
            KeyCode::Backspace => {
                buf.backspace();
                self.last_insert_k = None;
            }
            KeyCode::Char(c) => {
                buf.insert_char(c);
                self.last_insert_k = None;
            }
            KeyCode::Left => buf.move_left(),
            KeyCode::Right => buf.move_right(),
            KeyCode::Up => buf.move_up(),
            KeyCode::Down => buf.move_down(),
            _ => {}
        }
    }
}

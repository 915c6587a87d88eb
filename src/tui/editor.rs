use unicode_segmentation::UnicodeSegmentation;

const UNDO_STACK_LIMIT: usize = 500;

/// The yank register: line-wise (dd/yy) or character-wise (D)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Register {
    Line(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    lines: Vec<String>,
    cursor_line: usize,
    cursor_col: usize,
}

/// Line-based text buffer for the editor pane with cursor, yank
/// register, and snapshot undo. Pure (no terminal, no filesystem), so
/// every vim operation can be tested directly.
///
/// Invariant: `lines` always holds at least one (possibly empty) line;
/// `cursor_col` is a char index in `0..=len` of the cursor line.
#[derive(Debug, Clone)]
pub struct EditorBuffer {
    pub lines: Vec<String>,
    pub cursor_line: usize,
    pub cursor_col: usize,
    pub register: Option<Register>,
    pub dirty: bool,
    trailing_newline: bool,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl EditorBuffer {
    pub fn from_content(content: &str) -> Self {
        let lines: Vec<String> = if content.is_empty() {
            vec![String::new()]
        } else {
            content.lines().map(str::to_string).collect()
        };
        EditorBuffer {
            lines,
            cursor_line: 0,
            cursor_col: 0,
            register: None,
            dirty: false,
            trailing_newline: content.ends_with('\n'),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Serialize back to note content, preserving the original
    /// trailing-newline convention.
    pub fn content(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline && !out.is_empty() {
            out.push('\n');
        }
        out
    }

    /// A buffer holding a single empty line
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_len(&self, idx: usize) -> usize {
        self.lines[idx].chars().count()
    }

    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor_line]
    }

    fn clamp_col(&mut self) {
        let len = self.line_len(self.cursor_line);
        if self.cursor_col > len {
            self.cursor_col = len;
        }
    }

    // -----------------------------------------------------------------
    // Motions
    // -----------------------------------------------------------------

    pub fn move_left(&mut self) {
        self.cursor_col = self.cursor_col.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor_col < self.line_len(self.cursor_line) {
            self.cursor_col += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.clamp_col();
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.clamp_col();
        }
    }

    /// `w`: start of the next word, wrapping to the next line
    pub fn move_word_forward(&mut self) {
        let line = &self.lines[self.cursor_line];
        let byte = char_to_byte(line, self.cursor_col);
        let next = line
            .split_word_bound_indices()
            .find(|(b, seg)| *b > byte && !seg.trim().is_empty())
            .map(|(b, _)| b);
        match next {
            Some(b) => self.cursor_col = byte_to_char(line, b),
            None => {
                if self.cursor_line + 1 < self.lines.len() {
                    self.cursor_line += 1;
                    self.cursor_col = 0;
                } else {
                    self.cursor_col = self.line_len(self.cursor_line);
                }
            }
        }
    }

    /// `b`: start of the previous word, wrapping to the previous line
    pub fn move_word_back(&mut self) {
        let line = &self.lines[self.cursor_line];
        let byte = char_to_byte(line, self.cursor_col);
        let prev = word_starts(line).into_iter().rev().find(|b| *b < byte);
        match prev {
            Some(b) => self.cursor_col = byte_to_char(line, b),
            None => {
                if self.cursor_line > 0 {
                    self.cursor_line -= 1;
                    let line = &self.lines[self.cursor_line];
                    self.cursor_col = word_starts(line)
                        .last()
                        .map(|b| byte_to_char(line, *b))
                        .unwrap_or(0);
                } else {
                    self.cursor_col = 0;
                }
            }
        }
    }

    /// `e`: end (last char) of the current or next word
    pub fn move_word_end(&mut self) {
        let line = &self.lines[self.cursor_line];
        let end = line
            .split_word_bound_indices()
            .filter(|(_, seg)| !seg.trim().is_empty())
            .map(|(b, seg)| b + seg.len())
            .find(|end| byte_to_char(line, *end) > self.cursor_col + 1);
        match end {
            Some(end) => self.cursor_col = byte_to_char(line, end).saturating_sub(1),
            None => {
                if self.cursor_line + 1 < self.lines.len() {
                    self.cursor_line += 1;
                    self.cursor_col = 0;
                    if !self.current_line().is_empty() {
                        self.move_word_end();
                    }
                }
            }
        }
    }

    pub fn line_start(&mut self) {
        self.cursor_col = 0;
    }

    /// `^`: first non-blank character of the line
    pub fn first_non_blank(&mut self) {
        self.cursor_col = self
            .current_line()
            .chars()
            .position(|c| !c.is_whitespace())
            .unwrap_or(0);
    }

    pub fn line_end(&mut self) {
        self.cursor_col = self.line_len(self.cursor_line);
    }

    pub fn buffer_start(&mut self) {
        self.cursor_line = 0;
        self.cursor_col = 0;
    }

    pub fn buffer_end(&mut self) {
        self.cursor_line = self.lines.len() - 1;
        self.line_end();
    }

    pub fn page_up(&mut self) {
        self.cursor_line = self.cursor_line.saturating_sub(15);
        self.clamp_col();
    }

    pub fn page_down(&mut self) {
        self.cursor_line = (self.cursor_line + 15).min(self.lines.len() - 1);
        self.clamp_col();
    }

    // -----------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------

    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.cursor_line];
        let byte = char_to_byte(line, self.cursor_col);
        line.insert(byte, c);
        self.cursor_col += 1;
        self.dirty = true;
    }

    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor_line];
        let byte = char_to_byte(line, self.cursor_col);
        let rest = line.split_off(byte);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
        self.dirty = true;
    }

    /// `x`: delete the character under the cursor
    pub fn delete_char(&mut self) {
        let len = self.line_len(self.cursor_line);
        if self.cursor_col < len {
            let line = &mut self.lines[self.cursor_line];
            let byte = char_to_byte(line, self.cursor_col);
            line.remove(byte);
            self.dirty = true;
        }
    }

    /// `X`: delete the character before the cursor (no line joining)
    pub fn delete_char_before(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            self.delete_char();
        }
    }

    /// Insert-mode backspace: joins with the previous line at column 0
    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            self.delete_char_before();
        } else if self.cursor_line > 0 {
            let line = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
            self.lines[self.cursor_line].push_str(&line);
            self.dirty = true;
        }
    }

    /// `dd`: remove the cursor line into the register. No-op on an
    /// empty buffer.
    pub fn delete_line(&mut self) {
        if self.is_empty() {
            return;
        }
        let line = self.lines.remove(self.cursor_line);
        self.register = Some(Register::Line(line));
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        if self.cursor_line >= self.lines.len() {
            self.cursor_line = self.lines.len() - 1;
        }
        self.cursor_col = 0;
        self.dirty = true;
    }

    /// `D`: delete from the cursor to the end of the line
    pub fn delete_to_eol(&mut self) {
        let line = &mut self.lines[self.cursor_line];
        let byte = char_to_byte(line, self.cursor_col);
        if byte < line.len() {
            self.register = Some(Register::Text(line.split_off(byte)));
            self.dirty = true;
        }
    }

    /// `yy`: copy the cursor line into the register
    pub fn yank_line(&mut self) {
        self.register = Some(Register::Line(self.current_line().to_string()));
    }

    /// `p`: paste the register after the cursor (line below / after col)
    pub fn paste_after(&mut self) {
        match self.register.clone() {
            Some(Register::Line(line)) => {
                self.lines.insert(self.cursor_line + 1, line);
                self.cursor_line += 1;
                self.cursor_col = 0;
                self.dirty = true;
            }
            Some(Register::Text(text)) => {
                if self.cursor_col < self.line_len(self.cursor_line) {
                    self.cursor_col += 1;
                }
                self.insert_text(&text);
            }
            None => {}
        }
    }

    /// `P`: paste the register before the cursor (line above / at col)
    pub fn paste_before(&mut self) {
        match self.register.clone() {
            Some(Register::Line(line)) => {
                self.lines.insert(self.cursor_line, line);
                self.cursor_col = 0;
                self.dirty = true;
            }
            Some(Register::Text(text)) => self.insert_text(&text),
            None => {}
        }
    }

    fn insert_text(&mut self, text: &str) {
        let line = &mut self.lines[self.cursor_line];
        let byte = char_to_byte(line, self.cursor_col);
        line.insert_str(byte, text);
        self.cursor_col += text.chars().count();
        self.dirty = true;
    }

    /// `o`: open an empty line below the cursor
    pub fn open_below(&mut self) {
        self.lines.insert(self.cursor_line + 1, String::new());
        self.cursor_line += 1;
        self.cursor_col = 0;
        self.dirty = true;
    }

    /// `O`: open an empty line above the cursor
    pub fn open_above(&mut self) {
        self.lines.insert(self.cursor_line, String::new());
        self.cursor_col = 0;
        self.dirty = true;
    }

    /// `cc`: clear the cursor line (caller switches to Insert)
    pub fn change_line(&mut self) {
        self.lines[self.cursor_line].clear();
        self.cursor_col = 0;
        self.dirty = true;
    }

    // -----------------------------------------------------------------
    // Undo
    // -----------------------------------------------------------------

    fn current_snapshot(&self) -> Snapshot {
        Snapshot {
            lines: self.lines.clone(),
            cursor_line: self.cursor_line,
            cursor_col: self.cursor_col,
        }
    }

    /// Capture the buffer before a mutation. Consecutive identical
    /// snapshots collapse, so "enter insert mode, change nothing" never
    /// pollutes the stack.
    pub fn snapshot(&mut self) {
        let snap = self.current_snapshot();
        if self.undo_stack.last().map(|s| &s.lines) == Some(&snap.lines) {
            return;
        }
        self.undo_stack.push(snap);
        if self.undo_stack.len() > UNDO_STACK_LIMIT {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    pub fn undo(&mut self) {
        let Some(snap) = self.undo_stack.pop() else {
            return;
        };
        if snap.lines == self.lines {
            // Stack top matches the present state; undo past it
            self.redo_stack.push(snap);
            return self.undo();
        }
        self.redo_stack.push(self.current_snapshot());
        self.restore(snap);
    }

    pub fn redo(&mut self) {
        let Some(snap) = self.redo_stack.pop() else {
            return;
        };
        self.undo_stack.push(self.current_snapshot());
        self.restore(snap);
    }

    fn restore(&mut self, snap: Snapshot) {
        self.lines = snap.lines;
        self.cursor_line = snap.cursor_line.min(self.lines.len() - 1);
        self.cursor_col = snap.cursor_col;
        self.clamp_col();
        self.dirty = true;
    }
}

/// Byte offsets of every word start in a line (whitespace excluded)
fn word_starts(s: &str) -> Vec<usize> {
    s.split_word_bound_indices()
        .filter(|(_, seg)| !seg.trim().is_empty())
        .map(|(b, _)| b)
        .collect()
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(s.len())
}

fn byte_to_char(s: &str, byte_idx: usize) -> usize {
    s[..byte_idx].chars().count()
}

/// File extension used for note files on disk.
pub const NOTE_EXT: &str = "txt";

/// Marker line appended to a note by the `done` command.
pub const DONE_MARKER: &str = "[DONE]";

/// Checkbox state of a todo line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoState {
    Open,
    Checked,
}

impl TodoState {
    /// The literal marker at the start of a todo line
    pub fn marker(self) -> &'static str {
        match self {
            TodoState::Open => "[ ]",
            TodoState::Checked => "[x]",
        }
    }

    /// The opposite state
    pub fn toggled(self) -> TodoState {
        match self {
            TodoState::Open => TodoState::Checked,
            TodoState::Checked => TodoState::Open,
        }
    }
}

/// A parsed todo line: its state and the text after the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoLine<'a> {
    pub state: TodoState,
    pub label: &'a str,
}

/// Parse a line as a todo item. The marker must sit at the very start
/// of the line: `[ ]` or `[x]`, nothing before it.
pub fn parse_todo(line: &str) -> Option<TodoLine<'_>> {
    if let Some(rest) = line.strip_prefix("[ ]") {
        Some(TodoLine {
            state: TodoState::Open,
            label: rest,
        })
    } else if let Some(rest) = line.strip_prefix("[x]") {
        Some(TodoLine {
            state: TodoState::Checked,
            label: rest,
        })
    } else {
        None
    }
}

/// Flip the marker of a todo line. Returns the rewritten line and the
/// new state, or None if the line is not a todo item.
pub fn toggle_todo(line: &str) -> Option<(String, TodoState)> {
    let todo = parse_todo(line)?;
    let new_state = todo.state.toggled();
    Some((format!("{}{}", new_state.marker(), todo.label), new_state))
}

/// A note: a title (path-like, relative to the sandbox root, without
/// the `.txt` extension) and its full text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub content: String,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Note {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Content split into lines (no trailing empty line for a final newline)
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// A note is done once any of its lines is the `[DONE]` marker
    pub fn is_done(&self) -> bool {
        content_is_done(&self.content)
    }
}

/// Done check shared with listing code that has raw content only.
pub fn content_is_done(content: &str) -> bool {
    content.lines().any(|l| l.trim() == DONE_MARKER)
}

/// The on-disk file name for a note title (`shopping` → `shopping.txt`).
pub fn note_file_name(title: &str) -> String {
    format!("{}.{}", title, NOTE_EXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_todo_open() {
        let todo = parse_todo("[ ] Buy milk").unwrap();
        assert_eq!(todo.state, TodoState::Open);
        assert_eq!(todo.label, " Buy milk");
    }

    #[test]
    fn test_parse_todo_checked() {
        let todo = parse_todo("[x] Buy milk").unwrap();
        assert_eq!(todo.state, TodoState::Checked);
    }

    #[test]
    fn test_parse_todo_marker_must_lead() {
        assert!(parse_todo("  [ ] indented").is_none());
        assert!(parse_todo("see [ ] later").is_none());
        assert!(parse_todo("[X] uppercase").is_none());
        assert!(parse_todo("plain text").is_none());
    }

    #[test]
    fn test_toggle_todo_round_trip() {
        let (once, state) = toggle_todo("[ ] Buy milk").unwrap();
        assert_eq!(once, "[x] Buy milk");
        assert_eq!(state, TodoState::Checked);
        let (twice, state) = toggle_todo(&once).unwrap();
        assert_eq!(twice, "[ ] Buy milk");
        assert_eq!(state, TodoState::Open);
    }

    #[test]
    fn test_toggle_todo_non_todo() {
        assert!(toggle_todo("no marker here").is_none());
    }

    #[test]
    fn test_note_is_done() {
        assert!(Note::new("a", "first\n[DONE]\n").is_done());
        assert!(Note::new("a", "  [DONE]  ").is_done());
        assert!(!Note::new("a", "not [DONE] inline").is_done());
        assert!(!Note::new("a", "").is_done());
    }

    #[test]
    fn test_note_file_name() {
        assert_eq!(note_file_name("shopping"), "shopping.txt");
    }
}

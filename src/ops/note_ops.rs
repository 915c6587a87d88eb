use std::path::Path;

use crate::io::store::{NoteStore, StoreError};
use crate::model::{DONE_MARKER, TodoState, content_is_done};
use crate::ops::todo::{self, TodoError};

/// How `edit` applies its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Append,
    Replace,
}

/// Result of `done`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoneOutcome {
    Marked,
    AlreadyDone,
}

/// Error type for `check`: the note lookup or the toggle itself can fail
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Todo(#[from] TodoError),
}

/// Create a new, possibly empty note.
pub fn add_note(
    store: &NoteStore,
    cwd: &Path,
    title: &str,
    content: &str,
) -> Result<(), StoreError> {
    store.create_note(cwd, title, content)
}

/// Append to or replace an existing note's content. Appended text goes
/// on its own line when the note doesn't already end with a newline.
pub fn edit_note(
    store: &NoteStore,
    cwd: &Path,
    title: &str,
    text: &str,
    mode: EditMode,
) -> Result<(), StoreError> {
    let note = store.read_note(cwd, title)?;
    let new_content = match mode {
        EditMode::Replace => text.to_string(),
        EditMode::Append => {
            if !note.content.is_empty() && !note.content.ends_with('\n') {
                format!("{}\n{}", note.content, text)
            } else {
                format!("{}{}", note.content, text)
            }
        }
    };
    store.write_note(cwd, title, &new_content)
}

/// Append the `[DONE]` marker to a note, once.
pub fn mark_done(store: &NoteStore, cwd: &Path, title: &str) -> Result<DoneOutcome, StoreError> {
    let note = store.read_note(cwd, title)?;
    if content_is_done(&note.content) {
        return Ok(DoneOutcome::AlreadyDone);
    }
    let content = format!("{}\n{}\n", note.content.trim_end(), DONE_MARKER);
    store.write_note(cwd, title, &content)?;
    Ok(DoneOutcome::Marked)
}

/// Toggle the checkbox on the given 1-based line of a note. The file is
/// only rewritten when the toggle succeeds.
pub fn check_line(
    store: &NoteStore,
    cwd: &Path,
    title: &str,
    line_no: usize,
) -> Result<TodoState, CheckError> {
    let note = store.read_note(cwd, title)?;
    let (content, state) = todo::toggle_line(&note.content, line_no)?;
    store.write_note(cwd, title, &content)?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn store() -> (TempDir, NoteStore) {
        let tmp = TempDir::new().unwrap();
        let store = NoteStore::open(&tmp.path().join("notes")).unwrap();
        (tmp, store)
    }

    fn root() -> PathBuf {
        PathBuf::new()
    }

    #[test]
    fn test_add_then_show_returns_created_content() {
        let (_tmp, store) = store();
        add_note(&store, &root(), "empty", "").unwrap();
        assert_eq!(store.read_note(&root(), "empty").unwrap().content, "");

        add_note(&store, &root(), "todo", "[ ] Buy milk").unwrap();
        assert_eq!(
            store.read_note(&root(), "todo").unwrap().content,
            "[ ] Buy milk"
        );
    }

    #[test]
    fn test_edit_append_puts_text_on_new_line() {
        let (_tmp, store) = store();
        add_note(&store, &root(), "n", "first").unwrap();
        edit_note(&store, &root(), "n", "second", EditMode::Append).unwrap();
        assert_eq!(store.read_note(&root(), "n").unwrap().content, "first\nsecond");
    }

    #[test]
    fn test_edit_append_after_trailing_newline() {
        let (_tmp, store) = store();
        add_note(&store, &root(), "n", "first\n").unwrap();
        edit_note(&store, &root(), "n", "second", EditMode::Append).unwrap();
        assert_eq!(store.read_note(&root(), "n").unwrap().content, "first\nsecond");
    }

    #[test]
    fn test_edit_replace() {
        let (_tmp, store) = store();
        add_note(&store, &root(), "n", "old stuff").unwrap();
        edit_note(&store, &root(), "n", "fresh", EditMode::Replace).unwrap();
        assert_eq!(store.read_note(&root(), "n").unwrap().content, "fresh");
    }

    #[test]
    fn test_edit_missing_note_fails() {
        let (_tmp, store) = store();
        assert!(matches!(
            edit_note(&store, &root(), "ghost", "x", EditMode::Append),
            Err(StoreError::NoteNotFound(_))
        ));
    }

    #[test]
    fn test_mark_done_once() {
        let (_tmp, store) = store();
        add_note(&store, &root(), "n", "work to do\n").unwrap();
        assert_eq!(mark_done(&store, &root(), "n").unwrap(), DoneOutcome::Marked);
        assert_eq!(
            store.read_note(&root(), "n").unwrap().content,
            "work to do\n[DONE]\n"
        );
        assert_eq!(
            mark_done(&store, &root(), "n").unwrap(),
            DoneOutcome::AlreadyDone
        );
        // Marker not duplicated
        let content = store.read_note(&root(), "n").unwrap().content;
        assert_eq!(content.matches(DONE_MARKER).count(), 1);
    }

    #[test]
    fn test_check_toggles_and_persists() {
        let (_tmp, store) = store();
        add_note(&store, &root(), "todo", "[ ] Buy milk\n").unwrap();

        let state = check_line(&store, &root(), "todo", 1).unwrap();
        assert_eq!(state, TodoState::Checked);
        assert_eq!(
            store.read_note(&root(), "todo").unwrap().content,
            "[x] Buy milk\n"
        );

        let state = check_line(&store, &root(), "todo", 1).unwrap();
        assert_eq!(state, TodoState::Open);
        assert_eq!(
            store.read_note(&root(), "todo").unwrap().content,
            "[ ] Buy milk\n"
        );
    }

    #[test]
    fn test_check_out_of_range_leaves_file_untouched() {
        let (_tmp, store) = store();
        add_note(&store, &root(), "todo", "[ ] only\n").unwrap();

        let err = check_line(&store, &root(), "todo", 5).unwrap_err();
        assert!(matches!(
            err,
            CheckError::Todo(TodoError::LineOutOfRange { line: 5, max: 1 })
        ));
        assert_eq!(
            store.read_note(&root(), "todo").unwrap().content,
            "[ ] only\n"
        );
    }

    #[test]
    fn test_check_missing_note() {
        let (_tmp, store) = store();
        assert!(matches!(
            check_line(&store, &root(), "ghost", 1),
            Err(CheckError::Store(StoreError::NoteNotFound(_)))
        ));
    }
}

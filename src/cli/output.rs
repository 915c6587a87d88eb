use serde::Serialize;

use crate::model::{Entry, EntryKind, Note};
use crate::ops::search::SearchHit;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct EntryJson {
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

#[derive(Serialize)]
pub struct NoteJson {
    pub title: String,
    pub done: bool,
    pub content: String,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub note: String,
    pub line: usize,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn entry_to_json(entry: &Entry) -> EntryJson {
    match entry.kind {
        EntryKind::Folder => EntryJson {
            name: entry.name.clone(),
            kind: "folder".to_string(),
            done: None,
        },
        EntryKind::Note { done } => EntryJson {
            name: entry.name.clone(),
            kind: "note".to_string(),
            done: Some(done),
        },
    }
}

pub fn note_to_json(note: &Note) -> NoteJson {
    NoteJson {
        title: note.title.clone(),
        done: note.is_done(),
        content: note.content.clone(),
    }
}

pub fn hit_to_json(hit: &SearchHit) -> SearchHitJson {
    SearchHitJson {
        note: hit.note.clone(),
        line: hit.line,
        text: hit.text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_entry_json_shapes() {
        let folder = Entry {
            name: "work".into(),
            kind: EntryKind::Folder,
            modified: Some(Local::now()),
        };
        let json = serde_json::to_string(&entry_to_json(&folder)).unwrap();
        assert_eq!(json, r#"{"name":"work","kind":"folder"}"#);

        let note = Entry {
            name: "todo".into(),
            kind: EntryKind::Note { done: true },
            modified: None,
        };
        let json = serde_json::to_string(&entry_to_json(&note)).unwrap();
        assert_eq!(json, r#"{"name":"todo","kind":"note","done":true}"#);
    }

    #[test]
    fn test_note_json() {
        let note = Note::new("todo", "[ ] Buy milk\n[DONE]\n");
        let json = serde_json::to_string(&note_to_json(&note)).unwrap();
        assert!(json.contains(r#""done":true"#));
        assert!(json.contains("Buy milk"));
    }
}

use chrono::{DateTime, Local};

/// What a directory entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    /// A note file; `done` when its content carries the `[DONE]` marker
    Note { done: bool },
}

/// One entry in a folder listing: a subfolder or a note (extension
/// already stripped from the name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    pub modified: Option<DateTime<Local>>,
}

impl Entry {
    /// Name as shown by `ls`: folders get a trailing slash
    pub fn display_name(&self) -> String {
        match self.kind {
            EntryKind::Folder => format!("{}/", self.name),
            EntryKind::Note { .. } => self.name.clone(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, EntryKind::Folder)
    }

    pub fn is_done(&self) -> bool {
        matches!(self.kind, EntryKind::Note { done: true })
    }
}

/// Listing order: folders first, then notes, each group alphabetical.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        (!a.is_folder(), &a.name).cmp(&(!b.is_folder(), &b.name))
    });
}

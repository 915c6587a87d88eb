use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};

use crate::io::journal;
use crate::model::{
    Entry, EntryKind, NOTE_EXT, Note, content_is_done, note_file_name, sort_entries,
};

/// Error type for note store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("note not found: {0}")]
    NoteNotFound(String),
    #[error("folder not found: {0}")]
    FolderNotFound(String),
    #[error("'{0}' already exists")]
    DuplicateName(String),
    #[error("path escapes the notes directory: {0}")]
    OutsideRoot(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolve a user-supplied path against a current folder, both relative
/// to the sandbox root. Leading `/` means root-relative; `..` may not
/// climb above the root. Resolution is purely lexical; nothing needs
/// to exist yet.
pub fn resolve_path(cwd: &Path, user_path: &str) -> Result<PathBuf, StoreError> {
    let (mut rel, remainder) = if let Some(stripped) = user_path.strip_prefix('/') {
        (PathBuf::new(), stripped)
    } else {
        (cwd.to_path_buf(), user_path)
    };

    for component in Path::new(remainder).components() {
        match component {
            Component::Normal(part) => rel.push(part),
            Component::ParentDir => {
                if !rel.pop() {
                    return Err(StoreError::OutsideRoot(user_path.to_string()));
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    Ok(rel)
}

/// Display form of a root-relative folder path: `/`-rooted, `/` at root.
pub fn display_path(rel: &Path) -> String {
    let mut out = String::from("/");
    let joined = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(p) => p.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    out.push_str(&joined);
    out
}

/// Sandboxed store of plain-text notes under a single root directory.
///
/// All paths given to store methods are user-level: a current folder
/// (relative to the root) plus a path string as typed. Notes are
/// addressed by title without the `.txt` extension.
pub struct NoteStore {
    root: PathBuf,
}

impl NoteStore {
    /// Open (creating if needed) the store rooted at `root`.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(root)?;
        let root = fs::canonicalize(root)?;
        Ok(NoteStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn abs(&self, rel: &Path) -> PathBuf {
        self.root.join(rel)
    }

    /// Absolute path of the `.txt` file for a note title (which may
    /// itself contain folders, e.g. `work/todo`).
    fn note_abs(&self, cwd: &Path, title: &str) -> Result<PathBuf, StoreError> {
        let rel = resolve_path(cwd, title)?;
        let Some(stem) = rel.file_name().and_then(|n| n.to_str()) else {
            return Err(StoreError::NoteNotFound(title.to_string()));
        };
        let file = rel.with_file_name(note_file_name(stem));
        Ok(self.abs(&file))
    }

    // -----------------------------------------------------------------
    // Notes
    // -----------------------------------------------------------------

    pub fn note_exists(&self, cwd: &Path, title: &str) -> bool {
        self.note_abs(cwd, title).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Create a new note. Fails with `DuplicateName` if a note of that
    /// name already exists, `FolderNotFound` if its folder doesn't.
    pub fn create_note(&self, cwd: &Path, title: &str, content: &str) -> Result<(), StoreError> {
        let path = self.note_abs(cwd, title)?;
        if path.exists() {
            return Err(StoreError::DuplicateName(title.to_string()));
        }
        self.check_parent(&path, title)?;
        self.write_file(&path, title, content)
    }

    /// Read a note's content.
    pub fn read_note(&self, cwd: &Path, title: &str) -> Result<Note, StoreError> {
        let path = self.note_abs(cwd, title)?;
        if !path.is_file() {
            return Err(StoreError::NoteNotFound(title.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        Ok(Note::new(title, content))
    }

    /// Overwrite an existing note's content. Fails with `NoteNotFound`
    /// if the note is missing (use `create_note` for new notes).
    pub fn write_note(&self, cwd: &Path, title: &str, content: &str) -> Result<(), StoreError> {
        let path = self.note_abs(cwd, title)?;
        if !path.is_file() {
            return Err(StoreError::NoteNotFound(title.to_string()));
        }
        self.write_file(&path, title, content)
    }

    /// Save an open editor buffer: writes whether or not the file still
    /// exists (the note may have been removed underneath the editor).
    pub fn save_note(&self, cwd: &Path, title: &str, content: &str) -> Result<(), StoreError> {
        let path = self.note_abs(cwd, title)?;
        self.check_parent(&path, title)?;
        self.write_file(&path, title, content)
    }

    pub fn remove_note(&self, cwd: &Path, title: &str) -> Result<(), StoreError> {
        let path = self.note_abs(cwd, title)?;
        if !path.is_file() {
            return Err(StoreError::NoteNotFound(title.to_string()));
        }
        fs::remove_file(&path)?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Folders
    // -----------------------------------------------------------------

    /// Create a folder (and any missing parents). Fails with
    /// `DuplicateName` if the folder itself already exists.
    pub fn make_folder(&self, cwd: &Path, name: &str) -> Result<(), StoreError> {
        let rel = resolve_path(cwd, name)?;
        let path = self.abs(&rel);
        if path.exists() {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        fs::create_dir_all(&path)?;
        Ok(())
    }

    /// Delete a folder and everything under it.
    pub fn remove_folder(&self, cwd: &Path, name: &str) -> Result<(), StoreError> {
        let rel = resolve_path(cwd, name)?;
        let path = self.abs(&rel);
        if !path.is_dir() {
            return Err(StoreError::FolderNotFound(name.to_string()));
        }
        fs::remove_dir_all(&path)?;
        Ok(())
    }

    /// Resolve a `cd` target, returning the new current folder
    /// (relative to the root) if it exists.
    pub fn change_folder(&self, cwd: &Path, target: &str) -> Result<PathBuf, StoreError> {
        let rel = resolve_path(cwd, target)?;
        if !self.abs(&rel).is_dir() {
            return Err(StoreError::FolderNotFound(target.to_string()));
        }
        Ok(rel)
    }

    // -----------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------

    /// Entries of a folder: subfolders and notes, folders first, each
    /// group alphabetical. Dot-files (config, state, journal) are
    /// hidden; so are non-`.txt` files, which the store does not manage.
    pub fn list_entries(&self, rel: &Path) -> Result<Vec<Entry>, StoreError> {
        let dir = self.abs(rel);
        if !dir.is_dir() {
            return Err(StoreError::FolderNotFound(display_path(rel)));
        }

        let mut entries = Vec::new();
        for dirent in fs::read_dir(&dir)? {
            let dirent = dirent?;
            let Ok(name) = dirent.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let path = dirent.path();
            let modified = modified_time(&path);

            if path.is_dir() {
                entries.push(Entry {
                    name,
                    kind: EntryKind::Folder,
                    modified,
                });
            } else if let Some(stem) = name.strip_suffix(&format!(".{}", NOTE_EXT)) {
                let done = fs::read_to_string(&path)
                    .map(|c| content_is_done(&c))
                    .unwrap_or(false);
                entries.push(Entry {
                    name: stem.to_string(),
                    kind: EntryKind::Note { done },
                    modified,
                });
            }
        }
        sort_entries(&mut entries);
        Ok(entries)
    }

    /// Note titles (no folders) in a folder, alphabetical.
    pub fn note_titles(&self, rel: &Path) -> Result<Vec<String>, StoreError> {
        Ok(self
            .list_entries(rel)?
            .into_iter()
            .filter(|e| !e.is_folder())
            .map(|e| e.name)
            .collect())
    }

    /// All notes under a folder, recursively: `(relative title, content)`
    /// pairs with `/`-joined titles relative to the given folder.
    pub fn walk_notes(&self, rel: &Path) -> Result<Vec<(String, String)>, StoreError> {
        let mut notes = Vec::new();
        self.walk_into(rel, "", &mut notes)?;
        Ok(notes)
    }

    fn walk_into(
        &self,
        rel: &Path,
        prefix: &str,
        out: &mut Vec<(String, String)>,
    ) -> Result<(), StoreError> {
        for entry in self.list_entries(rel)? {
            let name = if prefix.is_empty() {
                entry.name.clone()
            } else {
                format!("{}/{}", prefix, entry.name)
            };
            if entry.is_folder() {
                self.walk_into(&rel.join(&entry.name), &name, out)?;
            } else {
                let note = self.read_note(rel, &entry.name)?;
                out.push((name, note.content));
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// The folder a note would land in must already exist.
    fn check_parent(&self, path: &Path, title: &str) -> Result<(), StoreError> {
        match path.parent() {
            Some(parent) if parent.is_dir() => Ok(()),
            _ => Err(StoreError::FolderNotFound(title.to_string())),
        }
    }

    fn write_file(&self, path: &Path, title: &str, content: &str) -> Result<(), StoreError> {
        if let Err(e) = journal::atomic_write(path, content.as_bytes()) {
            journal::log_failed_write(&self.root, title, &e.to_string(), content);
            return Err(StoreError::Io(e));
        }
        Ok(())
    }
}

fn modified_time(path: &Path) -> Option<DateTime<Local>> {
    let meta = fs::metadata(path).ok()?;
    let mtime = meta.modified().ok()?;
    Some(DateTime::<Local>::from(mtime))
}

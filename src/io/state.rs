use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum command-history entries kept in the state file.
pub const HISTORY_LIMIT: usize = 200;

/// Persisted TUI state (written to .state.json in the notes root)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Current folder relative to the root (`""` = root)
    #[serde(default)]
    pub cwd: String,
    /// Note open in the editor pane, if any
    #[serde(default)]
    pub open_note: Option<String>,
    /// Per-session vim override (None = use config default)
    #[serde(default)]
    pub vim_override: Option<bool>,
    /// Command history (oldest first, capped at HISTORY_LIMIT)
    #[serde(default)]
    pub command_history: Vec<String>,
}

/// Read .state.json from the notes root
pub fn read_ui_state(root: &Path) -> Option<UiState> {
    let path = root.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the notes root
pub fn write_ui_state(root: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = root.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = UiState {
            cwd: "work/ideas".into(),
            open_note: Some("todo".into()),
            vim_override: Some(false),
            command_history: vec!["ls".into(), "add x hi".into()],
        };

        write_ui_state(dir.path(), &state).unwrap();
        let loaded = read_ui_state(dir.path()).unwrap();

        assert_eq!(loaded.cwd, "work/ideas");
        assert_eq!(loaded.open_note, Some("todo".into()));
        assert_eq!(loaded.vim_override, Some(false));
        assert_eq!(loaded.command_history, vec!["ls", "add x hi"]);
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".state.json"), "not json {{{").unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }

    #[test]
    fn serde_defaults_on_empty_object() {
        let state: UiState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.cwd, "");
        assert!(state.open_note.is_none());
        assert!(state.vim_override.is_none());
        assert!(state.command_history.is_empty());
    }
}

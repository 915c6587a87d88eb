use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from `.notehub.toml` at the sandbox root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color overrides keyed by theme slot (hex strings like "#1e1e1e").
    /// Known keys: terminal_bg, terminal_fg, editor_bg, editor_fg,
    /// vim_normal_border, vim_insert_border, dim, accent, done, folder.
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Vim key overlay on the editor pane
    #[serde(default = "default_true")]
    pub vim_mode: bool,
    /// Window for the Insert-mode `kj` escape sequence, in milliseconds
    #[serde(default = "default_kj_timeout")]
    pub kj_timeout_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            vim_mode: true,
            kj_timeout_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailConfig {
    /// External command argv; `{title}` in any element is replaced with
    /// the note title. Note content is piped to the command's stdin.
    /// Empty means email is not configured.
    #[serde(default)]
    pub command: Vec<String>,
}

impl EmailConfig {
    pub fn is_configured(&self) -> bool {
        !self.command.is_empty()
    }
}

fn default_true() -> bool {
    true
}

fn default_kj_timeout() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.editor.vim_mode);
        assert_eq!(config.editor.kj_timeout_ms, 500);
        assert!(config.ui.colors.is_empty());
        assert!(!config.email.is_configured());
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            r##"
[editor]
vim_mode = false

[ui.colors]
terminal_bg = "#000000"

[email]
command = ["mail", "-s", "{title}", "me@example.com"]
"##,
        )
        .unwrap();
        assert!(!config.editor.vim_mode);
        assert_eq!(config.editor.kj_timeout_ms, 500);
        assert_eq!(
            config.ui.colors.get("terminal_bg").map(String::as_str),
            Some("#000000")
        );
        assert!(config.email.is_configured());
        assert_eq!(config.email.command[1], "-s");
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Config;

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Config file inside the notes root.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(".notehub.toml")
}

/// Load the config, falling back to defaults when the file is absent.
/// A present-but-malformed file is an error; silently ignoring it
/// would discard the user's colors.
pub fn load_config(root: &Path) -> Result<Config, ConfigError> {
    let path = config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path)?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseError { path, source })
}

/// Write the config back out.
pub fn save_config(root: &Path, config: &Config) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(config)?;
    fs::write(config_path(root), text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert!(config.editor.vim_mode);
    }

    #[test]
    fn test_round_trip() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.editor.vim_mode = false;
        config
            .ui
            .colors
            .insert("terminal_fg".into(), "#00ff00".into());

        save_config(tmp.path(), &config).unwrap();
        let loaded = load_config(tmp.path()).unwrap();
        assert!(!loaded.editor.vim_mode);
        assert_eq!(
            loaded.ui.colors.get("terminal_fg").map(String::as_str),
            Some("#00ff00")
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(config_path(tmp.path()), "not = [valid").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }
}

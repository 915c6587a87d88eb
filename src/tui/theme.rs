use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub terminal_bg: Color,
    pub terminal_fg: Color,
    pub editor_bg: Color,
    pub editor_fg: Color,
    /// Editor border while the vim overlay is in Normal mode
    pub vim_normal_border: Color,
    /// Editor border while the vim overlay is in Insert mode
    pub vim_insert_border: Color,
    pub dim: Color,
    pub accent: Color,
    pub done: Color,
    pub folder: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            terminal_bg: Color::Rgb(0x1E, 0x1E, 0x1E),
            terminal_fg: Color::Rgb(0x00, 0xFF, 0x00),
            editor_bg: Color::Rgb(0x1E, 0x1E, 0x1E),
            editor_fg: Color::Rgb(0xE0, 0xE0, 0xE0),
            vim_normal_border: Color::Rgb(0x21, 0x96, 0xF3),
            vim_insert_border: Color::Rgb(0x4C, 0xAF, 0x50),
            dim: Color::Rgb(0x80, 0x80, 0x80),
            accent: Color::Rgb(0x21, 0x96, 0xF3),
            done: Color::Rgb(0x4C, 0xAF, 0x50),
            folder: Color::Rgb(0x64, 0xB5, 0xF6),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the `[ui.colors]` config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "terminal_bg" => theme.terminal_bg = color,
                    "terminal_fg" => theme.terminal_fg = color,
                    "editor_bg" => theme.editor_bg = color,
                    "editor_fg" => theme.editor_fg = color,
                    "vim_normal_border" => theme.vim_normal_border = color,
                    "vim_insert_border" => theme.vim_insert_border = color,
                    "dim" => theme.dim = color,
                    "accent" => theme.accent = color,
                    "done" => theme.done = color,
                    "folder" => theme.folder = color,
                    _ => {}
                }
            }
        }

        theme
    }
}

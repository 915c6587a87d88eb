use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::shell::COMMANDS;
use crate::tui::app::App;

/// Centered help overlay: TUI keys plus the shell command table.
pub fn render_help(frame: &mut Frame, app: &App) {
    let area = centered(frame.area(), 60, 28);
    frame.render_widget(Clear, area);

    let key_style = Style::default()
        .fg(app.theme.accent)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.editor_fg);

    let mut lines = vec![
        section("Browser", app),
        entry("j/k", "move", key_style, text_style),
        entry("Enter", "open folder or note", key_style, text_style),
        entry("h/Backspace", "up one folder", key_style, text_style),
        entry(":", "command console", key_style, text_style),
        entry("v", "toggle vim mode", key_style, text_style),
        entry("q", "quit", key_style, text_style),
        Line::default(),
        section("Editor", app),
        entry("i a o / Esc or kj", "insert / back to normal", key_style, text_style),
        entry("hjkl w b e 0 ^ $ gg G", "motions", key_style, text_style),
        entry("dd yy p x D u", "edit, yank, paste, undo", key_style, text_style),
        entry("Enter (normal)", "save and close", key_style, text_style),
        entry("Ctrl-S", "save", key_style, text_style),
        Line::default(),
        section("Commands", app),
    ];
    for (name, help) in COMMANDS {
        lines.push(entry(name, help, key_style, text_style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.accent))
        .title(" help ");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(app.theme.terminal_bg)),
        area,
    );
}

fn section(title: &str, app: &App) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(app.theme.folder)
            .add_modifier(Modifier::BOLD),
    ))
}

fn entry(key: &str, text: &str, key_style: Style, text_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<22}", key), key_style),
        Span::styled(text.to_string(), text_style),
    ])
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

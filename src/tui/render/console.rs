use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::util::unicode::{display_width, prefix_width, truncate_to_width};

/// The embedded command console (bottom): scrollback plus a prompt
/// line, styled with the terminal colors from config.
pub fn render_console(frame: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.focus == Focus::Command;
    let border_style = if focused {
        Style::default().fg(app.theme.accent)
    } else {
        Style::default().fg(app.theme.dim)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" console ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let style = Style::default()
        .fg(app.theme.terminal_fg)
        .bg(app.theme.terminal_bg);

    // Tail of the scrollback, leaving the last row for the prompt
    let height = inner.height as usize;
    let tail = height.saturating_sub(1);
    let start = app.console.len().saturating_sub(tail);

    let mut lines: Vec<Line> = app.console[start..]
        .iter()
        .map(|l| Line::from(Span::styled(truncate_to_width(l, inner.width as usize), style)))
        .collect();

    let prompt = app.shell.prompt();
    lines.push(Line::from(Span::styled(
        truncate_to_width(
            &format!("{}{}", prompt, app.command_input),
            inner.width as usize,
        ),
        style,
    )));
    frame.render_widget(Paragraph::new(lines).style(style), inner);

    if focused {
        let col = display_width(&prompt) + prefix_width(&app.command_input, app.command_cursor);
        let x = inner.x + col.min(inner.width as usize - 1) as u16;
        let y = inner.y + (app.console[start..].len()).min(height - 1) as u16;
        frame.set_cursor_position((x, y));
    }
}

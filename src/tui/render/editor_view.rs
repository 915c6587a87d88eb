use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Focus};
use crate::tui::vim::VimMode;
use crate::util::unicode::{prefix_width, truncate_to_width};

/// The editor pane (right): open note buffer with a vim mode indicator.
/// The border color signals the mode (blue normal, green insert).
pub fn render_editor(frame: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.focus == Focus::Edit;

    let (title, border) = match &app.open {
        Some(open) => {
            let dirty = if open.buffer.dirty { "*" } else { "" };
            let mode = if !app.vim_enabled {
                ""
            } else if app.vim.mode == VimMode::Insert {
                " \u{2014} INSERT"
            } else {
                " \u{2014} NORMAL"
            };
            let border = if !focused {
                app.theme.dim
            } else if !app.vim_enabled {
                app.theme.accent
            } else if app.vim.mode == VimMode::Insert {
                app.theme.vim_insert_border
            } else {
                app.theme.vim_normal_border
            };
            (format!(" {}{}{} ", open.title, dirty, mode), border)
        }
        None => (" editor ".to_string(), app.theme.dim),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let Some(open) = &app.open else {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "no note open \u{2014} pick one in the browser or run: edit <title>",
                Style::default().fg(app.theme.dim),
            )),
            inner,
        );
        return;
    };

    // Scroll so the cursor stays in the window
    let height = inner.height as usize;
    let buf = &open.buffer;
    let first = buf.cursor_line.saturating_sub(height.saturating_sub(1));

    let style = Style::default().fg(app.theme.editor_fg).bg(app.theme.editor_bg);
    let lines: Vec<Line> = buf
        .lines
        .iter()
        .skip(first)
        .take(height)
        .map(|l| Line::from(Span::styled(truncate_to_width(l, inner.width as usize), style)))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(style), inner);

    if focused {
        let x = inner.x + prefix_width(buf.current_line(), buf.cursor_col).min(inner.width as usize - 1) as u16;
        let y = inner.y + (buf.cursor_line - first) as u16;
        frame.set_cursor_position((x, y));
    }
}

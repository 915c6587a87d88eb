use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};
use crate::tui::vim::VimMode;
use crate::util::unicode::display_width;

/// One-line status row: focus/mode indicator, transient message, key hints.
pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let mode = match app.focus {
        Focus::Browse => "BROWSE",
        Focus::Command => "COMMAND",
        Focus::Edit => {
            if !app.vim_enabled {
                "EDIT"
            } else if app.vim.mode == VimMode::Insert {
                "INSERT"
            } else {
                "NORMAL"
            }
        }
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .fg(app.theme.terminal_bg)
                .bg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            status.clone(),
            Style::default().fg(app.theme.accent),
        ));
    } else if app.focus == Focus::Browse
        && let Some(modified) = app.selected_entry().and_then(|e| e.modified)
    {
        spans.push(Span::styled(
            format!("modified {}", modified.format("%Y-%m-%d %H:%M")),
            Style::default().fg(app.theme.dim),
        ));
    }

    let hints = "?: help   Tab: focus   q: quit ";
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let pad = (area.width as usize)
        .saturating_sub(used)
        .saturating_sub(display_width(hints));
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(hints, Style::default().fg(app.theme.dim)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

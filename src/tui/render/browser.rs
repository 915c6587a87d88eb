use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::io::store::display_path;
use crate::model::EntryKind;
use crate::tui::app::{App, Focus};
use crate::util::unicode::truncate_to_width;

/// The folder/note browser pane (left)
pub fn render_browser(frame: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.focus == Focus::Browse;
    let border_style = if focused {
        Style::default().fg(app.theme.accent)
    } else {
        Style::default().fg(app.theme.dim)
    };
    let title = format!(" notes {} ", display_path(&app.shell.session.cwd));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    // Keep the cursor visible
    let height = inner.height as usize;
    if app.browse_cursor < app.browse_scroll {
        app.browse_scroll = app.browse_cursor;
    } else if app.browse_cursor >= app.browse_scroll + height {
        app.browse_scroll = app.browse_cursor + 1 - height;
    }

    let mut lines = Vec::new();
    for (idx, entry) in app
        .entries
        .iter()
        .enumerate()
        .skip(app.browse_scroll)
        .take(height)
    {
        let selected = idx == app.browse_cursor;
        let (glyph, style) = match entry.kind {
            EntryKind::Folder => ("\u{25B8} ", Style::default().fg(app.theme.folder)),
            EntryKind::Note { done: true } => (
                "\u{2713} ",
                Style::default()
                    .fg(app.theme.done)
                    .add_modifier(Modifier::CROSSED_OUT),
            ),
            EntryKind::Note { done: false } => ("\u{00B7} ", Style::default().fg(app.theme.editor_fg)),
        };
        let style = if selected && focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        };
        let text = truncate_to_width(
            &format!("{}{}", glyph, entry.display_name()),
            inner.width as usize,
        );
        lines.push(Line::from(Span::styled(text, style)));
    }

    if app.entries.is_empty() {
        lines.push(Line::from(Span::styled(
            "(empty folder)",
            Style::default().fg(app.theme.dim),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

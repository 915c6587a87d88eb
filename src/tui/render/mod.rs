mod browser;
mod console;
mod editor_view;
mod help_overlay;
mod status_row;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::app::App;

/// Console pane height (scrollback plus the prompt row).
const CONSOLE_HEIGHT: u16 = 10;

/// Top-level render: browser and editor side by side, console below,
/// status row at the bottom.
pub fn render(frame: &mut Frame, app: &mut App) {
    let [main, console, status] = Layout::vertical([
        Constraint::Min(5),
        Constraint::Length(CONSOLE_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [browser, editor] =
        Layout::horizontal([Constraint::Length(30), Constraint::Min(20)]).areas(main);

    browser::render_browser(frame, browser, app);
    editor_view::render_editor(frame, editor, app);
    console::render_console(frame, console, app);
    status_row::render_status(frame, status, app);

    if app.show_help {
        help_overlay::render_help(frame, app);
    }
}

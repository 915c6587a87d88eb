use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::cli::handlers::DEFAULT_NOTES_DIR;
use crate::io::config_io;
use crate::io::state::{HISTORY_LIMIT, UiState, read_ui_state, write_ui_state};
use crate::io::store::NoteStore;
use crate::io::watcher::StoreWatcher;
use crate::model::Entry;
use crate::shell::{Outcome, Shell};

use super::editor::EditorBuffer;
use super::input;
use super::render;
use super::theme::Theme;
use super::vim::VimState;

/// Which pane owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Browse,
    Command,
    Edit,
}

/// The note open in the editor pane
pub struct OpenNote {
    /// Root-relative title, so the buffer stays saveable after `cd`
    pub title: String,
    pub buffer: EditorBuffer,
}

/// Main application state
pub struct App {
    pub shell: Shell,
    pub theme: Theme,
    pub focus: Focus,
    pub should_quit: bool,

    /// Entries of the current folder (browser pane)
    pub entries: Vec<Entry>,
    pub browse_cursor: usize,
    pub browse_scroll: usize,

    /// Console scrollback (prompt echoes + command output)
    pub console: Vec<String>,
    pub command_input: String,
    pub command_cursor: usize,
    pub history: Vec<String>,
    pub history_pos: Option<usize>,

    pub open: Option<OpenNote>,
    pub vim: VimState,
    pub vim_enabled: bool,

    pub status: Option<String>,
    pub show_help: bool,
}

impl App {
    pub fn new(shell: Shell) -> Self {
        let theme = Theme::from_config(&shell.config().ui);
        let vim = VimState::new(shell.config().editor.kj_timeout_ms);
        let vim_enabled = shell.config().editor.vim_mode;

        let mut app = App {
            shell,
            theme,
            focus: Focus::Browse,
            should_quit: false,
            entries: Vec::new(),
            browse_cursor: 0,
            browse_scroll: 0,
            console: vec!["Welcome to NoteHub! Type 'help' to see all commands.".to_string()],
            command_input: String::new(),
            command_cursor: 0,
            history: Vec::new(),
            history_pos: None,
            open: None,
            vim,
            vim_enabled,
            status: None,
            show_help: false,
        };
        app.refresh_entries();
        app
    }

    /// Re-read the current folder's entries, keeping the cursor on the
    /// same name when it still exists.
    pub fn refresh_entries(&mut self) {
        let selected = self.selected_entry().map(|e| e.name.clone());
        self.entries = self
            .shell
            .store()
            .list_entries(&self.shell.session.cwd)
            .unwrap_or_default();
        self.browse_cursor = selected
            .and_then(|name| self.entries.iter().position(|e| e.name == name))
            .unwrap_or_else(|| self.browse_cursor.min(self.entries.len().saturating_sub(1)));
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.browse_cursor)
    }

    /// Run a console command exactly as the shell would, echoing the
    /// prompt and folding the outcome into the scrollback.
    pub fn execute_command(&mut self, line: &str) {
        let trimmed = line.trim().to_string();
        if trimmed.is_empty() {
            return;
        }
        self.console.push(format!("{}{}", self.shell.prompt(), trimmed));
        self.push_history(trimmed.clone());

        match self.shell.run_command(&trimmed) {
            Outcome::Text(text) => {
                self.console.extend(text.lines().map(str::to_string));
            }
            Outcome::Clear => self.console.clear(),
            Outcome::Exit => self.should_quit = true,
            Outcome::OpenEditor(title) => self.open_note(&title),
            Outcome::Silent => {}
        }
        self.refresh_entries();
    }

    fn push_history(&mut self, line: String) {
        if self.history.last() != Some(&line) {
            self.history.push(line);
            if self.history.len() > HISTORY_LIMIT {
                self.history.remove(0);
            }
        }
        self.history_pos = None;
    }

    /// Open a note (root-relative title) in the editor pane.
    pub fn open_note(&mut self, title: &str) {
        match self.shell.store().read_note(&PathBuf::new(), title) {
            Ok(note) => {
                self.open = Some(OpenNote {
                    title: title.to_string(),
                    buffer: EditorBuffer::from_content(&note.content),
                });
                self.shell.session.open_note = Some(title.to_string());
                self.vim.reset();
                self.focus = Focus::Edit;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Write the open buffer back to its file.
    pub fn save_open_note(&mut self) {
        let Some(open) = &mut self.open else {
            return;
        };
        match self
            .shell
            .store()
            .save_note(&PathBuf::new(), &open.title, &open.buffer.content())
        {
            Ok(()) => {
                open.buffer.dirty = false;
                self.status = Some(format!("Saved '{}'.", open.title));
            }
            Err(e) => self.status = Some(e.to_string()),
        }
        self.refresh_entries();
    }

    /// Close the editor pane without discarding the buffer state.
    pub fn close_editor(&mut self) {
        self.focus = Focus::Browse;
    }

    pub fn toggle_vim(&mut self) {
        self.vim_enabled = !self.vim_enabled;
        self.vim.reset();
        self.status = Some(if self.vim_enabled {
            "Vim mode on".to_string()
        } else {
            "Vim mode off".to_string()
        });
    }
}

// ---------------------------------------------------------------------------
// UI state persistence
// ---------------------------------------------------------------------------

/// Restore session state from .state.json
pub fn restore_ui_state(app: &mut App) {
    let Some(state) = read_ui_state(app.shell.store().root()) else {
        return;
    };

    if !state.cwd.is_empty()
        && let Ok(rel) = app.shell.store().change_folder(&PathBuf::new(), &state.cwd)
    {
        app.shell.session.cwd = rel;
    }
    if let Some(vim) = state.vim_override {
        app.vim_enabled = vim;
    }
    app.history = state.command_history;
    if let Some(title) = state.open_note {
        app.open_note(&title);
        // Restoring a note shouldn't steal focus from the browser
        app.focus = Focus::Browse;
    }
    app.refresh_entries();
}

/// Save session state to .state.json
pub fn save_ui_state(app: &App) {
    let state = UiState {
        cwd: app
            .shell
            .session
            .cwd
            .to_string_lossy()
            .replace('\\', "/"),
        open_note: app.open.as_ref().map(|o| o.title.clone()),
        vim_override: Some(app.vim_enabled),
        command_history: app.history.clone(),
    };
    let _ = write_ui_state(app.shell.store().root(), &state);
}

// ---------------------------------------------------------------------------
// Entry point & event loop
// ---------------------------------------------------------------------------

/// Run the TUI application
pub fn run(notes_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = PathBuf::from(notes_dir.unwrap_or(DEFAULT_NOTES_DIR));
    let store = NoteStore::open(&root)?;
    let config = config_io::load_config(store.root())?;
    let shell = Shell::new(store, config);

    let mut app = App::new(shell);
    restore_ui_state(&mut app);

    // The watcher is best-effort: without it the browser just refreshes
    // on commands only
    let watcher = StoreWatcher::start(app.shell.store().root()).ok();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&StoreWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        // External changes only refresh the browser, never the editor
        if let Some(w) = watcher
            && !w.poll().is_empty()
        {
            app.refresh_entries();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

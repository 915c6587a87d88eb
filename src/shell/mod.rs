pub mod parse;
pub mod session;

use std::path::PathBuf;

use crate::io::store::{NoteStore, StoreError, display_path};
use crate::model::{Config, TodoState};
use crate::ops::email::{self, EmailError};
use crate::ops::note_ops::{self, CheckError, DoneOutcome, EditMode};
use crate::ops::search;

pub use session::Session;

/// The fixed command table: verb + one-line help, in `help` order.
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Show available commands"),
    ("exit", "Exit the shell"),
    ("ls", "List entries in the current folder: ls [path]"),
    ("pwd", "Show current folder (relative to the notes root)"),
    ("cd", "Change folder: cd <path>"),
    ("add", "Create a note: add <title> [content]"),
    ("edit", "Append to a note: edit <title> <text> [--replace]"),
    ("remove", "Delete a note or folder: remove <title> | remove -d <folder>"),
    ("done", "Mark a note as done: done <title>"),
    ("check", "Toggle a todo checkbox: check <title> <line>"),
    ("show", "Show note content: show <title>"),
    ("list", "List notes in the current folder"),
    ("mkdir", "Create a folder: mkdir <name>"),
    ("search", "Search note lines under the current folder: search <pattern>"),
    ("email", "Send a note through the configured mailer: email <title>"),
    ("clear", "Clear the console"),
];

/// Error type for the command interpreter. Everything here is recovered
/// at the interpreter boundary and shown as a one-line message.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("command not found: {0}")]
    CommandNotFound(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("line number must be an integer, got '{0}'")]
    BadLineNumber(String),
    #[error("invalid search pattern: {0}")]
    BadPattern(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Check(#[from] CheckError),
    #[error(transparent)]
    Email(#[from] EmailError),
}

/// What a successfully dispatched command asks the front-end to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text
    Text(String),
    /// Nothing to print
    Silent,
    /// Clear the console/scrollback
    Clear,
    /// End the session
    Exit,
    /// Open this note (root-relative title) in the editor pane.
    /// Front-ends without an editor report that instead.
    OpenEditor(String),
}

/// The interactive command interpreter: a fixed verb table dispatching
/// onto the note store, with the session cursor threaded through.
pub struct Shell {
    store: NoteStore,
    config: Config,
    pub session: Session,
    user: String,
    host: String,
}

impl Shell {
    pub fn new(store: NoteStore, config: Config) -> Self {
        let user = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "user".to_string());
        let host = std::env::var("HOSTNAME")
            .ok()
            .and_then(|h| h.split('.').next().map(str::to_string))
            .unwrap_or_else(|| "localhost".to_string());
        Shell {
            store,
            config,
            session: Session::new(),
            user,
            host,
        }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bash-look prompt: `user@host:/folder$ `
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$ ",
            self.user,
            self.host,
            display_path(&self.session.cwd)
        )
    }

    /// Run a single raw input line. Errors are folded into printable
    /// text here; nothing a command does is fatal to the session.
    pub fn run_command(&mut self, line: &str) -> Outcome {
        if line.trim().is_empty() {
            return Outcome::Silent;
        }
        let words = parse::split_line(line);
        let (verb, args) = match words.split_first() {
            Some((verb, args)) => (verb.clone(), args.to_vec()),
            None => return Outcome::Silent,
        };
        match self.dispatch(&verb, &args) {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Text(e.to_string()),
        }
    }

    /// Dispatch a parsed verb. Unknown verbs fail without touching any
    /// state.
    pub fn dispatch(&mut self, verb: &str, args: &[String]) -> Result<Outcome, ShellError> {
        match verb {
            "help" => Ok(self.cmd_help()),
            "exit" => Ok(Outcome::Exit),
            "ls" => self.cmd_ls(args),
            "pwd" => Ok(Outcome::Text(display_path(&self.session.cwd))),
            "cd" => self.cmd_cd(args),
            "add" => self.cmd_add(args),
            "edit" => self.cmd_edit(args),
            "remove" => self.cmd_remove(args),
            "done" => self.cmd_done(args),
            "check" => self.cmd_check(args),
            "show" => self.cmd_show(args),
            "list" => self.cmd_list(),
            "mkdir" => self.cmd_mkdir(args),
            "search" => self.cmd_search(args),
            "email" => self.cmd_email(args),
            "clear" => Ok(Outcome::Clear),
            other => Err(ShellError::CommandNotFound(other.to_string())),
        }
    }

    // -----------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------

    fn cmd_help(&self) -> Outcome {
        let lines: Vec<String> = COMMANDS
            .iter()
            .map(|(name, help)| format!("{:<8}- {}", name, help))
            .collect();
        Outcome::Text(lines.join("\n"))
    }

    fn cmd_ls(&self, args: &[String]) -> Result<Outcome, ShellError> {
        let rel = match args.first() {
            Some(target) => self.store.change_folder(&self.session.cwd, target)?,
            None => self.session.cwd.clone(),
        };
        let entries = self.store.list_entries(&rel)?;
        if entries.is_empty() {
            return Ok(Outcome::Silent);
        }
        let lines: Vec<String> = entries.iter().map(|e| e.display_name()).collect();
        Ok(Outcome::Text(lines.join("\n")))
    }

    fn cmd_cd(&mut self, args: &[String]) -> Result<Outcome, ShellError> {
        match args.first().map(String::as_str) {
            None | Some("~") => {
                self.session.cwd = PathBuf::new();
            }
            Some(target) => {
                self.session.cwd = self.store.change_folder(&self.session.cwd, target)?;
            }
        }
        Ok(Outcome::Silent)
    }

    fn cmd_add(&mut self, args: &[String]) -> Result<Outcome, ShellError> {
        let Some(title) = args.first() else {
            return Err(ShellError::Usage("add <title> [content]"));
        };
        let content = args[1..].join(" ");
        note_ops::add_note(&self.store, &self.session.cwd, title, &content)?;
        Ok(Outcome::Text(format!("Note '{}' created.", title)))
    }

    fn cmd_edit(&mut self, args: &[String]) -> Result<Outcome, ShellError> {
        let Some(title) = args.first() else {
            return Err(ShellError::Usage("edit <title> <text> [--replace]"));
        };

        if args.len() == 1 {
            // No text: open the note in the editor pane (TUI front-end)
            if !self.store.note_exists(&self.session.cwd, title) {
                return Err(StoreError::NoteNotFound(title.clone()).into());
            }
            let rel = crate::io::store::resolve_path(&self.session.cwd, title)?;
            let root_relative = rel.to_string_lossy().replace('\\', "/");
            return Ok(Outcome::OpenEditor(root_relative));
        }

        let replace = args[1..].iter().any(|a| a == "--replace");
        let text = args[1..]
            .iter()
            .filter(|a| *a != "--replace")
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        let mode = if replace { EditMode::Replace } else { EditMode::Append };
        note_ops::edit_note(&self.store, &self.session.cwd, title, &text, mode)?;
        let msg = match mode {
            EditMode::Replace => format!("Note '{}' replaced.", title),
            EditMode::Append => format!("Text added to note '{}'.", title),
        };
        Ok(Outcome::Text(msg))
    }

    fn cmd_remove(&mut self, args: &[String]) -> Result<Outcome, ShellError> {
        let Some(first) = args.first() else {
            return Err(ShellError::Usage("remove <title> | remove -d <folder>"));
        };

        if matches!(first.as_str(), "-d" | "--folder" | "--dir") {
            let Some(folder) = args.get(1) else {
                return Err(ShellError::Usage("remove -d <folder>"));
            };
            self.store.remove_folder(&self.session.cwd, folder)?;
            return Ok(Outcome::Text(format!(
                "Folder '{}' and its content deleted.",
                folder
            )));
        }

        self.store.remove_note(&self.session.cwd, first)?;
        Ok(Outcome::Text(format!("Note '{}' deleted.", first)))
    }

    fn cmd_done(&mut self, args: &[String]) -> Result<Outcome, ShellError> {
        let Some(title) = args.first() else {
            return Err(ShellError::Usage("done <title>"));
        };
        let msg = match note_ops::mark_done(&self.store, &self.session.cwd, title)? {
            DoneOutcome::Marked => format!("Note '{}' marked as done.", title),
            DoneOutcome::AlreadyDone => format!("Note '{}' is already done.", title),
        };
        Ok(Outcome::Text(msg))
    }

    fn cmd_check(&mut self, args: &[String]) -> Result<Outcome, ShellError> {
        let (Some(title), Some(line_arg)) = (args.first(), args.get(1)) else {
            return Err(ShellError::Usage("check <title> <line>"));
        };
        let line_no: usize = line_arg
            .parse()
            .map_err(|_| ShellError::BadLineNumber(line_arg.clone()))?;
        let state = note_ops::check_line(&self.store, &self.session.cwd, title, line_no)?;
        let verb = match state {
            TodoState::Checked => "checked",
            TodoState::Open => "unchecked",
        };
        Ok(Outcome::Text(format!(
            "Line {} in '{}' {}.",
            line_no, title, verb
        )))
    }

    fn cmd_show(&self, args: &[String]) -> Result<Outcome, ShellError> {
        let Some(title) = args.first() else {
            return Err(ShellError::Usage("show <title>"));
        };
        let note = self.store.read_note(&self.session.cwd, title)?;
        Ok(Outcome::Text(format!("=== {} ===\n{}", title, note.content)))
    }

    fn cmd_list(&self) -> Result<Outcome, ShellError> {
        let titles = self.store.note_titles(&self.session.cwd)?;
        if titles.is_empty() {
            return Ok(Outcome::Text("No notes in this directory.".to_string()));
        }
        let mut lines = vec!["Notes in this directory:".to_string()];
        lines.extend(titles.iter().map(|t| format!(" - {}", t)));
        Ok(Outcome::Text(lines.join("\n")))
    }

    fn cmd_mkdir(&mut self, args: &[String]) -> Result<Outcome, ShellError> {
        let Some(name) = args.first() else {
            return Err(ShellError::Usage("mkdir <name>"));
        };
        self.store.make_folder(&self.session.cwd, name)?;
        Ok(Outcome::Text(format!("Directory '{}' created.", name)))
    }

    fn cmd_search(&self, args: &[String]) -> Result<Outcome, ShellError> {
        if args.is_empty() {
            return Err(ShellError::Usage("search <pattern>"));
        }
        let input = args.join(" ");
        let pattern = search::build_pattern(&input)
            .ok_or_else(|| ShellError::BadPattern(input.clone()))?;
        let hits = search::search_notes(&self.store, &self.session.cwd, &pattern)?;
        if hits.is_empty() {
            return Ok(Outcome::Text(format!("No matches for '{}'.", input)));
        }
        let lines: Vec<String> = hits
            .iter()
            .map(|h| format!("{}:{}: {}", h.note, h.line, h.text))
            .collect();
        Ok(Outcome::Text(lines.join("\n")))
    }

    fn cmd_email(&self, args: &[String]) -> Result<Outcome, ShellError> {
        let Some(title) = args.first() else {
            return Err(ShellError::Usage("email <title>"));
        };
        let note = self.store.read_note(&self.session.cwd, title)?;
        email::send_note(&self.config.email, title, &note.content)?;
        Ok(Outcome::Text(format!("Note '{}' handed to the mailer.", title)))
    }
}

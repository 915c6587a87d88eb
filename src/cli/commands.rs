use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nh", about = concat!("[>] notehub v", env!("CARGO_PKG_VERSION"), " - your notes are plain text"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different notes directory
    #[arg(short = 'C', long = "notes-dir", global = true)]
    pub notes_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive shell
    Shell,
    /// List folders and notes
    Ls(LsArgs),
    /// List note titles
    List,
    /// Create a note
    Add(AddArgs),
    /// Append to or replace a note's content
    Edit(EditArgs),
    /// Show note content
    Show(ShowArgs),
    /// Delete a note or folder
    Remove(RemoveArgs),
    /// Create a folder
    Mkdir(MkdirArgs),
    /// Toggle a todo checkbox by line number
    Check(CheckArgs),
    /// Mark a note as done
    Done(DoneArgs),
    /// Search note lines by regex
    Search(SearchArgs),
    /// Send a note through the configured mailer
    Email(EmailArgs),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LsArgs {
    /// Folder to list (default: notes root)
    pub path: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Note title (may contain folders, e.g. work/todo)
    pub title: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern (falls back to a literal match if invalid)
    pub pattern: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Note title
    pub title: String,
    /// Initial content (joined with spaces; empty note if omitted)
    pub content: Vec<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Note title
    pub title: String,
    /// Text to append (joined with spaces)
    #[arg(required = true)]
    pub text: Vec<String>,
    /// Replace the whole note instead of appending
    #[arg(long)]
    pub replace: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Note title, or folder name with -d
    pub name: String,
    /// Remove a folder (recursively) instead of a note
    #[arg(short = 'd', long = "dir")]
    pub dir: bool,
}

#[derive(Args)]
pub struct MkdirArgs {
    /// Folder name (intermediate folders are created too)
    pub name: String,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Note title
    pub title: String,
    /// 1-based line number of the todo item
    pub line: usize,
}

#[derive(Args)]
pub struct DoneArgs {
    /// Note title
    pub title: String,
}

#[derive(Args)]
pub struct EmailArgs {
    /// Note title
    pub title: String,
}

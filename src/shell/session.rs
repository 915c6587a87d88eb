use std::path::PathBuf;

/// The session cursor: where one interactive session currently stands.
/// Carried explicitly through the interpreter and the TUI instead of
/// living in globals.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Current folder, relative to the sandbox root (`""` = root)
    pub cwd: PathBuf,
    /// Note open in the editor pane, as a root-relative title, so the
    /// buffer can still be saved after a `cd`
    pub open_note: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn at_root(&self) -> bool {
        self.cwd.as_os_str().is_empty()
    }
}

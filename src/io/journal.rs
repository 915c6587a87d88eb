use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;

/// Self-documenting header written at the top of a new journal.
const FILE_HEADER: &str = "\
<!-- notehub journal — append-only error recovery data
     Note content that could not be written normally lands here.
     Safe to delete if empty or stale. -->

---
";

/// Journal file inside the notes root.
pub fn journal_path(root: &Path) -> PathBuf {
    root.join(".recovery.md")
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append the content of a failed note write to the journal so text is
/// never silently lost. Journal errors are reported on stderr and
/// otherwise swallowed; there is nowhere further to fall back to.
pub fn log_failed_write(root: &Path, target: &str, error: &str, body: &str) {
    if let Err(e) = log_failed_write_inner(root, target, error, body) {
        eprintln!("warning: could not write to journal: {}", e);
    }
}

fn log_failed_write_inner(root: &Path, target: &str, error: &str, body: &str) -> io::Result<()> {
    let path = journal_path(root);
    let needs_header = !path.exists() || std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "## {} — write failed: {}\n\nError: {}\n",
        Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        target,
        error,
    ));
    if !body.is_empty() {
        out.push('\n');
        out.push_str("```text\n");
        out.push_str(body);
        if !body.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```\n");
    }
    out.push('\n');
    out.push_str("---\n");

    file.write_all(out.as_bytes())?;
    Ok(())
}

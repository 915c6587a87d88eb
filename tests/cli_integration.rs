//! Integration tests for the `nh` CLI.
//!
//! Each test creates a temp notes directory, runs `nh` as a subprocess
//! with `-C`, and verifies stdout and/or file contents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Get the path to the built `nh` binary.
fn nh_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("nh");
    path
}

/// Run `nh -C <notes>` with the given args, returning (stdout, stderr, success).
fn run_nh(notes: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(nh_bin())
        .arg("-C")
        .arg(notes)
        .args(args)
        .output()
        .expect("failed to run nh");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `nh` expecting success, return stdout.
fn run_nh_ok(notes: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_nh(notes, args);
    if !success {
        panic!(
            "nh {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn notes_dir() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let notes = tmp.path().join("notes");
    (tmp, notes)
}

// ---------------------------------------------------------------------------
// Note CRUD
// ---------------------------------------------------------------------------

#[test]
fn test_add_then_show() {
    let (_tmp, notes) = notes_dir();
    let out = run_nh_ok(&notes, &["add", "todo", "[ ] Buy milk"]);
    assert_eq!(out, "Note 'todo' created.\n");

    let out = run_nh_ok(&notes, &["show", "todo"]);
    assert_eq!(out, "=== todo ===\n[ ] Buy milk\n");

    // On disk as plain text
    assert_eq!(
        fs::read_to_string(notes.join("todo.txt")).unwrap(),
        "[ ] Buy milk"
    );
}

#[test]
fn test_add_without_content_creates_empty_note() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "scratch"]);
    let out = run_nh_ok(&notes, &["show", "scratch"]);
    assert_eq!(out, "=== scratch ===\n\n");
}

#[test]
fn test_add_duplicate_fails() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "todo"]);
    let (_, stderr, success) = run_nh(&notes, &["add", "todo", "again"]);
    assert!(!success);
    assert!(stderr.contains("already exists"), "stderr: {}", stderr);
}

#[test]
fn test_show_missing_fails() {
    let (_tmp, notes) = notes_dir();
    let (_, stderr, success) = run_nh(&notes, &["show", "ghost"]);
    assert!(!success);
    assert!(stderr.contains("note not found: ghost"), "stderr: {}", stderr);
}

#[test]
fn test_edit_append_and_replace() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "n", "first"]);
    let out = run_nh_ok(&notes, &["edit", "n", "second"]);
    assert_eq!(out, "Text added to note 'n'.\n");
    assert_eq!(fs::read_to_string(notes.join("n.txt")).unwrap(), "first\nsecond");

    run_nh_ok(&notes, &["edit", "n", "fresh", "--replace"]);
    assert_eq!(fs::read_to_string(notes.join("n.txt")).unwrap(), "fresh");
}

#[test]
fn test_remove_note_and_folder() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "n"]);
    run_nh_ok(&notes, &["mkdir", "work"]);
    run_nh_ok(&notes, &["add", "work/inner", "x"]);

    assert_eq!(run_nh_ok(&notes, &["remove", "n"]), "Note 'n' deleted.\n");
    assert_eq!(
        run_nh_ok(&notes, &["remove", "-d", "work"]),
        "Folder 'work' and its content deleted.\n"
    );
    assert!(!notes.join("work").exists());
}

// ---------------------------------------------------------------------------
// Folders
// ---------------------------------------------------------------------------

#[test]
fn test_mkdir_then_nested_note() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["mkdir", "work"]);
    run_nh_ok(&notes, &["add", "work/x", "nested"]);
    let out = run_nh_ok(&notes, &["show", "work/x"]);
    assert_eq!(out, "=== work/x ===\nnested\n");
    assert_eq!(fs::read_to_string(notes.join("work/x.txt")).unwrap(), "nested");
}

#[test]
fn test_ls_marks_folders() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["mkdir", "work"]);
    run_nh_ok(&notes, &["add", "alpha"]);
    let out = run_nh_ok(&notes, &["ls"]);
    assert_eq!(out, "work/\nalpha\n");
}

#[test]
fn test_list_notes_only() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["mkdir", "work"]);
    run_nh_ok(&notes, &["add", "beta"]);
    run_nh_ok(&notes, &["add", "alpha"]);
    let out = run_nh_ok(&notes, &["list"]);
    assert_eq!(out, "Notes in this directory:\n - alpha\n - beta\n");
}

// ---------------------------------------------------------------------------
// Todo checkboxes & done
// ---------------------------------------------------------------------------

#[test]
fn test_check_is_its_own_inverse() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "todo.txt", "[ ] Buy milk"]);

    let out = run_nh_ok(&notes, &["check", "todo.txt", "1"]);
    assert_eq!(out, "Line 1 in 'todo.txt' checked.\n");
    assert_eq!(
        fs::read_to_string(notes.join("todo.txt.txt")).unwrap(),
        "[x] Buy milk"
    );

    let out = run_nh_ok(&notes, &["check", "todo.txt", "1"]);
    assert_eq!(out, "Line 1 in 'todo.txt' unchecked.\n");
    assert_eq!(
        fs::read_to_string(notes.join("todo.txt.txt")).unwrap(),
        "[ ] Buy milk"
    );
}

#[test]
fn test_check_out_of_range_leaves_note_unmodified() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "todo", "[ ] one"]);
    let (_, stderr, success) = run_nh(&notes, &["check", "todo", "9"]);
    assert!(!success);
    assert!(stderr.contains("line 9 out of range (1-1)"), "stderr: {}", stderr);
    assert_eq!(fs::read_to_string(notes.join("todo.txt")).unwrap(), "[ ] one");
}

#[test]
fn test_check_non_todo_line() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "plain", "just text"]);
    let (_, stderr, success) = run_nh(&notes, &["check", "plain", "1"]);
    assert!(!success);
    assert!(stderr.contains("not a todo item"), "stderr: {}", stderr);
}

#[test]
fn test_done_marks_once() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "n", "things"]);
    assert_eq!(run_nh_ok(&notes, &["done", "n"]), "Note 'n' marked as done.\n");
    assert_eq!(
        fs::read_to_string(notes.join("n.txt")).unwrap(),
        "things\n[DONE]\n"
    );
    assert_eq!(run_nh_ok(&notes, &["done", "n"]), "Note 'n' is already done.\n");
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn test_search_across_folders() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["mkdir", "work"]);
    run_nh_ok(&notes, &["add", "top", "Buy MILK"]);
    run_nh_ok(&notes, &["add", "work/plan", "milk run"]);

    let out = run_nh_ok(&notes, &["search", "milk"]);
    assert_eq!(out, "work/plan:1: milk run\ntop:1: Buy MILK\n");
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[test]
fn test_ls_json() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["mkdir", "work"]);
    run_nh_ok(&notes, &["add", "todo", "[ ] x"]);
    run_nh_ok(&notes, &["done", "todo"]);

    let out = run_nh_ok(&notes, &["ls", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "work");
    assert_eq!(entries[0]["kind"], "folder");
    assert_eq!(entries[1]["name"], "todo");
    assert_eq!(entries[1]["done"], true);
}

#[test]
fn test_show_json() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "todo", "[ ] Buy milk"]);
    let out = run_nh_ok(&notes, &["show", "todo", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["title"], "todo");
    assert_eq!(parsed["done"], false);
    assert_eq!(parsed["content"], "[ ] Buy milk");
}

#[test]
fn test_search_json() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "a", "needle here"]);
    let out = run_nh_ok(&notes, &["search", "needle", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["note"], "a");
    assert_eq!(parsed[0]["line"], 1);
}

// ---------------------------------------------------------------------------
// Email bridge
// ---------------------------------------------------------------------------

#[test]
fn test_email_unconfigured_fails() {
    let (_tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "n", "hi"]);
    let (_, stderr, success) = run_nh(&notes, &["email", "n"]);
    assert!(!success);
    assert!(stderr.contains("email is not configured"), "stderr: {}", stderr);
}

#[cfg(unix)]
#[test]
fn test_email_configured_pipes_content() {
    let (tmp, notes) = notes_dir();
    run_nh_ok(&notes, &["add", "n", "hello mail"]);

    // The configured command copies stdin to a capture file
    let capture = tmp.path().join("sent.txt");
    fs::write(
        notes.join(".notehub.toml"),
        format!(
            "[email]\ncommand = [\"sh\", \"-c\", \"cat > {}\"]\n",
            capture.display()
        ),
    )
    .unwrap();

    let out = run_nh_ok(&notes, &["email", "n"]);
    assert_eq!(out, "Note 'n' handed to the mailer.\n");
    assert_eq!(fs::read_to_string(&capture).unwrap(), "hello mail");
}

// ---------------------------------------------------------------------------
// Interactive shell
// ---------------------------------------------------------------------------

#[test]
fn test_shell_session_over_stdin() {
    let (_tmp, notes) = notes_dir();
    let mut child = Command::new(nh_bin())
        .arg("-C")
        .arg(&notes)
        .arg("shell")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn nh shell");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b"mkdir work\ncd work\nadd x nested note\nshow x\nbogus\nexit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Directory 'work' created."), "stdout: {}", stdout);
    assert!(stdout.contains(":/work$"), "stdout: {}", stdout);
    assert!(stdout.contains("=== x ===\nnested note"), "stdout: {}", stdout);
    assert!(stdout.contains("command not found: bogus"), "stdout: {}", stdout);
    assert!(stdout.contains("Bye."), "stdout: {}", stdout);

    // The note landed in the folder, not the root
    assert!(notes.join("work/x.txt").exists());
    assert!(!notes.join("x.txt").exists());
}

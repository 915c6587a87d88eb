use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::store::NoteStore;
use crate::ops::search;
use crate::shell::{Outcome, Shell};

/// Default notes directory when -C/--notes-dir is not given.
pub const DEFAULT_NOTES_DIR: &str = "notes";

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let root = PathBuf::from(cli.notes_dir.as_deref().unwrap_or(DEFAULT_NOTES_DIR));
    let mut shell = open_shell(&root)?;

    match cli.command {
        // No subcommand → TUI, handled in main.rs
        None => Ok(()),
        Some(cmd) => match cmd {
            Commands::Shell => run_interactive(&mut shell),

            // Read commands
            Commands::Ls(args) => cmd_ls(&mut shell, args, json),
            Commands::List => cmd_list(&mut shell, json),
            Commands::Show(args) => cmd_show(&mut shell, args, json),
            Commands::Search(args) => cmd_search(&mut shell, args, json),

            // Write commands
            Commands::Add(args) => {
                let mut argv = vec![args.title];
                argv.extend(args.content);
                run_verb(&mut shell, "add", &argv)
            }
            Commands::Edit(args) => {
                let mut argv = vec![args.title];
                argv.extend(args.text);
                if args.replace {
                    argv.push("--replace".to_string());
                }
                run_verb(&mut shell, "edit", &argv)
            }
            Commands::Remove(args) => {
                let argv = if args.dir {
                    vec!["-d".to_string(), args.name]
                } else {
                    vec![args.name]
                };
                run_verb(&mut shell, "remove", &argv)
            }
            Commands::Mkdir(args) => run_verb(&mut shell, "mkdir", &[args.name]),
            Commands::Check(args) => {
                run_verb(&mut shell, "check", &[args.title, args.line.to_string()])
            }
            Commands::Done(args) => run_verb(&mut shell, "done", &[args.title]),
            Commands::Email(args) => run_verb(&mut shell, "email", &[args.title]),
        },
    }
}

fn open_shell(root: &Path) -> Result<Shell, Box<dyn std::error::Error>> {
    let store = NoteStore::open(root)?;
    let config = config_io::load_config(store.root())?;
    Ok(Shell::new(store, config))
}

/// Run one shell verb and print its outcome; errors bubble to main for
/// a nonzero exit.
fn run_verb(
    shell: &mut Shell,
    verb: &str,
    args: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = shell.dispatch(verb, args)?;
    print_outcome(outcome);
    Ok(())
}

fn print_outcome(outcome: Outcome) {
    match outcome {
        Outcome::Text(text) if !text.is_empty() => println!("{}", text),
        Outcome::OpenEditor(title) => {
            println!("'{}' opens in the editor; run nh with no arguments.", title)
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Read commands (with --json)
// ---------------------------------------------------------------------------

fn cmd_ls(shell: &mut Shell, args: LsArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let rel = match &args.path {
            Some(target) => shell.store().change_folder(&shell.session.cwd, target)?,
            None => shell.session.cwd.clone(),
        };
        let entries = shell.store().list_entries(&rel)?;
        let out: Vec<EntryJson> = entries.iter().map(entry_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    let argv: Vec<String> = args.path.into_iter().collect();
    run_verb(shell, "ls", &argv)
}

fn cmd_list(shell: &mut Shell, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let titles = shell.store().note_titles(&shell.session.cwd)?;
        println!("{}", serde_json::to_string_pretty(&titles)?);
        return Ok(());
    }
    run_verb(shell, "list", &[])
}

fn cmd_show(
    shell: &mut Shell,
    args: ShowArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let note = shell.store().read_note(&shell.session.cwd, &args.title)?;
        println!("{}", serde_json::to_string_pretty(&note_to_json(&note))?);
        return Ok(());
    }
    run_verb(shell, "show", &[args.title])
}

fn cmd_search(
    shell: &mut Shell,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let pattern = search::build_pattern(&args.pattern)
            .ok_or_else(|| format!("invalid search pattern: {}", args.pattern))?;
        let hits = search::search_notes(shell.store(), &shell.session.cwd, &pattern)?;
        let out: Vec<SearchHitJson> = hits.iter().map(hit_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    run_verb(shell, "search", &[args.pattern])
}

// ---------------------------------------------------------------------------
// Interactive shell
// ---------------------------------------------------------------------------

/// Line-based interactive loop over stdin, bash-look prompt. The TUI
/// offers the same commands with an editor pane on top.
fn run_interactive(shell: &mut Shell) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "{}", shell.prompt())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }

        match shell.run_command(&line) {
            Outcome::Exit => {
                println!("Bye.");
                break;
            }
            Outcome::Clear => {
                print!("\x1bc");
                stdout.flush()?;
            }
            outcome => print_outcome(outcome),
        }
    }
    Ok(())
}

use clap::Parser;
use notehub::cli::commands::Cli;
use notehub::cli::handlers;

fn main() {
    let cli = Cli::parse();
    let notes_dir = cli.notes_dir.clone();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            if let Err(e) = notehub::tui::run(notes_dir.as_deref()) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

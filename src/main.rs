use std::io::{self, Write};

use chess_referee::BoardDisplay;
use chess_referee::terminal::{self, Session, TerminalDisplay};
use clap::Parser;
use env_logger::Env;

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "CHESS_REFEREE_LOG";

#[derive(Parser)]
#[command(name = "chess-referee", version, about = "Play chess against yourself in the terminal")]
struct Cli {
    /// Play this click script (e.g. "e2e4 e7e5") and print the final board
    #[arg(long)]
    script: Option<String>,

    /// Draw pieces as letters instead of Unicode glyphs
    #[arg(long)]
    ascii: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "warn")).init();

    let cli = Cli::parse();
    let display = if cli.ascii {
        TerminalDisplay::ascii()
    } else {
        TerminalDisplay::new()
    };

    match cli.script {
        Some(script) => run_script(display, &script),
        None => terminal::run_interactive_terminal(display),
    }
}

fn run_script<D: BoardDisplay>(display: D, script: &str) {
    let mut session = Session::new(display);
    match session.play_script(script) {
        Ok(lines) => {
            if let Err(e) = write_steps(&mut io::stdout(), &lines) {
                log::error!("failed to print script steps: {e}");
            }
        }
        Err(e) => {
            eprintln!("Invalid script: {e}");
            std::process::exit(2);
        }
    }
    if let Err(e) = session.render() {
        eprintln!("Failed to render board: {e}");
        std::process::exit(1);
    }
}

/// One line per script step.
fn write_steps(w: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(w, "{line}")?;
    }
    Ok(())
}

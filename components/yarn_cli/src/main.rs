//! Yarn dialogue player
//!
//! Entry point for `yarn-runner`. Parses CLI arguments, sets up logging
//! and hands the started session to the interactive loop.

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;
use yarn_cli::{repl, Cli, CliError, Player};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.trace));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = Player::from_cli(&cli)
        .start()
        .and_then(|mut runner| repl::run_repl(&mut runner));

    match result {
        Ok(()) => {}
        Err(CliError::Load(e)) => {
            eprintln!("Error: could not load story: {}", e);
            std::process::exit(1);
        }
        Err(CliError::Dialogue(e)) => {
            eprintln!("Dialogue error ({}): {}", e.kind(), e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

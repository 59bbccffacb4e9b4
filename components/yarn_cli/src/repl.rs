//! Interactive player loop
//!
//! Prints buffered lines, lists the current options and reads the
//! player's choice. Input starting with `.` is a REPL command.

use crate::error::{CliError, CliResult};
use crate::player::save_state;
use interpreter::DialogueRunner;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};
use std::path::Path;

/// Result of a REPL dot-command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    /// Keep reading input
    Continue,
    /// Leave the player
    Exit,
}

/// Run the interactive player until the dialogue ends or the user quits
///
/// # Arguments
/// * `runner` - A started dialogue session
pub fn run_repl(runner: &mut DialogueRunner) -> CliResult<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| CliError::Repl(format!("Failed to initialize editor: {}", e)))?;
    let mut stdout = io::stdout();

    loop {
        render_turn(runner, &mut stdout)?;
        if runner.is_finished() {
            break;
        }
        if runner.choices().is_empty() {
            println!("(the dialogue paused without offering any options)");
            break;
        }

        match editor.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);

                if trimmed.starts_with('.') {
                    if handle_repl_command(trimmed, runner, &mut stdout)? == ReplAction::Exit {
                        break;
                    }
                    continue;
                }

                match parse_choice(trimmed, runner.choices().len()) {
                    Ok(index) => runner.choose(index)?,
                    Err(message) => eprintln!("{}", message),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Press Ctrl-D or type .exit to quit");
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                return Err(CliError::Repl(format!("Readline error: {}", err)));
            }
        }
    }

    Ok(())
}

/// Drain buffered lines and list the current options
pub fn render_turn(runner: &mut DialogueRunner, out: &mut impl Write) -> io::Result<()> {
    for line in runner.get_lines() {
        writeln!(out, "{}", line)?;
    }
    if !runner.is_finished() {
        for option in runner.choices() {
            writeln!(out, "  {}. {}", option.index + 1, option.text)?;
        }
    }
    out.flush()
}

/// Turn a 1-based menu number into an option index
pub fn parse_choice(input: &str, available: usize) -> Result<usize, String> {
    let number: usize = input
        .parse()
        .map_err(|_| format!("Enter an option number between 1 and {}", available))?;
    if number == 0 || number > available {
        return Err(format!("There is no option {}", number));
    }
    Ok(number - 1)
}

/// Handle special REPL commands
pub fn handle_repl_command(
    command: &str,
    runner: &DialogueRunner,
    out: &mut impl Write,
) -> CliResult<ReplAction> {
    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };

    match name {
        ".help" => {
            writeln!(out, "REPL Commands:")?;
            writeln!(out, "  <number>      - Choose an option")?;
            writeln!(out, "  .help         - Show this help message")?;
            writeln!(out, "  .state        - Print the execution state as JSON")?;
            writeln!(out, "  .save <path>  - Save the execution state to a file")?;
            writeln!(out, "  .exit         - Exit the player")?;
        }
        ".state" => {
            writeln!(out, "{}", runner.export_state().to_json()?)?;
        }
        ".save" => {
            if argument.is_empty() {
                writeln!(out, "Usage: .save <path>")?;
            } else {
                save_state(runner, Path::new(argument))?;
                writeln!(out, "State saved to {}", argument)?;
            }
        }
        ".exit" => return Ok(ReplAction::Exit),
        _ => {
            writeln!(out, "Unknown command: {}", command)?;
            writeln!(out, "Type .help for available commands")?;
        }
    }
    Ok(ReplAction::Continue)
}

//! Line-oriented shell over the expense store.
//!
//! Interactive sessions run through rustyline; setting the script-mode
//! environment variable switches to reading commands from stdin, one per
//! line, which keeps the binary testable without a terminal.

pub mod commands;
pub mod forms;
pub mod output;
pub mod table;

use std::io::{self, BufRead};

use rustyline::{error::ReadlineError, DefaultEditor};
use thiserror::Error;

use crate::errors::ExpenseError;

pub use commands::ShellContext;

/// Selects script mode when set.
pub const SCRIPT_ENV: &str = "EXPENSE_CORE_CLI_SCRIPT";

const PROMPT: &str = "expense> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("Invalid input: {0}")]
    Input(String),
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => output::error(err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(ExpenseError::from)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match handle_line(context, trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => output::error(err),
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    let tokens = shell_words::split(line).map_err(|err| CliError::Input(err.to_string()))?;
    let Some((command, args)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    commands::dispatch(context, command, args)
}

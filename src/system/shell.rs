// src/system/shell.rs

use crate::{
    cli::dispatcher::{self, Flow},
    constants::USER_ENV_VARS,
    core::{
        line_editor::{EditorError, LineEditor},
        tokenizer,
    },
    system::terminal::{self, TerminalError},
};
use colored::Colorize;
use std::{
    env,
    io::{self, Write},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Terminal(#[from] TerminalError),
    #[error("Could not write the prompt: {0}")]
    Prompt(#[source] io::Error),
}

/// Runs the interactive read-tokenize-dispatch loop until `exit`.
///
/// Returns the status the process should exit with. An error means the input
/// channel is unusable; the terminal has already been restored by then.
pub fn run_interactive() -> Result<i32, ShellError> {
    terminal::install_restore_on_signal()?;

    loop {
        print_prompt()?;
        let line = read_command_line()?;
        if let Flow::Exit(code) = run_line(&line) {
            return Ok(code);
        }
    }
}

/// Tokenizes and dispatches a single command line.
pub fn run_line(line: &str) -> Flow {
    let argv = tokenizer::split(line);
    log::debug!("Tokenized line into {:?}", argv);
    dispatcher::dispatch(&argv)
}

/// Reads one line with stdin in raw mode. The mode is restored when this
/// function returns, whether it succeeds or not.
fn read_command_line() -> Result<String, ShellError> {
    let _raw_mode = terminal::enable_raw_mode()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut editor = LineEditor::new(stdin.lock(), stdout.lock());
    Ok(editor.read_line()?)
}

fn print_prompt() -> Result<(), ShellError> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render_prompt())
        .and_then(|_| stdout.flush())
        .map_err(ShellError::Prompt)
}

/// Builds the colored `<user>:<cwd>$ ` prompt for the current process state.
pub fn render_prompt() -> String {
    let user = username_from(|key| env::var(key).ok());
    let cwd = env::current_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|e| {
            log::debug!("Could not read the working directory: {}", e);
            "?".to_string()
        });
    format!("{}:{}$ ", user.green().bold(), cwd.blue().bold())
}

/// Picks the first non-empty user variable, falling back to a placeholder.
fn username_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    USER_ENV_VARS
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| t!("prompt.unknown_user").to_string())
}

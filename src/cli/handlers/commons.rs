// src/cli/handlers/commons.rs

// Errors and reporting shared by the built-in handlers and the dispatcher.

use colored::Colorize;
use std::{fmt::Display, io};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuiltinError {
    #[error("{command}: missing directory operand")]
    MissingOperand { command: &'static str },
    #[error("{command}: expected {expected} argument, got {found}")]
    TooManyArguments {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("cd: {path}: {source}")]
    ChangeDirectory {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl BuiltinError {
    /// Usage errors are the user's mistake; everything else comes from the platform.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::MissingOperand { .. } | Self::TooManyArguments { .. }
        )
    }
}

/// Prints a recoverable error to stderr with the red `Error` label.
pub fn report_error(error: &dyn Display) {
    eprintln!("{}: {}", t!("error.label").red().bold(), error);
}

/// Prints the error that ends the session.
pub fn report_fatal(error: &dyn Display) {
    eprintln!(
        "\n{}: {}",
        t!("error.label").red().bold(),
        format_args!(t!("shell.error.fatal"), error = error)
    );
}

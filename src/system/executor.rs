// src/system/executor.rs

use crate::core::tokenizer::ArgumentVector;
use nix::errno::Errno;
use nix::sys::signal::Signal;
use std::fmt;
use std::io::{self, Write};
use std::os::unix::process::ExitStatusExt;
use std::process::{Command as StdCommand, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Could not create a process for '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while waiting for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// How a spawned command ended.
///
/// None of these is an error from the shell's point of view: a child that
/// fails, is killed, or cannot even load its program has still been created
/// and reaped.
#[derive(Debug)]
pub enum ChildOutcome {
    /// The child exited normally with this code.
    Exited(i32),
    /// The child was terminated by this signal number.
    Signaled(i32),
    /// The child could not replace its image with the requested program.
    ExecFailed(io::Error),
    /// A wait status that is neither an exit nor a signal termination,
    /// kept raw.
    Unrecognized(i32),
}

impl ChildOutcome {
    fn from_status(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => Self::Exited(code),
            (None, Some(signal)) => Self::Signaled(signal),
            // Only stopped/continued statuses carry neither, and `wait`
            // does not ask for those.
            (None, None) => {
                log::warn!("Unexpected wait status {:#x}", status.into_raw());
                Self::Unrecognized(status.into_raw())
            }
        }
    }
}

impl fmt::Display for ChildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exited with code {}", code),
            Self::Signaled(signal) => match Signal::try_from(*signal) {
                Ok(sig) => write!(f, "terminated by {}", sig),
                Err(_) => write!(f, "terminated by signal {}", signal),
            },
            Self::ExecFailed(reason) => write!(f, "could not execute: {}", reason),
            Self::Unrecognized(raw) => write!(f, "ended with raw wait status {:#x}", raw),
        }
    }
}

/// Runs `argv` as a child process and blocks until it terminates.
///
/// The program is resolved through `PATH` and receives the argument vector
/// verbatim. Its stdin is the null device so it can never consume keystrokes
/// meant for the shell; stdout and stderr are shared with the shell.
///
/// Only a failure to create the process at all is returned as an error.
/// Whatever the child does afterwards, including failing to load its program,
/// is reported through the returned [`ChildOutcome`].
pub fn execute(argv: &ArgumentVector) -> Result<ChildOutcome, ExecutionError> {
    let (program, args) = argv
        .as_slice()
        .split_first()
        .ok_or(ExecutionError::EmptyCommand)?;

    // Anything still buffered must reach the terminal before the child writes.
    if let Err(e) = io::stdout().flush() {
        log::debug!("Could not flush stdout before running '{}': {}", program, e);
    }

    let spawned = StdCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) if is_process_creation_failure(&e) => {
            return Err(ExecutionError::Spawn {
                program: program.clone(),
                source: e,
            });
        }
        Err(e) => {
            // The child was created but never became `program`; it has
            // already been reaped.
            eprintln!(
                "{}",
                format_args!(t!("exec.error.not_executed"), program = program, reason = e)
            );
            log::debug!("exec of '{}' failed: {}", program, e);
            return Ok(ChildOutcome::ExecFailed(e));
        }
    };

    log::debug!("Spawned '{}' (PID: {})", program, child.id());

    // `wait` only returns on exit or signal termination; stop notifications
    // are not requested and never end the wait.
    let status = child.wait().map_err(|e| ExecutionError::Wait {
        program: program.clone(),
        source: e,
    })?;

    let outcome = ChildOutcome::from_status(status);
    log::debug!("'{}' {}", program, outcome);
    Ok(outcome)
}

/// Distinguishes "no process could be created" (fork-level resource
/// exhaustion) from "the process could not load the program".
fn is_process_creation_failure(err: &io::Error) -> bool {
    matches!(
        err.raw_os_error().map(Errno::from_raw),
        Some(Errno::EAGAIN | Errno::ENOMEM)
    )
}

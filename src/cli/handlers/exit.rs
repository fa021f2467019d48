// src/cli/handlers/exit.rs

use crate::cli::{dispatcher::Flow, handlers::commons::BuiltinError};

/// Ends the session with status 0. Arguments are ignored.
pub fn handle(args: &[String]) -> Result<Flow, BuiltinError> {
    if !args.is_empty() {
        log::debug!("exit: ignoring arguments {:?}", args);
    }
    Ok(Flow::Exit(0))
}

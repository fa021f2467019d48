//! # System Interaction Layer
//!
//! The boundary between the shell's logic and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: spawns external programs with an isolated stdin and
//!   blocks until they terminate.
//! - **`terminal`**: switches stdin in and out of raw mode as a scoped
//!   resource, and restores it when a termination signal arrives mid-edit.
//! - **`shell`**: the interactive session: prompt, line reading, dispatch.

pub mod executor;
pub mod shell;
pub mod terminal;

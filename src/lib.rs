//! `rawsh`: an interactive command shell with a raw-mode line editor.
//!
//! The crate is split the same way the shell is layered at runtime:
//! [`core`] holds the pure editing and tokenizing logic, [`system`] is the
//! boundary with the terminal and the process platform, and [`cli`] wires
//! built-ins and command-line flags together.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod system;

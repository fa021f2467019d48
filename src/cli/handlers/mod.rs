// src/cli/handlers/mod.rs

// One module per built-in command, plus what they share.

pub mod cd;
pub mod commons;
pub mod exit;

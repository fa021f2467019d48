//! # Core Logic
//!
//! Everything in here is independent of the real terminal and of process
//! creation, which keeps it testable with in-memory byte streams.
//!
//! - **`edit_buffer`**: the line under construction and its cursor.
//! - **`keys`**: a byte-fed decoder turning raw terminal input into keys.
//! - **`line_editor`**: drives the buffer from decoded keys and renders the
//!   incremental terminal updates.
//! - **`tokenizer`**: splits a finished line into an argument vector.

pub mod edit_buffer;
pub mod keys;
pub mod line_editor;
pub mod tokenizer;

// src/constants.rs

/// Maximum number of characters the line editor accepts for a single line.
pub const MAX_LINE_LENGTH: usize = 1024;

/// Characters that separate arguments on a command line.
pub const ARGUMENT_DELIMITERS: [char; 3] = [' ', '\t', '\n'];

/// Environment variables consulted, in order, for the prompt's user name.
pub const USER_ENV_VARS: [&str; 2] = ["USER", "LOGNAME"];

// --- Input bytes ---

/// Starts an escape sequence (arrow keys and friends).
pub const KEY_ESCAPE: u8 = 0x1b;
/// DEL, sent by the Backspace key on most terminals.
pub const KEY_BACKSPACE: u8 = 0x7f;
/// Ctrl-H, sent as backspace by some terminals.
pub const KEY_CTRL_H: u8 = 0x08;
/// Enter.
pub const KEY_NEWLINE: u8 = b'\n';
/// Enter, as sent when the terminal does not translate CR.
pub const KEY_CARRIAGE_RETURN: u8 = b'\r';

// --- Output sequences (ANSI/VT100) ---

/// Moves the cursor one column left.
pub const CURSOR_LEFT: &str = "\x1b[D";
/// Moves the cursor one column right.
pub const CURSOR_RIGHT: &str = "\x1b[C";
/// Erases from the cursor to the end of the line.
pub const CLEAR_TO_END_OF_LINE: &str = "\x1b[K";
/// Audible alert, used when a line is full.
pub const BELL: &str = "\x07";

// --- Exit codes ---

/// Status used when the input channel becomes unusable.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Added to a signal number to form the status of a process ended by it.
pub const SIGNAL_EXIT_BASE: i32 = 128;

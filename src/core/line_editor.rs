// src/core/line_editor.rs

use crate::{
    constants::{BELL, CLEAR_TO_END_OF_LINE, CURSOR_LEFT, CURSOR_RIGHT, MAX_LINE_LENGTH},
    core::{
        edit_buffer::EditBuffer,
        keys::{Key, KeyDecoder},
    },
};
use std::io::{self, ErrorKind, Read, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("end of input reached")]
    EndOfInput,
    #[error("failed to read from the terminal: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write to the terminal: {0}")]
    Write(#[source] io::Error),
}

/// Reads one line of input a byte at a time, applying in-place edits and
/// echoing only what changed.
///
/// The editor never touches terminal modes itself: the caller is expected to
/// have switched the input into non-canonical, no-echo mode (see
/// [`crate::system::terminal`]). Being generic over the streams lets tests
/// drive it with in-memory buffers.
#[derive(Debug)]
pub struct LineEditor<R, W> {
    input: R,
    output: W,
    max_length: usize,
}

impl<R: Read, W: Write> LineEditor<R, W> {
    /// Creates an editor reading keystrokes from `input` and echoing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            max_length: MAX_LINE_LENGTH,
        }
    }

    /// Overrides the maximum number of characters accepted per line.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// The output stream, mostly useful to inspect what was rendered.
    pub fn writer(&self) -> &W {
        &self.output
    }

    /// Blocks until Enter is pressed and returns the finished line, without
    /// the terminating newline.
    pub fn read_line(&mut self) -> Result<String, EditorError> {
        let mut buffer = EditBuffer::new(self.max_length);
        let mut decoder = KeyDecoder::new();

        loop {
            let byte = self.next_byte()?;
            let Some(key) = decoder.feed(byte) else {
                continue;
            };

            let frame = match key {
                Key::Enter => {
                    self.emit("\n")?;
                    return Ok(buffer.into_line());
                }
                Key::Char(c) => render_insert(&mut buffer, c),
                Key::Backspace => render_backspace(&mut buffer),
                Key::Left => render_move(buffer.move_left(), CURSOR_LEFT),
                Key::Right => render_move(buffer.move_right(), CURSOR_RIGHT),
            };

            if !frame.is_empty() {
                self.emit(&frame)?;
            }
        }
    }

    fn next_byte(&mut self) -> Result<u8, EditorError> {
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Err(EditorError::EndOfInput),
                Ok(_) => {
                    let [b] = byte;
                    return Ok(b);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(EditorError::Read(e)),
            }
        }
    }

    fn emit(&mut self, frame: &str) -> Result<(), EditorError> {
        self.output
            .write_all(frame.as_bytes())
            .and_then(|_| self.output.flush())
            .map_err(EditorError::Write)
    }
}

/// Inserts `c` and returns the terminal update: clear the rest of the line,
/// redraw from the new character onwards, then walk back to just after it.
fn render_insert(buffer: &mut EditBuffer, c: char) -> String {
    if !buffer.insert(c) {
        log::debug!("Line is full ({} chars); refusing '{}'", buffer.len(), c);
        return BELL.to_string();
    }
    let mut frame = String::from(CLEAR_TO_END_OF_LINE);
    frame.push_str(&buffer.tail_from(buffer.cursor() - 1));
    frame.push_str(&cursor_back(buffer.chars_after_cursor()));
    frame
}

fn render_backspace(buffer: &mut EditBuffer) -> String {
    if !buffer.backspace() {
        return String::new();
    }
    let mut frame = String::from(CURSOR_LEFT);
    frame.push_str(CLEAR_TO_END_OF_LINE);
    frame.push_str(&buffer.tail_from(buffer.cursor()));
    frame.push_str(&cursor_back(buffer.chars_after_cursor()));
    frame
}

fn render_move(moved: bool, sequence: &str) -> String {
    if moved {
        sequence.to_string()
    } else {
        String::new()
    }
}

/// Sequence moving the terminal cursor `n` columns to the left.
fn cursor_back(n: usize) -> String {
    match n {
        0 => String::new(),
        1 => CURSOR_LEFT.to_string(),
        n => format!("\x1b[{}D", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn editor(input: &[u8]) -> LineEditor<Cursor<Vec<u8>>, Vec<u8>> {
        LineEditor::new(Cursor::new(input.to_vec()), Vec::new())
    }

    fn rendered(editor: &LineEditor<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(editor.writer().clone()).unwrap()
    }

    #[test]
    fn test_plain_line_is_returned_without_newline() {
        let mut editor = editor(b"ls -la\n");
        assert_eq!(editor.read_line().unwrap(), "ls -la");
        assert!(rendered(&editor).ends_with('\n'));
    }

    #[test]
    fn test_empty_line() {
        let mut editor = editor(b"\n");
        assert_eq!(editor.read_line().unwrap(), "");
        assert_eq!(rendered(&editor), "\n");
    }

    #[test]
    fn test_insert_after_moving_left() {
        // Type "ac", move left once, type "b".
        let mut editor = editor(b"ac\x1b[Db\n");
        assert_eq!(editor.read_line().unwrap(), "abc");
    }

    #[test]
    fn test_backspace_in_the_middle() {
        let mut editor = editor(b"abcd\x1b[D\x1b[D\x7f\n");
        assert_eq!(editor.read_line().unwrap(), "acd");
    }

    #[test]
    fn test_backspace_on_empty_line_renders_nothing() {
        let mut editor = editor(b"\x7f\x7f\n");
        assert_eq!(editor.read_line().unwrap(), "");
        assert_eq!(rendered(&editor), "\n");
    }

    #[test]
    fn test_arrows_are_clamped_at_both_ends() {
        let mut editor = editor(b"x\x1b[C\x1b[D\x1b[D\x1b[Cy\n");
        assert_eq!(editor.read_line().unwrap(), "xy");
        // Right at the end and the second Left produce no output.
        assert_eq!(rendered(&editor), "\x1b[Kx\x1b[D\x1b[C\x1b[Ky\n");
    }

    #[test]
    fn test_history_keys_do_not_touch_the_buffer() {
        let mut editor = editor(b"echo\x1b[A\x1b[B hi\n");
        assert_eq!(editor.read_line().unwrap(), "echo hi");
    }

    #[test]
    fn test_escape_before_arrow_never_reaches_the_line() {
        let mut editor = editor(b"ab\x1b\x1b[Dc\n");
        assert_eq!(editor.read_line().unwrap(), "acb");
    }

    #[test]
    fn test_insert_redraws_only_the_suffix() {
        let mut editor = editor(b"abc\x1b[D\x1b[DX\n");
        editor.read_line().unwrap();
        let output = rendered(&editor);
        // Inserting X before "bc": clear, write "Xbc", step back two columns.
        assert!(output.contains("\x1b[KXbc\x1b[2D"), "output was {:?}", output);
        assert!(!output.contains("aXbc"));
    }

    #[test]
    fn test_backspace_redraws_only_the_suffix() {
        let mut editor = editor(b"abc\x1b[D\x7f\n");
        assert_eq!(editor.read_line().unwrap(), "ac");
        let output = rendered(&editor);
        assert!(output.contains("\x1b[D\x1b[Kc\x1b[D"), "output was {:?}", output);
    }

    #[test]
    fn test_full_line_rings_the_bell() {
        let mut editor = editor(b"abcd\n").with_max_length(3);
        assert_eq!(editor.read_line().unwrap(), "abc");
        assert!(rendered(&editor).contains(BELL));
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut editor = editor(b"unfinished");
        assert!(matches!(editor.read_line(), Err(EditorError::EndOfInput)));
    }

    #[test]
    fn test_consecutive_lines_share_the_stream() {
        let mut editor = editor(b"cd /tmp\nexit\n");
        assert_eq!(editor.read_line().unwrap(), "cd /tmp");
        assert_eq!(editor.read_line().unwrap(), "exit");
    }
}

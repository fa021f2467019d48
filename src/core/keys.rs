// src/core/keys.rs

use crate::constants::{
    KEY_BACKSPACE, KEY_CARRIAGE_RETURN, KEY_CTRL_H, KEY_ESCAPE, KEY_NEWLINE,
};

/// A keystroke the line editor knows how to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character to insert at the cursor.
    Char(char),
    /// Finishes the line.
    Enter,
    /// Deletes the character before the cursor.
    Backspace,
    /// Moves the cursor one column left.
    Left,
    /// Moves the cursor one column right.
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Ground,
    /// An ESC byte was read.
    Escape,
    /// Inside `ESC [`. `plain` stays true while no parameter or
    /// intermediate byte has been seen.
    Csi { plain: bool },
    /// Inside `ESC O` (application cursor keys).
    Ss3,
    /// Collecting the continuation bytes of a multibyte UTF-8 character.
    Utf8 { pending: Vec<u8>, needed: usize },
}

/// Turns raw terminal bytes into [`Key`]s, one byte at a time.
///
/// `feed` returns `None` while a sequence is incomplete and for every byte
/// that is consumed without meaning (unknown escape sequences, stray control
/// bytes, malformed UTF-8).
#[derive(Debug, Clone)]
pub struct KeyDecoder {
    state: State,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder {
    /// Creates a decoder with no partial sequence buffered.
    pub fn new() -> Self {
        Self { state: State::Ground }
    }

    #[cfg(test)]
    fn is_idle(&self) -> bool {
        self.state == State::Ground
    }

    /// Consumes one input byte, returning the key it completes, if any.
    pub fn feed(&mut self, byte: u8) -> Option<Key> {
        match std::mem::replace(&mut self.state, State::Ground) {
            State::Ground => self.feed_ground(byte),
            // A new ESC abandons whatever was pending and starts over, so
            // Escape followed by an arrow key still decodes the arrow.
            _ if byte == KEY_ESCAPE => {
                self.state = State::Escape;
                None
            }
            State::Escape => {
                match byte {
                    b'[' => self.state = State::Csi { plain: true },
                    b'O' => self.state = State::Ss3,
                    _ => log::debug!("Ignoring escape followed by byte {:#04x}", byte),
                }
                None
            }
            State::Csi { plain } => match byte {
                // Parameter and intermediate bytes.
                0x20..=0x3f => {
                    self.state = State::Csi { plain: false };
                    None
                }
                // Final byte.
                0x40..=0x7e => match (plain, byte) {
                    (true, b'C') => Some(Key::Right),
                    (true, b'D') => Some(Key::Left),
                    _ => {
                        log::debug!("Ignoring CSI sequence ending in '{}'", byte as char);
                        None
                    }
                },
                _ => None,
            },
            State::Ss3 => match byte {
                b'C' => Some(Key::Right),
                b'D' => Some(Key::Left),
                _ => None,
            },
            State::Utf8 {
                mut pending,
                needed,
            } => {
                if !is_continuation(byte) {
                    // Malformed: drop what was collected and start over with this byte.
                    return self.feed_ground(byte);
                }
                pending.push(byte);
                if pending.len() < needed {
                    self.state = State::Utf8 { pending, needed };
                    return None;
                }
                std::str::from_utf8(&pending)
                    .ok()
                    .and_then(|s| s.chars().next())
                    .filter(|c| !c.is_control())
                    .map(Key::Char)
            }
        }
    }

    fn feed_ground(&mut self, byte: u8) -> Option<Key> {
        match byte {
            KEY_NEWLINE | KEY_CARRIAGE_RETURN => Some(Key::Enter),
            KEY_BACKSPACE | KEY_CTRL_H => Some(Key::Backspace),
            KEY_ESCAPE => {
                self.state = State::Escape;
                None
            }
            0x20..=0x7e => Some(Key::Char(char::from(byte))),
            _ => match utf8_sequence_length(byte) {
                Some(needed) => {
                    self.state = State::Utf8 {
                        pending: vec![byte],
                        needed,
                    };
                    None
                }
                // Other control bytes and stray continuation bytes.
                None => None,
            },
        }
    }
}

fn is_continuation(byte: u8) -> bool {
    (0x80..=0xbf).contains(&byte)
}

fn utf8_sequence_length(lead: u8) -> Option<usize> {
    match lead {
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Vec<Key> {
        let mut decoder = KeyDecoder::new();
        bytes.iter().filter_map(|b| decoder.feed(*b)).collect()
    }

    #[test]
    fn test_printable_and_editing_keys() {
        assert_eq!(
            decode(b"a \x7f\x08\n\r"),
            vec![
                Key::Char('a'),
                Key::Char(' '),
                Key::Backspace,
                Key::Backspace,
                Key::Enter,
                Key::Enter,
            ]
        );
    }

    #[test]
    fn test_arrow_keys_in_both_cursor_modes() {
        assert_eq!(
            decode(b"\x1b[C\x1b[D\x1bOC\x1bOD"),
            vec![Key::Right, Key::Left, Key::Right, Key::Left]
        );
    }

    #[test]
    fn test_up_and_down_are_absorbed() {
        assert_eq!(decode(b"\x1b[A\x1b[Bx"), vec![Key::Char('x')]);
    }

    #[test]
    fn test_long_csi_sequences_are_absorbed_whole() {
        // Ctrl+Right, Delete and PageUp must not leak ";5C", "~" or "5~" into the line.
        assert_eq!(decode(b"\x1b[1;5C\x1b[3~\x1b[5~ok"), vec![Key::Char('o'), Key::Char('k')]);
    }

    #[test]
    fn test_escape_followed_by_other_byte_consumes_both() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(decoder.feed(KEY_ESCAPE), None);
        assert_eq!(decoder.feed(b'x'), None);
        assert!(decoder.is_idle());
        assert_eq!(decoder.feed(b'y'), Some(Key::Char('y')));
    }

    #[test]
    fn test_escape_then_arrow_still_moves() {
        // Escape pressed before Left, also what Alt+Left sends on many xterms.
        assert_eq!(decode(b"\x1b\x1b[Dx"), vec![Key::Left, Key::Char('x')]);
        assert_eq!(decode(b"\x1b\x1bOC"), vec![Key::Right]);
    }

    #[test]
    fn test_escape_interrupting_a_sequence_restarts_decoding() {
        assert_eq!(decode(b"\x1b[1\x1b[C"), vec![Key::Right]);
        assert_eq!(decode(b"\x1bO\x1b[D"), vec![Key::Left]);
        assert_eq!(decode(&[0xc3, KEY_ESCAPE, b'[', b'C']), vec![Key::Right]);
    }

    #[test]
    fn test_control_bytes_are_ignored() {
        assert_eq!(decode(b"\x01\x04\x00z"), vec![Key::Char('z')]);
    }

    #[test]
    fn test_multibyte_utf8_is_one_character() {
        assert_eq!(
            decode("ñ€".as_bytes()),
            vec![Key::Char('ñ'), Key::Char('€')]
        );
    }

    #[test]
    fn test_truncated_utf8_is_dropped() {
        // A three-byte lead followed by a plain ASCII byte.
        assert_eq!(decode(&[0xe2, 0x82, b'a']), vec![Key::Char('a')]);
    }
}

// src/core/edit_buffer.rs

use crate::constants::MAX_LINE_LENGTH;

/// The line being composed, plus the cursor position inside it.
///
/// Invariant: `cursor <= len() <= capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    chars: Vec<char>,
    cursor: usize,
    capacity: usize,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new(MAX_LINE_LENGTH)
    }
}

impl EditBuffer {
    /// Creates an empty buffer that never grows beyond `capacity` characters.
    pub fn new(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity.min(MAX_LINE_LENGTH)),
            cursor: 0,
            capacity,
        }
    }

    /// Number of characters in the line.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True when the line has no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// True when no further character can be inserted.
    pub fn is_full(&self) -> bool {
        self.chars.len() >= self.capacity
    }

    /// Index of the character the next insertion lands before.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Inserts `c` at the cursor and advances past it.
    /// Returns `false` (leaving the buffer untouched) when the buffer is full.
    pub fn insert(&mut self, c: char) -> bool {
        if self.is_full() {
            return false;
        }
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    /// Deletes the character before the cursor. No-op at position 0.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    /// Moves the cursor one position left. Returns `false` at the start.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Moves the cursor one position right. Returns `false` at the end.
    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Characters from `index` to the end of the line.
    pub fn tail_from(&self, index: usize) -> String {
        self.chars.iter().skip(index).collect()
    }

    /// Number of characters between the cursor and the end of the line.
    pub fn chars_after_cursor(&self) -> usize {
        self.chars.len() - self.cursor
    }

    #[cfg(test)]
    fn as_string(&self) -> String {
        self.chars.iter().collect()
    }

    /// Consumes the buffer into the finished line.
    pub fn into_line(self) -> String {
        self.chars.into_iter().collect()
    }
}

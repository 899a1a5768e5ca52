use heapless::String;

use crate::assembler::is_printable;

/// A fixed-size, heapless line buffer holding the characters received since
/// the last terminator.
///
/// Only printable ASCII is ever stored, so the content is always valid UTF-8
/// and one byte per character. The length never exceeds `B`.
///
/// # Type Parameters
/// - `B`: The maximum line length (buffer size).
pub struct LineBuffer<const B: usize> {
    line: String<B>,
}

impl<const B: usize> LineBuffer<B> {
    /// Creates a new, empty `LineBuffer`.
    pub const fn new() -> Self {
        Self { line: String::new() }
    }

    /// Appends a printable ASCII byte at the end of the line.
    ///
    /// Returns `false` if the buffer is full or the byte is not printable;
    /// the content is left untouched in both cases.
    ///
    /// # Example
    /// ```
    /// # use serial_command::buffer::LineBuffer;
    /// let mut buf: LineBuffer<2> = LineBuffer::new();
    /// assert!(buf.push(b'o'));
    /// assert!(buf.push(b'k'));
    /// assert!(!buf.push(b'!'));
    /// assert_eq!(buf.as_str(), "ok");
    /// ```
    pub fn push(&mut self, byte: u8) -> bool {
        if !is_printable(byte) {
            return false;
        }
        self.line.push(char::from(byte)).is_ok()
    }

    /// Removes the last character (backspace).
    ///
    /// Returns `true` if a character was removed, `false` if the buffer was
    /// already empty.
    pub fn backspace(&mut self) -> bool {
        self.line.pop().is_some()
    }

    /// Empties the buffer.
    pub fn clear(&mut self) {
        self.line.clear();
    }

    /// The line assembled so far.
    pub fn as_str(&self) -> &str {
        self.line.as_str()
    }

    /// Returns the current length of the line in bytes.
    pub fn len(&self) -> usize {
        self.line.len()
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Returns `true` once `B` characters are stored.
    pub fn is_full(&self) -> bool {
        self.line.len() >= B
    }

    /// Maximum number of characters the buffer holds.
    pub const fn capacity(&self) -> usize {
        B
    }
}

impl<const B: usize> Default for LineBuffer<B> {
    /// Returns a new, empty `LineBuffer`.
    fn default() -> Self {
        Self::new()
    }
}

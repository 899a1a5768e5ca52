//! Compile-time capacities and run-time parsing options.

use heapless::String;

/// Default number of commands a [`crate::DefaultSerialCommand`] can hold.
pub const DEFAULT_MAX_COMMANDS: usize = 10;
/// Default line buffer size in characters.
pub const DEFAULT_BUFFER_SIZE: usize = 32;
/// Default number of significant bytes in a command name.
pub const DEFAULT_MAX_COMMAND_LENGTH: usize = 8;
/// Maximum number of delimiter bytes; longer delimiter sets are truncated.
pub const MAX_DELIMITERS: usize = 4;

/// Parsing options. Changes apply to bytes processed afterwards only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Primary line terminator.
    pub term: u8,
    /// Secondary line terminator.
    pub term2: u8,
    /// Token separators. Every byte of the set is a delimiter on its own.
    pub delimiters: String<MAX_DELIMITERS>,
    /// Write each received byte back to the stream before processing it.
    pub echo: bool,
}

impl Config {
    /// Replaces the delimiter set, keeping at most [`MAX_DELIMITERS`] bytes.
    pub fn set_delimiters(&mut self, delimiters: &str) {
        self.delimiters = truncated(delimiters);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            term: b'\n',
            term2: b'\r',
            delimiters: truncated(" "),
            echo: false,
        }
    }
}

/// Copies as many whole characters of `s` as fit into `N` bytes.
pub(crate) fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

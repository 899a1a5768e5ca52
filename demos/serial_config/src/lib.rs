//! Capacities and options the demo parser is built with.

/// Command table size.
pub const MAX_COMMANDS: usize = 8;

/// Line buffer size.
pub const BUFFER_SIZE: usize = 64;

/// Significant bytes of a command name.
pub const MAX_COMMAND_LENGTH: usize = 8;

/// Token separators.
pub const DELIMITERS: &str = " ,";

pub const PROMPT: &str = "> ";

/// Sleep between two polls of the input stream.
pub const POLL_INTERVAL_MS: u64 = 10;

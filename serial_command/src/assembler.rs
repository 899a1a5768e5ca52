// assembler.rs — what a single input byte means to the line assembler

use crate::config::Config;

/// ASCII backspace (Ctrl+H).
pub const BACKSPACE: u8 = 0x08;
/// ASCII delete, sent by most terminals for the backspace key.
pub const DELETE: u8 = 0x7F;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {

    // Line control
    Terminator,   // Primary or secondary terminator: dispatch the line
    Erase,        // Backspace or delete: drop the last buffered character

    // Buffered
    Char(u8),     // Printable ASCII, appended if there is room

    // Everything else (control bytes, 8-bit bytes)
    Ignored,
}

/// Classifies `byte` with the priority terminator > printable > erase > other.
///
/// Terminators win over every other class, so a printable byte configured as
/// a terminator never reaches the buffer.
pub fn classify(byte: u8, config: &Config) -> Input {
    if byte == config.term || byte == config.term2 {
        Input::Terminator
    } else if is_printable(byte) {
        Input::Char(byte)
    } else if byte == BACKSPACE || byte == DELETE {
        Input::Erase
    } else {
        Input::Ignored
    }
}

/// Printable ASCII, space included (0x20..=0x7E).
#[inline(always)]
pub const fn is_printable(byte: u8) -> bool {
    matches!(byte, 0x20..=0x7E)
}

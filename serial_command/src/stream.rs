//! The character stream the parser drains.
//!
//! A UART driver, a USB CDC class or a ring buffer filled from an interrupt
//! all fit behind [`ByteStream`]. The parser only calls [`ByteStream::read`]
//! after [`ByteStream::available`] reported pending bytes, so implementations
//! never need to block.

use heapless::Deque;

/// Non-blocking source of input bytes.
pub trait ByteStream {
    /// Number of bytes that can be read right now without waiting.
    fn available(&mut self) -> usize;

    /// Returns the next pending byte, or `None` if nothing is pending.
    fn read(&mut self) -> Option<u8>;

    /// Writes a byte back to the peer. Used for echo; the default discards it.
    fn write(&mut self, _byte: u8) {}
}

impl<S: ByteStream + ?Sized> ByteStream for &mut S {
    fn available(&mut self) -> usize {
        (**self).available()
    }

    fn read(&mut self) -> Option<u8> {
        (**self).read()
    }

    fn write(&mut self, byte: u8) {
        (**self).write(byte)
    }
}

/// A ring buffer filled by an interrupt handler (or a test) is a stream.
impl<const N: usize> ByteStream for Deque<u8, N> {
    fn available(&mut self) -> usize {
        self.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.pop_front()
    }
}

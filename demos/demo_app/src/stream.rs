use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use serial_command::ByteStream;

/// Stdin seen as a non-blocking serial port.
///
/// A reader thread forwards every byte over a channel; `available()` only
/// collects what already arrived, so polling never blocks. Echoed bytes go
/// to stdout, with backspace rubbed out and terminators turned into a newline.
pub struct StdinStream {
    rx: Receiver<u8>,
    pending: VecDeque<u8>,
    closed: bool,
}

impl StdinStream {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for byte in io::stdin().lock().bytes() {
                match byte {
                    Ok(b) => {
                        if tx.send(b).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::error!("stdin: {e}");
                        break;
                    }
                }
            }
        });

        Self {
            rx,
            pending: VecDeque::new(),
            closed: false,
        }
    }

    /// `true` once stdin reached end of file and every byte was read.
    pub fn is_drained(&self) -> bool {
        self.closed && self.pending.is_empty()
    }
}

impl ByteStream for StdinStream {
    fn available(&mut self) -> usize {
        loop {
            match self.rx.try_recv() {
                Ok(b) => self.pending.push_back(b),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
        self.pending.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.pending.pop_front()
    }

    fn write(&mut self, byte: u8) {
        let mut out = io::stdout().lock();
        let _ = match byte {
            0x08 | 0x7F => out.write_all(b"\x08 \x08"),
            b'\r' | b'\n' => out.write_all(b"\n"),
            b => out.write_all(&[b]),
        };
        let _ = out.flush();
    }
}

//! Raw terminal input for the demo.
//!
//! Canonical mode and echo are switched off so every key press, backspace
//! included, reaches the parser as a single byte, as it would over a UART.
//! The original mode is restored when `RawMode` is dropped.
//!
//! - On **Unix**, it uses the `termios` crate.
//! - On **Windows**, it uses the `winapi` crate.

use std::io;

pub struct RawMode {
    #[cfg(unix)]
    fd: i32,
    #[cfg(unix)]
    original: termios::Termios,
    #[cfg(windows)]
    original_mode: u32,
}

impl RawMode {
    /// Fails if `fd` is not a terminal (e.g. input is piped).
    #[cfg(unix)]
    pub fn new(fd: i32) -> io::Result<Self> {
        use termios::*;
        let original = Termios::from_fd(fd)?;
        let mut raw = original;
        raw.c_lflag &= !(ICANON | ECHO);
        tcsetattr(fd, TCSANOW, &raw)?;
        Ok(RawMode { fd, original })
    }

    #[cfg(windows)]
    pub fn new(_: i32) -> io::Result<Self> {
        use winapi::um::{
            consoleapi::{GetConsoleMode, SetConsoleMode},
            handleapi::INVALID_HANDLE_VALUE,
            processenv::GetStdHandle,
            winbase::STD_INPUT_HANDLE,
            wincon::{ENABLE_ECHO_INPUT, ENABLE_LINE_INPUT},
        };
        unsafe {
            let handle = GetStdHandle(STD_INPUT_HANDLE);
            if handle == INVALID_HANDLE_VALUE {
                return Err(io::Error::last_os_error());
            }
            let mut mode = 0;
            if GetConsoleMode(handle, &mut mode) == 0 {
                return Err(io::Error::last_os_error());
            }
            let original_mode = mode;
            mode &= !(ENABLE_LINE_INPUT | ENABLE_ECHO_INPUT);
            SetConsoleMode(handle, mode);
            Ok(RawMode { original_mode })
        }
    }
}

impl Drop for RawMode {
    #[cfg(unix)]
    fn drop(&mut self) {
        use termios::*;
        let _ = tcsetattr(self.fd, TCSANOW, &self.original);
    }

    #[cfg(windows)]
    fn drop(&mut self) {
        use winapi::um::consoleapi::SetConsoleMode;
        use winapi::um::handleapi::INVALID_HANDLE_VALUE;
        use winapi::um::processenv::GetStdHandle;
        use winapi::um::winbase::STD_INPUT_HANDLE;
        unsafe {
            let handle = GetStdHandle(STD_INPUT_HANDLE);
            if handle != INVALID_HANDLE_VALUE {
                SetConsoleMode(handle, self.original_mode);
            }
        }
    }
}

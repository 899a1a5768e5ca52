use log::{debug, trace};

use crate::assembler::{classify, Input};
use crate::buffer::LineBuffer;
use crate::config::{
    Config, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_COMMANDS, DEFAULT_MAX_COMMAND_LENGTH,
};
use crate::registry::{CommandFn, CommandRegistry};
use crate::stream::ByteStream;
use crate::tokens::Tokens;

/// Handler for a first token that matches no command. Receives the raw token.
pub type DefaultFn<'h> = &'h mut dyn FnMut(&str, &mut Tokens<'_>);

/// Handler for a line holding no token at all.
pub type NullFn<'h> = &'h mut dyn FnMut();

/// Which branch a completed dispatch cycle took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {

    /// The command at this registry index was invoked.
    Matched(usize),

    /// No command matched; the default handler ran if one is set.
    Unmatched,

    /// The line was empty or delimiters only; the null handler ran if one is set.
    Empty,
}

/// A [`SerialCommand`] sized with the crate's default capacities.
pub type DefaultSerialCommand<'h> =
    SerialCommand<'h, DEFAULT_MAX_COMMANDS, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_COMMAND_LENGTH>;

/// Assembles lines from a byte stream and dispatches them to handlers.
///
/// # Type Parameters
/// - `N`: Maximum number of commands.
/// - `B`: Line buffer size.
/// - `L`: Number of significant bytes in a command name.
///
/// One instance serves one stream; create one per port. Handlers are
/// borrowed for `'h` and called synchronously from [`Self::read_serial`] or
/// [`Self::process_byte`]. Overflowing the command table or the line buffer
/// and lines nobody handles are all dropped without notice.
pub struct SerialCommand<'h, const N: usize, const B: usize, const L: usize> {
    commands: CommandRegistry<'h, N, L>,
    default_handler: Option<DefaultFn<'h>>,
    null_handler: Option<NullFn<'h>>,
    buffer: LineBuffer<B>,
    config: Config,
}

impl<'h, const N: usize, const B: usize, const L: usize> SerialCommand<'h, N, B, L> {
    /// Creates a parser with the default terminators (`\n`, `\r`) and a
    /// single space as delimiter.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a parser with the given options.
    pub fn with_config(config: Config) -> Self {
        Self {
            commands: CommandRegistry::new(),
            default_handler: None,
            null_handler: None,
            buffer: LineBuffer::new(),
            config,
        }
    }

    /// Registers `handler` under `name` (truncated to `L` bytes).
    /// Ignored once `N` commands are registered.
    pub fn add_command(&mut self, name: &str, handler: CommandFn<'h>) {
        self.commands.register(name, handler);
    }

    /// Sets the handler for unknown commands, replacing any previous one.
    pub fn set_default_handler(&mut self, handler: DefaultFn<'h>) {
        self.default_handler = Some(handler);
    }

    /// Unknown commands are dropped again.
    pub fn clear_default_handler(&mut self) {
        self.default_handler = None;
    }

    /// Sets the handler for empty lines, replacing any previous one.
    pub fn set_null_handler(&mut self, handler: NullFn<'h>) {
        self.null_handler = Some(handler);
    }

    /// Empty lines are dropped again.
    pub fn clear_null_handler(&mut self) {
        self.null_handler = None;
    }

    pub fn set_terminators(&mut self, term: u8, term2: u8) {
        self.config.term = term;
        self.config.term2 = term2;
    }

    pub fn set_delimiters(&mut self, delimiters: &str) {
        self.config.set_delimiters(delimiters);
    }

    pub fn set_echo(&mut self, echo: bool) {
        self.config.echo = echo;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn commands(&self) -> &CommandRegistry<'h, N, L> {
        &self.commands
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// The partial line received since the last terminator.
    pub fn line(&self) -> &str {
        self.buffer.as_str()
    }

    /// Drains every byte `stream` currently has, dispatching each completed
    /// line. Returns as soon as `available()` reports nothing pending.
    pub fn read_serial<S: ByteStream + ?Sized>(&mut self, stream: &mut S) {
        while stream.available() > 0 {
            let Some(byte) = stream.read() else {
                break;
            };
            if self.config.echo {
                stream.write(byte);
            }
            self.process_byte(byte);
        }
    }

    /// Feeds one byte to the line assembler.
    ///
    /// Returns the outcome of the dispatch cycle if `byte` was a terminator.
    pub fn process_byte(&mut self, byte: u8) -> Option<Outcome> {
        match classify(byte, &self.config) {
            Input::Terminator => {
                let outcome = self.dispatch();
                self.clear_buffer();
                Some(outcome)
            }
            Input::Char(c) => {
                if !self.buffer.push(c) {
                    trace!("Line buffer is full ({} bytes), dropping {:#04x}", B, c);
                }
                None
            }
            Input::Erase => {
                self.buffer.backspace();
                None
            }
            Input::Ignored => None,
        }
    }

    /// Discards the partial line.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    fn dispatch(&mut self) -> Outcome {
        let Self {
            commands,
            default_handler,
            null_handler,
            buffer,
            config,
        } = self;

        debug!("Received: {}", buffer.as_str());

        let mut args = Tokens::new(buffer.as_str(), config.delimiters.as_str());
        let Some(command) = args.next() else {
            if let Some(handler) = null_handler.as_deref_mut() {
                handler();
            }
            return Outcome::Empty;
        };

        match commands.position(command) {
            Some(index) => {
                debug!("Matched Command: {}", command);
                if let Some(entry) = commands.get_mut(index) {
                    entry.call(&mut args);
                }
                Outcome::Matched(index)
            }
            None => {
                debug!("Unknown command: {}", command);
                if let Some(handler) = default_handler.as_deref_mut() {
                    handler(command, &mut args);
                }
                Outcome::Unmatched
            }
        }
    }
}

impl<const N: usize, const B: usize, const L: usize> Default for SerialCommand<'_, N, B, L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::{Cell, RefCell};

    type Small<'h> = SerialCommand<'h, 4, 8, 4>;

    fn feed<const N: usize, const B: usize, const L: usize>(
        sc: &mut SerialCommand<'_, N, B, L>,
        bytes: &[u8],
    ) -> std::vec::Vec<Outcome> {
        bytes.iter().filter_map(|&b| sc.process_byte(b)).collect()
    }

    #[test]
    fn one_cycle_per_terminator_byte() {
        let mut sc = Small::new();
        assert_eq!(feed(&mut sc, b"X\r\n"), [Outcome::Unmatched, Outcome::Empty]);
        assert_eq!(feed(&mut sc, b"\n\n\r"), [Outcome::Empty; 3]);
    }

    #[test]
    fn buffer_is_empty_after_every_branch() {
        let mut h = |_: &mut Tokens<'_>| {};
        let mut sc = Small::new();
        sc.add_command("GO", &mut h);

        for line in [&b"GO 1\n"[..], b"NOPE\n", b"   \n", b"\n"] {
            assert_eq!(feed(&mut sc, line).len(), 1);
            assert_eq!(sc.line(), "");
        }
    }

    #[test]
    fn overflow_keeps_what_fit() {
        let got = RefCell::new(std::string::String::new());
        let mut unknown = |cmd: &str, _: &mut Tokens<'_>| got.borrow_mut().push_str(cmd);
        let mut sc = Small::new();
        sc.set_default_handler(&mut unknown);

        feed(&mut sc, b"ABCDEFGHIJKL");
        assert_eq!(sc.line(), "ABCDEFGH");
        feed(&mut sc, b"\n");
        assert_eq!(got.borrow().as_str(), "ABCDEFGH");
    }

    #[test]
    fn control_bytes_are_ignored() {
        let mut sc = Small::new();
        feed(&mut sc, b"A\tB\x1b\x00\xffC");
        assert_eq!(sc.line(), "ABC");
    }

    #[test]
    fn delete_and_backspace_both_erase() {
        let mut sc = Small::new();
        feed(&mut sc, b"ABC\x7f\x08D");
        assert_eq!(sc.line(), "AD");
        feed(&mut sc, b"\x08\x08\x08");
        assert_eq!(sc.line(), "");
    }

    #[test]
    fn matched_outcome_reports_registry_index() {
        let mut a = |_: &mut Tokens<'_>| {};
        let mut b = |_: &mut Tokens<'_>| {};
        let mut sc = Small::new();
        sc.add_command("ON", &mut a);
        sc.add_command("OFF", &mut b);
        assert_eq!(feed(&mut sc, b"OFF\n"), [Outcome::Matched(1)]);
    }

    #[test]
    fn handler_replacement_and_clearing() {
        let calls = Cell::new(0u32);
        let mut first = || calls.set(calls.get() + 1);
        let mut second = || calls.set(calls.get() + 100);
        let mut sc = Small::new();

        sc.set_null_handler(&mut first);
        sc.set_null_handler(&mut second);
        feed(&mut sc, b"\n");
        assert_eq!(calls.get(), 100);

        sc.clear_null_handler();
        assert_eq!(feed(&mut sc, b"\n"), [Outcome::Empty]);
        assert_eq!(calls.get(), 100);
    }

    #[test]
    fn custom_terminator_and_delimiters() {
        let seen = RefCell::new(std::vec::Vec::<std::string::String>::new());
        let mut pwm = |args: &mut Tokens<'_>| {
            seen.borrow_mut().extend(args.map(|t| t.to_owned()));
        };
        let mut sc: SerialCommand<'_, 4, 32, 8> = SerialCommand::new();
        sc.set_terminators(b';', b'!');
        sc.set_delimiters(",");
        sc.add_command("PWM", &mut pwm);

        feed(&mut sc, b"PWM,3,,128;PWM,9!");
        assert_eq!(*seen.borrow(), ["3", "128", "9"]);
    }

    #[test]
    fn config_changes_keep_the_buffered_line() {
        let mut sc = Small::new();
        feed(&mut sc, b"AB");
        sc.set_terminators(b'#', b'#');
        assert!(feed(&mut sc, b"\n").is_empty());
        assert_eq!(sc.line(), "AB");
        assert_eq!(feed(&mut sc, b"#"), [Outcome::Unmatched]);
    }

    struct Loopback {
        rx: heapless::Deque<u8, 16>,
        tx: std::vec::Vec<u8>,
    }

    impl ByteStream for Loopback {
        fn available(&mut self) -> usize {
            self.rx.len()
        }

        fn read(&mut self) -> Option<u8> {
            self.rx.pop_front()
        }

        fn write(&mut self, byte: u8) {
            self.tx.push(byte);
        }
    }

    #[test]
    fn echo_writes_every_byte_read() {
        let mut port = Loopback { rx: heapless::Deque::new(), tx: std::vec::Vec::new() };
        for &b in b"HI\x07\n" {
            port.rx.push_back(b).unwrap();
        }

        let mut sc = Small::new();
        sc.read_serial(&mut port);
        assert!(port.tx.is_empty());

        for &b in b"HI\x07\n" {
            port.rx.push_back(b).unwrap();
        }
        sc.set_echo(true);
        sc.read_serial(&mut port);
        assert_eq!(port.tx, b"HI\x07\n");
    }

    #[test]
    fn read_serial_returns_when_stream_is_dry() {
        let hits = Cell::new(0u8);
        let mut h = |_: &mut Tokens<'_>| hits.set(hits.get() + 1);
        let mut sc = Small::new();
        sc.add_command("GO", &mut h);

        let mut port: heapless::Deque<u8, 8> = heapless::Deque::new();
        port.push_back(b'G').unwrap();
        sc.read_serial(&mut port);
        assert_eq!(sc.line(), "G");
        assert_eq!(hits.get(), 0);

        port.push_back(b'O').unwrap();
        port.push_back(b'\n').unwrap();
        sc.read_serial(&mut port);
        assert_eq!(hits.get(), 1);
        assert_eq!(sc.line(), "");
    }
}

#![cfg_attr(not(test), no_std)]

//! Tokenize and dispatch line-oriented commands received over a byte stream.
//!
//! Bytes are assembled into a fixed-size line buffer until a terminator is
//! seen. The line is then split on a configurable delimiter set, the first
//! token is matched against a fixed-capacity command table and the matching
//! handler is invoked. Handlers pull the remaining tokens through the
//! [`Tokens`] cursor they are given.
//!
//! No heap allocation is performed: all capacities are const generics.
//!
//! ```ignore
//! let mut led = |args: &mut Tokens<'_>| {
//!     if let Some(state) = args.next() { set_led(state == "1") }
//! };
//! let mut unknown = |cmd: &str, _: &mut Tokens<'_>| log::warn!("what? {cmd}");
//!
//! let mut sc = DefaultSerialCommand::new();
//! sc.add_command("LED", &mut led);
//! sc.set_default_handler(&mut unknown);
//!
//! loop {
//!     sc.read_serial(&mut uart);
//! }
//! ```

pub mod assembler;
pub mod buffer;
pub mod command;
pub mod config;
pub mod registry;
pub mod stream;
pub mod tokens;

pub use command::{DefaultSerialCommand, Outcome, SerialCommand};
pub use config::Config;
pub use registry::{CommandEntry, CommandRegistry};
pub use stream::ByteStream;
pub use tokens::Tokens;

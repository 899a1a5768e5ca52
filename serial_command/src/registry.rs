use heapless::{String, Vec};
use log::{debug, trace};

use crate::config::truncated;
use crate::tokens::Tokens;

/// Handler invoked for a matched command. The cursor yields the arguments.
pub type CommandFn<'h> = &'h mut dyn FnMut(&mut Tokens<'_>);

/// One registered command.
/// - `L`: number of significant bytes in the name.
pub struct CommandEntry<'h, const L: usize> {
    name: String<L>,
    handler: CommandFn<'h>,
}

impl<'h, const L: usize> CommandEntry<'h, L> {
    /// Builds an entry, truncating `name` to at most `L` bytes.
    pub fn new(name: &str, handler: CommandFn<'h>) -> Self {
        Self {
            name: truncated(name),
            handler,
        }
    }

    /// The stored (possibly truncated) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bounded comparison: only the first `L` bytes of `token` are significant.
    ///
    /// A token longer than `L` therefore matches a name equal to its first
    /// `L` bytes, and two names differing only past `L` collide.
    pub fn matches(&self, token: &str) -> bool {
        let bytes = token.as_bytes();
        &bytes[..bytes.len().min(L)] == self.name.as_bytes()
    }

    /// Runs the handler.
    pub fn call(&mut self, args: &mut Tokens<'_>) {
        (self.handler)(args)
    }
}

/// Fixed-capacity command table, kept in registration order.
/// - `N`: maximum number of commands.
/// - `L`: number of significant bytes in a name.
pub struct CommandRegistry<'h, const N: usize, const L: usize> {
    entries: Vec<CommandEntry<'h, L>, N>,
}

impl<'h, const N: usize, const L: usize> CommandRegistry<'h, N, L> {
    /// Creates an empty table.
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends a command. Once `N` commands are registered further calls are
    /// silently ignored.
    pub fn register(&mut self, name: &str, handler: CommandFn<'h>) {
        debug!("Adding command ({}): {}", self.entries.len(), name);
        if self.entries.push(CommandEntry::new(name, handler)).is_err() {
            debug!("Command table full ({}), '{}' not added", N, name);
        }
    }

    /// Index of the first entry matching `token`, in registration order.
    pub fn position(&self, token: &str) -> Option<usize> {
        self.entries.iter().position(|entry| {
            trace!("Comparing [{}] to [{}]", token, entry.name());
            entry.matches(token)
        })
    }

    /// First entry matching `token`. Duplicates resolve to the earliest one.
    pub fn lookup(&mut self, token: &str) -> Option<&mut CommandEntry<'h, L>> {
        let index = self.position(token)?;
        self.get_mut(index)
    }

    /// Entry at `index`, as returned by [`Self::position`].
    pub fn get_mut(&mut self, index: usize) -> Option<&mut CommandEntry<'h, L>> {
        self.entries.get_mut(index)
    }

    /// Returns `true` if `token` resolves to a registered command.
    pub fn contains(&self, token: &str) -> bool {
        self.position(token).is_some()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry<'h, L>> {
        self.entries.iter()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no command is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of commands (`N`).
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize, const L: usize> Default for CommandRegistry<'_, N, L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    fn noop(_: &mut Tokens<'_>) {}

    #[test]
    fn entries_beyond_capacity_are_dropped() {
        let (mut a, mut b, mut c) = (noop, noop, noop);
        let mut reg: CommandRegistry<'_, 2, 8> = CommandRegistry::new();
        reg.register("ONE", &mut a);
        reg.register("TWO", &mut b);
        reg.register("THREE", &mut c);

        assert_eq!(reg.len(), 2);
        assert!(reg.contains("ONE"));
        assert!(reg.contains("TWO"));
        assert!(!reg.contains("THREE"));
    }

    #[test]
    fn names_are_truncated_to_the_significant_length() {
        let mut h = noop;
        let mut reg: CommandRegistry<'_, 4, 4> = CommandRegistry::new();
        reg.register("STATUS", &mut h);

        let names: Vec<&str, 4> = reg.iter().map(|e| e.name()).collect();
        assert_eq!(names.as_slice(), ["STAT"]);
        assert!(reg.contains("STAT"));
        assert!(reg.contains("STATUS"));
        assert!(reg.contains("STATE"));
        assert!(!reg.contains("STA"));
    }

    #[test]
    fn lookup_is_exact_within_the_bound() {
        let mut h = noop;
        let mut reg: CommandRegistry<'_, 4, 8> = CommandRegistry::new();
        reg.register("LED", &mut h);

        assert!(reg.contains("LED"));
        assert!(!reg.contains("LE"));
        assert!(!reg.contains("LEDS"));
        assert!(!reg.contains("led"));
    }

    #[test]
    fn first_registered_duplicate_wins() {
        let hits = Cell::new(0u8);
        let mut first = |_: &mut Tokens<'_>| hits.set(hits.get() + 1);
        let mut second = |_: &mut Tokens<'_>| hits.set(hits.get() + 10);
        let mut reg: CommandRegistry<'_, 4, 8> = CommandRegistry::new();
        reg.register("GO", &mut first);
        reg.register("GO", &mut second);

        assert_eq!(reg.position("GO"), Some(0));
        let mut args = Tokens::new("", " ");
        if let Some(entry) = reg.lookup("GO") {
            entry.call(&mut args);
        }
        assert_eq!(hits.get(), 1);
    }
}

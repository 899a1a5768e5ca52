/// Forward-only cursor over the tokens of one received line.
///
/// A token is a maximal run of characters containing no delimiter; runs of
/// delimiters between, before or after tokens produce no empty tokens.
///
/// The dispatcher takes the command name from the cursor and hands it to the
/// invoked handler, so the handler's first call to [`Iterator::next`] yields
/// the first argument. Tokens borrow the parser's line buffer, which is
/// cleared when the dispatch cycle ends: copy anything that must outlive the
/// handler call.
#[derive(Debug, Clone)]
pub struct Tokens<'t> {
    rest: &'t str,
    delimiters: &'t str,
}

impl<'t> Tokens<'t> {
    /// Creates a cursor positioned at the start of `line`.
    pub fn new(line: &'t str, delimiters: &'t str) -> Self {
        Self { rest: line, delimiters }
    }

    /// The part of the line not yet tokenized, leading delimiters skipped.
    ///
    /// Useful for commands taking free text, e.g. `SAY hello world`.
    pub fn remaining(&self) -> &'t str {
        self.rest.trim_start_matches(|c: char| self.is_delimiter(c))
    }

    fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(c)
    }
}

impl<'t> Iterator for Tokens<'t> {
    type Item = &'t str;

    /// Returns the next token, or `None` once the line is exhausted.
    fn next(&mut self) -> Option<&'t str> {
        let start = self.remaining();
        if start.is_empty() {
            self.rest = start;
            return None;
        }

        // The delimiter ending a token is consumed with it.
        match start.char_indices().find(|&(_, c)| self.is_delimiter(c)) {
            Some((end, delim)) => {
                self.rest = &start[end + delim.len_utf8()..];
                Some(&start[..end])
            }
            None => {
                self.rest = "";
                Some(start)
            }
        }
    }
}

impl core::iter::FusedIterator for Tokens<'_> {}

//! Character cursor used internally by the scanner.
//!
//! This is a read-only cursor over the *source text*, distinct from
//! `properties::Cursor`, which walks the *token sequence* the scanner
//! produces. Keeping the two separate mirrors how a lexer's internal
//! position tracking is never the same type as the token-level cursor a
//! downstream consumer gets to mutate.

/// Sentinel returned once the cursor has run past the end of the source.
/// Distinct from any valid character the scanner's grammar assigns meaning
/// to, so every `match` on `current_char()` can treat it as plain EOF.
pub(crate) const EOF_CHAR: char = '\0';

pub(crate) struct Cursor<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source, position: 0 }
    }

    /// Byte offset of the cursor within `source`.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Character under the cursor, or [`EOF_CHAR`] past the end.
    pub(crate) fn current(&self) -> char {
        self.peek_at(0)
    }

    /// Character `offset` positions ahead, or [`EOF_CHAR`] past the end.
    pub(crate) fn peek_at(&self, offset: usize) -> char {
        self.source[self.position..].chars().nth(offset).unwrap_or(EOF_CHAR)
    }

    /// Advances past the current character, returning it.
    pub(crate) fn bump(&mut self) -> char {
        let c = self.current();
        if c != EOF_CHAR {
            self.position += c.len_utf8();
        }
        c
    }

    /// The substring consumed between `start` and the current position.
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }
}

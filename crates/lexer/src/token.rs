/// The five lexical categories the scanner ever emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Key,
    Separator,
    Value,
    Comment,
    Whitespace,
}

/// A single token of the preserved representation.
///
/// `raw` is the exact text the token occupied in the source (or, for a
/// token synthesized by an edit, text chosen to round-trip the same way).
/// `decoded` is populated only for [`TokenKind::Key`] and
/// [`TokenKind::Value`] tokens whose `raw` contained at least one
/// backslash escape; when absent, `raw` already *is* the decoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub raw: String,
    pub decoded: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, raw: impl Into<String>) -> Self {
        Self { kind, raw: raw.into(), decoded: None }
    }

    pub fn with_decoded(kind: TokenKind, raw: impl Into<String>, decoded: impl Into<String>) -> Self {
        Self { kind, raw: raw.into(), decoded: Some(decoded.into()) }
    }

    /// `true` for a whitespace token whose last character is a line
    /// terminator (`\n` or `\r`).
    pub fn is_eol(&self) -> bool {
        self.kind == TokenKind::Whitespace && matches!(self.raw.chars().last(), Some('\n') | Some('\r'))
    }

    /// `true` for a whitespace token that is *not* an EOL token.
    pub fn is_ws(&self) -> bool {
        self.kind == TokenKind::Whitespace && !self.is_eol()
    }

    /// The decoded text if this token carries one, else the raw text.
    pub fn text(&self) -> &str {
        self.decoded.as_deref().unwrap_or(&self.raw)
    }
}

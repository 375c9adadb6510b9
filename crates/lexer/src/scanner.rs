//! Hand-written scanner for the classic `.properties` grammar.
//!
//! The grammar is small but irregular: continuation lines, `\uXXXX`
//! escapes, three line-ending variants, and a separator that shares its
//! character class with ordinary whitespace. This module implements the
//! state machine described for the format — `NONE` / `KEY` / `SEPARATOR`
//! / `VALUE` — directly against a source string, with no intermediate
//! regex or grammar-generator step.

use std::collections::VecDeque;

use tracing::trace;

use crate::cursor::{Cursor, EOF_CHAR};
use crate::error::LexError;
use crate::token::{Token, TokenKind};

fn is_sep_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '=' | ':')
}

fn is_ws_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0C' | '\n' | '\r')
}

fn is_eol_char(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

fn is_comment_start(c: char) -> bool {
    matches!(c, '#' | '!')
}

/// Turns source text into a token sequence, one token at a time.
///
/// Tokens for a single property line are produced in groups of three
/// (key, separator, value) the moment the key's terminator is found, and
/// handed out from an internal queue so the public interface always
/// looks like a flat producer of tokens.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    pending: VecDeque<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), pending: VecDeque::new() }
    }

    /// Scans `source` to completion and returns every token.
    pub fn tokenize(source: &'a str) -> Result<Vec<Token>, LexError> {
        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();
        while let Some(token) = scanner.next_token()? {
            tokens.push(token);
        }
        trace!(bytes = source.len(), tokens = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Produces the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if let Some(token) = self.pending.pop_front() {
            return Ok(Some(token));
        }

        let c = self.cursor.current();
        if c == EOF_CHAR {
            return Ok(None);
        }

        if is_comment_start(c) {
            return Ok(Some(self.scan_comment()));
        }

        if is_ws_char(c) {
            return Ok(Some(self.scan_whitespace()));
        }

        self.scan_property_line()?;
        Ok(self.pending.pop_front())
    }

    fn scan_comment(&mut self) -> Token {
        let start = self.cursor.position();
        while !self.cursor.is_eof() && !is_eol_char(self.cursor.current()) {
            self.cursor.bump();
        }
        Token::new(TokenKind::Comment, self.cursor.slice_from(start))
    }

    fn scan_whitespace(&mut self) -> Token {
        let start = self.cursor.position();
        loop {
            let c = self.cursor.current();
            if !is_ws_char(c) {
                break;
            }
            self.cursor.bump();
            if c == '\r' {
                if self.cursor.current() == '\n' {
                    self.cursor.bump();
                }
                break;
            }
            if c == '\n' {
                break;
            }
        }
        Token::new(TokenKind::Whitespace, self.cursor.slice_from(start))
    }

    /// Scans one logical key/separator/value triple and queues all three
    /// tokens at once.
    fn scan_property_line(&mut self) -> Result<(), LexError> {
        let key = self.scan_key()?;
        let had_separator = is_sep_char(self.cursor.current());
        let (key_token, separator, value) = if had_separator {
            let separator = self.scan_separator();
            let value = self.scan_value()?;
            (key, separator, value)
        } else {
            (key, Token::new(TokenKind::Separator, ""), Token::new(TokenKind::Value, ""))
        };

        self.pending.push_back(key_token);
        self.pending.push_back(separator);
        self.pending.push_back(value);
        Ok(())
    }

    fn scan_key(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.position();
        let mut decoded = String::new();
        let mut has_escape = false;

        loop {
            let c = self.cursor.current();
            if c == EOF_CHAR || is_eol_char(c) || is_sep_char(c) {
                break;
            }
            if c == '\\' {
                has_escape = true;
                self.cursor.bump();
                decoded.push_str(&self.decode_escape()?);
                continue;
            }
            decoded.push(c);
            self.cursor.bump();
        }

        let raw = self.cursor.slice_from(start);
        Ok(if has_escape { Token::with_decoded(TokenKind::Key, raw, decoded) } else { Token::new(TokenKind::Key, raw) })
    }

    fn scan_separator(&mut self) -> Token {
        let start = self.cursor.position();

        while matches!(self.cursor.current(), ' ' | '\t') {
            self.cursor.bump();
        }
        if matches!(self.cursor.current(), '=' | ':') {
            self.cursor.bump();
            while matches!(self.cursor.current(), ' ' | '\t') {
                self.cursor.bump();
            }
        }

        Token::new(TokenKind::Separator, self.cursor.slice_from(start))
    }

    fn scan_value(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.position();
        let mut decoded = String::new();
        let mut has_escape = false;

        loop {
            let c = self.cursor.current();
            if c == EOF_CHAR || is_eol_char(c) {
                break;
            }
            if c == '\\' {
                let next = self.cursor.peek_at(1);
                if is_eol_char(next) {
                    has_escape = true;
                    self.cursor.bump(); // backslash
                    let eol = self.cursor.bump(); // first EOL char
                    if eol == '\r' && self.cursor.current() == '\n' {
                        self.cursor.bump();
                    }
                    // leading whitespace of the continued line is consumed
                    // into `raw` but dropped from `decoded`.
                    while matches!(self.cursor.current(), ' ' | '\t' | '\x0C') {
                        self.cursor.bump();
                    }
                    continue;
                }
                has_escape = true;
                self.cursor.bump();
                decoded.push_str(&self.decode_escape()?);
                continue;
            }
            decoded.push(c);
            self.cursor.bump();
        }

        let raw = self.cursor.slice_from(start);
        Ok(if has_escape { Token::with_decoded(TokenKind::Value, raw, decoded) } else { Token::new(TokenKind::Value, raw) })
    }

    /// Decodes the escape sequence immediately following a backslash the
    /// caller has already consumed. Returns the decoded text; the caller
    /// is responsible for capturing `raw` via the cursor position.
    fn decode_escape(&mut self) -> Result<String, LexError> {
        let c = self.cursor.current();
        match c {
            't' => {
                self.cursor.bump();
                Ok("\t".to_string())
            }
            'f' => {
                self.cursor.bump();
                Ok("\x0C".to_string())
            }
            'n' => {
                self.cursor.bump();
                Ok("\n".to_string())
            }
            'r' => {
                self.cursor.bump();
                Ok("\r".to_string())
            }
            'u' => {
                let escape_start = self.cursor.position();
                self.cursor.bump();
                let mut digits = String::with_capacity(4);
                for _ in 0..4 {
                    let d = self.cursor.current();
                    if !d.is_ascii_hexdigit() {
                        return Err(LexError::InvalidUnicodeEscape { position: escape_start });
                    }
                    digits.push(d);
                    self.cursor.bump();
                }
                let code_point = u32::from_str_radix(&digits, 16).map_err(|_| LexError::InvalidUnicodeEscape { position: escape_start })?;
                let ch = char::from_u32(code_point).ok_or(LexError::InvalidUnicodeEscape { position: escape_start })?;
                Ok(ch.to_string())
            }
            EOF_CHAR => Ok(String::new()),
            other => {
                self.cursor.bump();
                Ok(other.to_string())
            }
        }
    }
}

//! The logical ordered map over a preserved token sequence.
//!
//! A [`Document`] holds two things in lockstep: the token sequence, which
//! is the source of truth for exact formatting, and `entries`, a derived
//! insertion-ordered index of decoded keys to decoded values. Every
//! mutator updates both, going through a [`crate::cursor::Cursor`] for
//! the token-sequence half so the formatting-preserving edit logic lives
//! in one place.

use std::io::Write;
use std::rc::Rc;

use indexmap::IndexMap;
use lexer::{Scanner, Token, TokenKind};
use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::error::{PropertiesError, Result};
use crate::escape::{escape_key, escape_value, from_unicode_escapes, to_unicode_escapes, unescape};
use crate::newline::determine_newline;

/// A lossless `.properties` document: the exact token sequence that
/// reproduces the source byte for byte, plus the decoded key/value map
/// derived from it.
#[derive(Debug, Clone, Default)]
pub struct Document {
    tokens: Vec<Token>,
    entries: IndexMap<String, String>,
    defaults: Option<Rc<Document>>,
}

impl Document {
    /// An empty document with no tokens and no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `input` and builds the token sequence and decoded entry map.
    /// If a key appears more than once, the last occurrence's value wins
    /// but the key keeps the position of its *first* occurrence, matching
    /// `IndexMap`'s in-place update semantics.
    pub fn load_str(input: &str) -> Result<Self> {
        let tokens = Scanner::tokenize(input)?;
        let mut entries = IndexMap::new();
        let mut i = 0;
        while i < tokens.len() {
            if tokens[i].kind == TokenKind::Key {
                let key = tokens[i].text().to_string();
                let value = tokens.get(i + 2).map(|t| t.text().to_string()).unwrap_or_default();
                entries.insert(key, value);
                i += 3;
            } else {
                i += 1;
            }
        }
        debug!(bytes = input.len(), entries = entries.len(), "loaded properties document");
        Ok(Self { tokens, entries, defaults: None })
    }

    /// Reads `path` fully (release of the file handle is guaranteed by
    /// normal `Drop` once the function returns) and decodes it per
    /// `encoding` before loading.
    pub fn load_path(path: impl AsRef<std::path::Path>, encoding: Encoding) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::load_str(&encoding.decode(&bytes)?)
    }

    /// Writes `path` with the document's current lossless text, encoded
    /// per `encoding`. The file handle is closed on every exit path via
    /// ordinary `Drop`.
    pub fn store_path(&self, path: impl AsRef<std::path::Path>, encoding: Encoding) -> Result<()> {
        let text = self.to_string_lossless();
        std::fs::write(path, encoding.encode(&text))?;
        Ok(())
    }

    /// Writes every token's raw text, verbatim, to `writer`.
    pub fn store<W: Write>(&self, mut writer: W) -> Result<()> {
        for token in &self.tokens {
            writer.write_all(token.raw.as_bytes())?;
        }
        debug!(tokens = self.tokens.len(), "wrote properties document");
        Ok(())
    }

    /// As [`Document::store`], but first writes `header_comment_lines` as
    /// a detached header block (blank line after it), replacing whatever
    /// header comment already occupied that position.
    pub fn store_with_header<W: Write, S: AsRef<str>>(&self, mut writer: W, header_comment_lines: &[S]) -> Result<()> {
        if header_comment_lines.is_empty() {
            return self.store(writer);
        }

        let pos = self.skip_header_comment_lines();
        let newline = determine_newline(&self.tokens);
        let mut prefix = "# ".to_string();
        for line in header_comment_lines {
            let line = line.as_ref();
            let normalized = match detect_prefix(line) {
                Some(p) => {
                    prefix = p;
                    line.to_string()
                }
                None => format!("{prefix}{line}"),
            };
            writer.write_all(normalized.as_bytes())?;
            writer.write_all(newline.as_str().as_bytes())?;
        }
        writer.write_all(newline.as_str().as_bytes())?;

        for token in &self.tokens[pos..] {
            writer.write_all(token.raw.as_bytes())?;
        }
        debug!(tokens = self.tokens.len() - pos, "wrote properties document with header");
        Ok(())
    }

    /// Concatenation of every token's raw text: the in-memory equivalent
    /// of `store` into a buffer, used by the round-trip tests.
    pub fn to_string_lossless(&self) -> String {
        self.tokens.iter().map(|t| t.raw.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decoded keys in token order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Decoded `(key, value)` pairs in token order. This is a live,
    /// read-only view; removing while iterating isn't supported the way
    /// a mutable iterator would be — use [`Document::retain`] instead,
    /// which routes every removal through [`Document::remove`] the way
    /// the spec requires.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sets the fallback chain consulted by `get_property` and
    /// `get_property_comment` when a key is absent from `self`. A
    /// non-owning, shared back reference — mirrors the teacher's
    /// `Rc`-based sharing of green-tree nodes rather than a borrowed
    /// lifetime parameter, since that lets the `escaped`/`unescaped`
    /// views rebuild an owned defaults chain without lifetime plumbing.
    /// No cycle detection is performed; the caller must not build one.
    pub fn set_defaults(&mut self, defaults: Rc<Document>) {
        self.defaults = Some(defaults);
    }

    pub fn defaults(&self) -> Option<&Rc<Document>> {
        self.defaults.as_ref()
    }

    /// The decoded value, or `None` if `key` isn't present in `self`
    /// (does not consult `defaults`; see [`Document::get_property`]).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The value's raw (still-escaped) text, or `None` if absent.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        let idx = self.index_of(key)?;
        self.tokens.get(idx + 2).map(|t| t.raw.as_str())
    }

    /// `get(key)`, falling back through the `defaults` chain.
    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.get(key).or_else(|| self.defaults.as_ref().and_then(|d| d.get_property(key)))
    }

    /// The attached comment block's decoded lines, or an empty vector if
    /// `key` is absent or has no attached comments.
    pub fn get_comment(&self, key: &str) -> Vec<String> {
        let Some(idx) = self.index_of(key) else {
            return Vec::new();
        };
        self.attached_comment_positions(idx).into_iter().map(|i| self.tokens[i].text().to_string()).collect()
    }

    /// `get_comment(key)`, falling back through `defaults` when `self`
    /// has no entry for `key` at all.
    pub fn get_property_comment(&self, key: &str) -> Vec<String> {
        if self.entries.contains_key(key) {
            return self.get_comment(key);
        }
        self.defaults.as_ref().map(|d| d.get_property_comment(key)).unwrap_or_default()
    }

    /// Keys of `self` unioned with `defaults`, defaults first, then
    /// `self`'s own additions, each key appearing once.
    pub fn string_property_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut seen = std::collections::HashSet::new();
        if let Some(defaults) = &self.defaults {
            for name in defaults.string_property_names() {
                if seen.insert(name.clone()) {
                    names.push(name);
                }
            }
        }
        for name in self.entries.keys() {
            if seen.insert(name.clone()) {
                names.push(name.clone());
            }
        }
        names
    }

    /// Inserts or replaces a property. If `key` already exists, only its
    /// VALUE token is rewritten (iteration order is unchanged); otherwise
    /// a new KEY/SEPARATOR/VALUE triple is appended.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        let value = value.into();

        if let Some(existing_idx) = self.index_of(&key) {
            let mut cursor = self.cursor_at((existing_idx + 2) as isize);
            cursor.replace(Token::with_decoded(TokenKind::Value, escape_value(&value), value.clone()));
        } else {
            self.append_new_property(&key, &value);
        }

        self.entries.insert(key, value);
        Ok(())
    }

    /// As [`Document::put`], but `raw_key`/`raw_value` are already
    /// escaped text: stored verbatim as token `raw`, with `decoded`
    /// (and the `entries` value) computed via [`unescape`].
    pub fn put_raw(&mut self, raw_key: impl Into<String>, raw_value: impl Into<String>) -> Result<()> {
        let raw_key = raw_key.into();
        let raw_value = raw_value.into();
        let key = unescape(&raw_key);
        let value = unescape(&raw_value);

        if let Some(existing_idx) = self.index_of(&key) {
            let mut cursor = self.cursor_at((existing_idx + 2) as isize);
            cursor.replace(Token::with_decoded(TokenKind::Value, raw_value, value.clone()));
        } else {
            let has_any_key = self.tokens.iter().any(|t| t.kind == TokenKind::Key);
            if !has_any_key && !self.tokens.is_empty() {
                self.append_raw_after_header(&raw_key, &key, &raw_value, &value);
            } else {
                self.append_raw_property(&raw_key, &key, &raw_value, &value);
            }
        }

        self.entries.insert(key, value);
        Ok(())
    }

    /// `put` followed by `set_comment`.
    pub fn set_property<S: AsRef<str>>(&mut self, key: impl Into<String>, value: impl Into<String>, comments: &[S]) -> Result<()> {
        let key = key.into();
        self.put(key.clone(), value)?;
        self.set_comment(&key, comments)
    }

    /// Removes `key`, clearing its attached comment block and the
    /// trailing EOL of its line (if present). Returns the prior decoded
    /// value, or `None` if the key wasn't present.
    pub fn remove(&mut self, key: &str) -> Result<Option<String>> {
        if !self.entries.contains_key(key) {
            trace!(key, "remove: key not present");
            return Ok(None);
        }

        self.set_comment(key, &[] as &[&str])?;

        let key_idx = self
            .index_of(key)
            .ok_or_else(|| PropertiesError::Internal(format!("key {key:?} vanished before removal")))?;

        let mut cursor = self.cursor_at(key_idx as isize);
        let removed = cursor.remove();
        if !matches!(removed.as_ref().map(|t| t.kind), Some(TokenKind::Key)) {
            return Err(PropertiesError::Internal("expected KEY token at recorded position during remove".into()));
        }
        let removed = cursor.remove();
        if !matches!(removed.as_ref().map(|t| t.kind), Some(TokenKind::Separator)) {
            return Err(PropertiesError::Internal("expected SEPARATOR token after KEY during remove".into()));
        }
        let removed = cursor.remove();
        if !matches!(removed.as_ref().map(|t| t.kind), Some(TokenKind::Value)) {
            return Err(PropertiesError::Internal("expected VALUE token after SEPARATOR during remove".into()));
        }
        if cursor.is_eol() {
            cursor.remove();
        }

        Ok(self.entries.shift_remove(key))
    }

    /// Removes every entry for which `keep` returns `false`, routing each
    /// removal through [`Document::remove`] so tokens and entries stay
    /// consistent. Returns the removed keys, in the order they were
    /// removed. The idiomatic Rust stand-in for "the entries iterator
    /// supports removal": a live iterator that both walks `entries` and
    /// hands back a token-sequence-mutating handle isn't expressible
    /// without aliasing `self` mutably twice at once.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) -> Result<Vec<String>> {
        let doomed: Vec<String> = self.entries.iter().filter(|(k, v)| !keep(k, v)).map(|(k, _)| k.clone()).collect();
        let mut removed = Vec::with_capacity(doomed.len());
        for key in doomed {
            self.remove(&key)?;
            removed.push(key);
        }
        Ok(removed)
    }

    /// Empties both the token sequence and the entry map.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.entries.clear();
    }

    /// Replaces the comment block attached to `key` with `comments`.
    /// Errors with [`PropertiesError::NoSuchElement`] if `key` is absent.
    /// Lines already starting with a recognized prefix (`"# "`, `"#"`,
    /// `"! "`, `"!"`) are kept as-is and become the running default
    /// prefix for subsequent un-prefixed lines; otherwise the block's
    /// existing prefix family is used (defaulting to `"# "` for a
    /// previously empty block).
    pub fn set_comment<S: AsRef<str>>(&mut self, key: &str, comments: &[S]) -> Result<()> {
        let key_idx = self.index_of(key).ok_or_else(|| PropertiesError::NoSuchElement { key: key.to_string() })?;
        let old_positions = self.attached_comment_positions(key_idx);

        // The "first" existing comment, in the sense that matters for
        // prefix inheritance, is the one the backward walk from the key
        // reaches first — i.e. the one immediately above the key, last
        // in source order — not the topmost comment of the block.
        let mut prefix = old_positions.last().map(|&i| comment_prefix(&self.tokens[i].raw)).unwrap_or_else(|| "# ".to_string());

        let mut new_lines = Vec::with_capacity(comments.len());
        for line in comments {
            let line = line.as_ref();
            match detect_prefix(line) {
                Some(p) => {
                    prefix = p;
                    new_lines.push(line.to_string());
                }
                None => new_lines.push(format!("{prefix}{line}")),
            }
        }

        let overwrite_count = old_positions.len().min(new_lines.len());
        for i in 0..overwrite_count {
            let pos = old_positions[i];
            let mut cursor = self.cursor_at(pos as isize);
            cursor.replace(Token::new(TokenKind::Comment, new_lines[i].clone()));
        }

        if old_positions.len() > new_lines.len() {
            // When some comments are kept, also keep the EOL right after
            // the last of them (it terminates that line); only the
            // excess comments and their own trailing EOLs are removed.
            let delete_start = if overwrite_count > 0 { old_positions[overwrite_count - 1] + 2 } else { old_positions[0] };
            let delete_end = self.index_of(key).ok_or_else(|| PropertiesError::Internal("key vanished during set_comment".into()))?;
            let mut cursor = self.cursor_at(delete_start as isize);
            for _ in delete_start..delete_end {
                cursor.remove();
            }
        } else if new_lines.len() > old_positions.len() {
            let insert_at = self.index_of(key).ok_or_else(|| PropertiesError::Internal("key vanished during set_comment".into()))?;
            let newline = determine_newline(&self.tokens);
            let mut cursor = self.cursor_at(insert_at as isize);
            // Cursor::add inserts *before* the current index and advances
            // past it, so adding in order at a fixed starting position
            // naturally builds the extra lines immediately before KEY.
            for extra in &new_lines[overwrite_count..] {
                cursor.add(Token::new(TokenKind::Comment, extra.clone()));
                cursor.add_eol(newline);
            }
        }

        Ok(())
    }

    /// An independent `Document` with every KEY/VALUE token's raw text
    /// rewritten so characters above Latin-1 become `\uXXXX` escapes.
    /// Decoded entries are unchanged; `defaults` is transformed
    /// recursively into a fresh chain.
    pub fn escaped(&self) -> Document {
        self.transform_view(&to_unicode_escapes)
    }

    /// An independent `Document` with every KEY/VALUE token's raw text
    /// rewritten so `\uXXXX` escapes become the literal character.
    pub fn unescaped(&self) -> Document {
        self.transform_view(&from_unicode_escapes)
    }

    /// Resolves the `defaults` chain into a single `Document` with no
    /// `defaults` link: entries are the full shadow-resolved view
    /// (`string_property_names` order), with tokens synthesized fresh via
    /// `put`, since a merge of several source texts has no single
    /// original formatting to preserve.
    pub fn flattened(&self) -> Document {
        let mut flat = Document::new();
        for key in self.string_property_names() {
            if let Some(value) = self.get_property(&key) {
                let _ = flat.put(key, value.to_string());
            }
        }
        flat
    }

    fn transform_view(&self, f: &dyn Fn(&str) -> String) -> Document {
        let tokens = self
            .tokens
            .iter()
            .map(|t| {
                if matches!(t.kind, TokenKind::Key | TokenKind::Value) {
                    Token::with_decoded(t.kind, f(&t.raw), t.text().to_string())
                } else {
                    t.clone()
                }
            })
            .collect();
        let defaults = self.defaults.as_ref().map(|d| Rc::new(d.transform_view(f)));
        Document { tokens, entries: self.entries.clone(), defaults }
    }

    fn cursor_at(&mut self, position: isize) -> Cursor<'_> {
        Cursor::new(&mut self.tokens, position)
    }

    /// The token position of `key`'s KEY token, or `None` if absent. If a
    /// key was written more than once, the *last* occurrence is returned
    /// — consistent with `entries` holding the last-written value.
    fn index_of(&self, key: &str) -> Option<usize> {
        self.tokens.iter().enumerate().filter(|(_, t)| t.kind == TokenKind::Key && t.text() == key).map(|(i, _)| i).last()
    }

    /// Walks backward from a KEY position collecting its attached
    /// comment block, per §4.3: at most one non-EOL whitespace, then a
    /// mandatory EOL, then a COMMENT to continue; anything else (in
    /// particular, a second consecutive EOL — a blank line) stops the
    /// walk. Returned in source order.
    fn attached_comment_positions(&self, key_idx: usize) -> Vec<usize> {
        let mut result = Vec::new();
        let mut i = key_idx as isize;
        loop {
            let mut j = i - 1;
            if j >= 0 && self.tokens[j as usize].is_ws() {
                j -= 1;
            }
            if j >= 0 && self.tokens[j as usize].is_eol() {
                j -= 1;
            } else {
                break;
            }
            if j >= 0 && self.tokens[j as usize].kind == TokenKind::Comment {
                result.push(j as usize);
                i = j;
            } else {
                break;
            }
        }
        result.reverse();
        result
    }

    /// Finds the position just past any header comment block: a leading
    /// non-EOL whitespace, then repeated (COMMENT, optional EOL, optional
    /// non-EOL whitespace) runs, then any trailing EOLs. If that walk
    /// instead lands on a KEY, the comments found are attached to the
    /// first property rather than being a free-floating header, so there
    /// is no header to skip — position 0 is returned.
    fn skip_header_comment_lines(&self) -> usize {
        let mut pos = 0;
        if matches!(self.tokens.get(pos), Some(t) if t.is_ws()) {
            pos += 1;
        }
        loop {
            match self.tokens.get(pos) {
                Some(t) if t.kind == TokenKind::Comment => {
                    pos += 1;
                    if matches!(self.tokens.get(pos), Some(t) if t.is_eol()) {
                        pos += 1;
                    }
                    if matches!(self.tokens.get(pos), Some(t) if t.is_ws()) {
                        pos += 1;
                    }
                }
                _ => break,
            }
        }
        if matches!(self.tokens.get(pos), Some(t) if t.kind == TokenKind::Key) {
            return 0;
        }
        while matches!(self.tokens.get(pos), Some(t) if t.is_eol()) {
            pos += 1;
        }
        pos
    }

    /// Appends a brand-new KEY/SEPARATOR/VALUE triple. Rewinds from the
    /// end past trailing WHITESPACE/COMMENT tokens to find the last
    /// VALUE (or the very start, if there is none); inserts a new EOL
    /// there first if the value isn't already EOL-terminated, then
    /// inserts the triple right after that point — ahead of any
    /// trailing free-floating comment block, which is left undisturbed
    /// at the tail.
    fn append_new_property(&mut self, key: &str, value: &str) {
        let has_any_key = self.tokens.iter().any(|t| t.kind == TokenKind::Key);
        if !has_any_key && !self.tokens.is_empty() {
            self.append_raw_after_header(&escape_key(key), key, &escape_value(value), value);
            return;
        }
        self.append_raw_property(&escape_key(key), key, &escape_value(value), value);
    }

    fn append_raw_property(&mut self, raw_key: &str, key: &str, raw_value: &str, value: &str) {
        let mut idx = self.tokens.len();
        while idx > 0 && matches!(self.tokens[idx - 1].kind, TokenKind::Whitespace | TokenKind::Comment) {
            idx -= 1;
        }
        let needs_eol = idx > 0 && !self.tokens[idx - 1].is_eol();
        let newline = determine_newline(&self.tokens);

        let mut cursor = self.cursor_at(idx as isize);
        if needs_eol {
            cursor.add_eol(newline);
        }
        cursor.add(Token::with_decoded(TokenKind::Key, raw_key, key));
        cursor.add(Token::new(TokenKind::Separator, "="));
        cursor.add(Token::with_decoded(TokenKind::Value, raw_value, value));
    }

    fn append_raw_after_header(&mut self, raw_key: &str, key: &str, raw_value: &str, value: &str) {
        let pos = self.skip_header_comment_lines();
        let newline = determine_newline(&self.tokens);
        let mut cursor = self.cursor_at(pos as isize);
        cursor.add_eol(newline);
        cursor.add_eol(newline);
        cursor.add(Token::with_decoded(TokenKind::Key, raw_key, key));
        cursor.add(Token::new(TokenKind::Separator, "="));
        cursor.add(Token::with_decoded(TokenKind::Value, raw_value, value));
    }
}

fn comment_prefix(raw: &str) -> String {
    detect_prefix(raw).unwrap_or_else(|| "# ".to_string())
}

fn detect_prefix(line: &str) -> Option<String> {
    if line.starts_with("# ") {
        Some("# ".to_string())
    } else if line.starts_with("! ") {
        Some("! ".to_string())
    } else if line.starts_with('#') {
        Some("#".to_string())
    } else if line.starts_with('!') {
        Some("!".to_string())
    } else {
        None
    }
}

/// Byte-to-`String` decoding selector for [`Document::load_path`] and
/// [`Document::store_path`]. The core itself consumes `&str`/`String`
/// only (§1: byte I/O and encoding selection are external collaborators)
/// — this enum is the thin selector those convenience wrappers need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Each byte maps to the identically-numbered Unicode scalar value —
    /// the classic `.properties` default, and a total, infallible
    /// function, so no table or external crate is needed for it.
    Iso8859_1,
    Utf8,
}

impl Encoding {
    fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Encoding::Iso8859_1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            Encoding::Utf8 => std::str::from_utf8(bytes).map(str::to_string).map_err(|e| {
                PropertiesError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            }),
        }
    }

    fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Iso8859_1 => text.chars().map(|c| (c as u32).min(0xFF) as u8).collect(),
            Encoding::Utf8 => text.as_bytes().to_vec(),
        }
    }
}

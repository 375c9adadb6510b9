//! Lossless reader/writer for the classic `.properties` file format.
//!
//! A [`Document`] holds a token sequence — the exact source text, broken
//! into [`lexer::Token`]s — alongside an insertion-ordered map of decoded
//! keys to decoded values. Mutating the map (`put`, `remove`,
//! `set_comment`, ...) edits the token sequence in place through a
//! cursor, so untouched regions of the original text are never
//! reformatted. `Document::store`/`to_string_lossless` write the token
//! sequence back out, byte for byte, wherever the caller hasn't edited
//! it.
//!
//! ```
//! use properties::Document;
//!
//! let mut doc = Document::load_str("name = value\n# a comment\nother=thing\n").unwrap();
//! assert_eq!(doc.get("name"), Some("value"));
//! doc.put("name", "replaced").unwrap();
//! assert_eq!(doc.to_string_lossless(), "name = replaced\n# a comment\nother=thing\n");
//! ```

mod cursor;
mod document;
mod error;
mod escape;
mod newline;

pub use document::{Document, Encoding};
pub use error::{PropertiesError, Result};
pub use escape::{escape_key, escape_value, from_unicode_escapes, to_unicode_escapes, unescape};
pub use newline::{determine_newline, Newline};

#[cfg(test)]
mod tests;

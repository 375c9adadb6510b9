//! Scanner for the classic `.properties` line-oriented file format.
//!
//! This crate owns only the first stage of the pipeline: turning source
//! text into a flat sequence of [`Token`]s that, concatenated in order,
//! reproduce the input byte for byte. It knows nothing about keys being
//! looked up, comments being attached to properties, or any other
//! document-level concept — that lives one layer up, in the `properties`
//! crate.

mod cursor;
mod error;
mod scanner;
mod token;

pub use error::LexError;
pub use scanner::Scanner;
pub use token::{Token, TokenKind};

#[cfg(test)]
mod tests;

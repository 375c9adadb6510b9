use thiserror::Error;

/// Failure raised while scanning. The only malformed-input case the
/// scanner recognizes on its own: every other irregularity in the
/// classic `.properties` grammar is accepted and preserved verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("invalid \\uXXXX escape at byte offset {position}: expected four hex digits")]
    InvalidUnicodeEscape { position: usize },
}

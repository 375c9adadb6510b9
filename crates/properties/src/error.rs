use thiserror::Error;

/// Everything that can go wrong operating on a [`crate::Document`].
///
/// Mutators never leave a `Document` partially edited: every variant here
/// is raised *before* any token-sequence or entry-map mutation is
/// committed, except [`PropertiesError::Lex`], which can surface after
/// the scanner has already appended tokens mid-stream (see the scanner's
/// own failure semantics).
#[derive(Debug, Error)]
pub enum PropertiesError {
    #[error(transparent)]
    Lex(#[from] lexer::LexError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no such element: key {key:?} has no attached comment block to set")]
    NoSuchElement { key: String },

    #[error("internal invariant violation: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PropertiesError>;

//! Error types for lexical analysis.

use thiserror::Error;

/// Fatal lexical errors.
///
/// The scanner has no recovery: the first invalid character aborts the
/// whole compilation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    /// A character outside the source alphabet.
    #[error("Invalid character")]
    InvalidCharacter,

    /// An identifier or number longer than [`crate::MAX_LEXEME`] bytes.
    #[error("Token too long")]
    TokenTooLong,
}

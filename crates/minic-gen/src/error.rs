//! Error types for code generation.

use thiserror::Error;

/// Fatal code generation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeGenError {
    /// A named operand has no symbol table entry.
    #[error("Undeclared identifier")]
    UndeclaredIdentifier,

    /// Internal error - indicates a bug in an earlier pass.
    #[error("Internal error: {0}")]
    Internal(String),
}

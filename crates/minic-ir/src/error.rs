//! Error types for the shared IR structures.

use thiserror::Error;

/// Errors raised by [`crate::SymbolTable`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbolError {
    /// A name was declared twice.
    #[error("Duplicate declaration")]
    DuplicateDeclaration,

    /// More than [`crate::SYM_CAP`] symbols.
    #[error("Symbol table overflow")]
    TableOverflow,

    /// An index past the end of the table.
    #[error("Invalid symbol index")]
    InvalidIndex,
}

/// Errors raised by [`crate::QuadBuffer`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuadError {
    /// More than [`crate::QUAD_CAP`] quadruples.
    #[error("Quadruple buffer overflow")]
    BufferOverflow,

    /// A patch aimed at a position that holds no quadruple.
    #[error("Invalid quadruple position")]
    InvalidPosition,
}

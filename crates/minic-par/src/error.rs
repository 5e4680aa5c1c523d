//! Error types for parsing.
//!
//! All parse errors are fatal; there is no resynchronization. Each variant
//! names the expectation that was not met, in the wording the compiler
//! reports to the user.

use minic_ir::{QuadError, SymbolError};
use minic_lex::LexError;
use thiserror::Error;

/// Fatal syntax and symbol errors raised while parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing ;")]
    MissingSemicolon,

    #[error("Missing =")]
    MissingAssign,

    #[error("Missing (")]
    MissingLParen,

    #[error("Missing )")]
    MissingRParen,

    #[error("Missing if")]
    MissingIf,

    #[error("Missing while")]
    MissingWhile,

    #[error("Missing return")]
    MissingReturn,

    #[error("Missing identifier")]
    MissingIdentifier,

    #[error("Invalid statement")]
    InvalidStatement,

    #[error("Invalid factor")]
    InvalidFactor,

    #[error("Invalid relation operator")]
    InvalidRelationOperator,

    #[error("Invalid type")]
    InvalidType,

    #[error("Invalid return statement")]
    InvalidReturnStatement,

    /// A name was used before being declared.
    #[error("Undeclared identifier")]
    UndeclaredIdentifier,

    /// Tokens remained after the top-level parse completed.
    #[error("Syntax error")]
    SyntaxError,

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Symbol(#[from] SymbolError),

    #[error(transparent)]
    Quad(#[from] QuadError),
}

//! Error types for the semantic pass.

use minic_ir::SymbolError;
use thiserror::Error;

/// Fatal semantic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemError {
    /// A named operand is not in the symbol table.
    #[error("Undeclared identifier")]
    UndeclaredIdentifier,

    /// Operand types differ.
    #[error("Type mismatch")]
    TypeMismatch,

    /// Division or modulus by a known zero.
    #[error("Divide by zero")]
    DivideByZero,

    /// A returned value is neither `int` nor `char`.
    #[error("Invalid return type")]
    InvalidReturnType,

    /// A quadruple is structurally malformed (an empty required operand).
    #[error("Invalid quadruple")]
    InvalidQuad,

    #[error(transparent)]
    Symbol(#[from] SymbolError),
}

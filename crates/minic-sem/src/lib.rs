//! minic-sem - Semantic pass over the quadruple stream.
//!
//! Runs after parsing and before code generation. The pass walks the
//! quadruple sequence in emission order and
//!
//! - assigns stack offsets: one word per declaration, in declaration
//!   order, then one word per intermediate temporary;
//! - registers temporaries in the symbol table so the code generator can
//!   resolve every named operand;
//! - checks operand types for equality and return values for returnable
//!   types;
//! - folds constants best-effort, which is how a division or modulus by a
//!   known zero is rejected before any code is generated.
//!
//! The pass never rewrites quadruples; it only populates the symbol table.

mod analysis;
mod error;

pub use analysis::Analyzer;
pub use error::SemError;

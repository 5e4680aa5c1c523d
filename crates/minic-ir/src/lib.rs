//! minic-ir - Shared intermediate representation.
//!
//! Two data structures couple the compiler's passes together:
//!
//! - the [`SymbolTable`], written by the parser (declarations) and the
//!   semantic pass (temporaries, offsets, values), read by the code
//!   generator;
//! - the [`QuadBuffer`], the ordered three-address instruction sequence
//!   the parser emits into and the later passes walk.
//!
//! Quadruple positions are 0-based, stable, and never renumbered; the only
//! in-place mutation the buffer permits is patching a branch target through
//! [`QuadBuffer::patch`].

mod error;
mod quad;
mod symbol;

pub use error::{QuadError, SymbolError};
pub use quad::{Quad, QuadBuffer, QuadOp, QUAD_CAP};
pub use symbol::{SymKind, Symbol, SymbolTable, Type, SYM_CAP, WORD_SIZE};

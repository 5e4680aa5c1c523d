//! minic-gen - Pseudo-MIPS code generation.
//!
//! Lowers the quadruple sequence to a textual MIPS-family listing. The
//! register discipline is fixed and naive: operands load into `$t0` and
//! `$t1`, arithmetic results land in `$t2`, return values in `$v0`. Every
//! named operand resolves through the symbol table to a `N($sp)` stack
//! slot; numeric literals are materialized with `LI`. There is no peephole
//! pass and no register reuse across quadruples.

mod asm;
mod error;

pub use asm::AsmGenerator;
pub use error::CodeGenError;

//! The assembly generator.

use std::fmt::Write;

use minic_ir::{Quad, QuadBuffer, QuadOp, SymbolTable};

use crate::error::CodeGenError;

/// Lowers quadruples to pseudo-MIPS text.
///
/// Output accumulates in an internal buffer; the driver writes it to the
/// target file. Each quadruple lowers to a fixed number of lines, so the
/// listing's length is a deterministic function of the quadruple sequence.
pub struct AsmGenerator<'a> {
    symbols: &'a SymbolTable,
    output: String,
}

impl<'a> AsmGenerator<'a> {
    /// Creates a generator resolving operands against `symbols`.
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self {
            symbols,
            output: String::new(),
        }
    }

    /// Lowers the whole quadruple sequence and returns the listing.
    pub fn generate(mut self, quads: &QuadBuffer) -> Result<String, CodeGenError> {
        for quad in quads.iter() {
            self.lower(quad)?;
        }
        Ok(self.output)
    }

    fn lower(&mut self, quad: &Quad) -> Result<(), CodeGenError> {
        match quad.op {
            QuadOp::Dec => self.lower_declaration(quad),
            QuadOp::Assign => self.lower_assignment(quad),
            QuadOp::Add | QuadOp::Sub | QuadOp::Mul | QuadOp::Div | QuadOp::Rem => {
                self.lower_arithmetic(quad)
            }
            QuadOp::Lt | QuadOp::Le | QuadOp::Gt | QuadOp::Ge | QuadOp::Eq | QuadOp::Ne => {
                self.lower_branch(quad)
            }
            QuadOp::Jmp => {
                self.line(format_args!("J {}", quad.result));
                Ok(())
            }
            QuadOp::Ret => self.lower_return(quad),
        }
    }

    /// `(DEC, type, , name)` → grow the stack by one word.
    fn lower_declaration(&mut self, quad: &Quad) -> Result<(), CodeGenError> {
        if self.symbols.lookup(&quad.result).is_none() {
            return Err(CodeGenError::UndeclaredIdentifier);
        }
        self.line(format_args!("SUB $sp, $sp, 4"));
        Ok(())
    }

    /// `(=, src, , dst)` → load the source, store to the target's slot.
    fn lower_assignment(&mut self, quad: &Quad) -> Result<(), CodeGenError> {
        self.load("$t0", &quad.arg1)?;
        let offset = self.offset_of(&quad.result)?;
        self.line(format_args!("SW $t0, {offset}($sp)"));
        Ok(())
    }

    /// `(op, left, right, temp)` → two loads and one ALU op into `$t2`.
    fn lower_arithmetic(&mut self, quad: &Quad) -> Result<(), CodeGenError> {
        self.load("$t0", &quad.arg1)?;
        self.load("$t1", &quad.arg2)?;
        let mnemonic = match quad.op {
            QuadOp::Add => "ADD",
            QuadOp::Sub => "SUB",
            QuadOp::Mul => "MUL",
            QuadOp::Div => "DIV",
            QuadOp::Rem => "REM",
            _ => unreachable!("caller matched an arithmetic op"),
        };
        self.line(format_args!("{mnemonic} $t2, $t0, $t1"));
        Ok(())
    }

    /// `(relop, left, right, target)` → two loads and a conditional branch
    /// to the back-patched quadruple position.
    fn lower_branch(&mut self, quad: &Quad) -> Result<(), CodeGenError> {
        self.load("$t0", &quad.arg1)?;
        self.load("$t1", &quad.arg2)?;
        let mnemonic = match quad.op {
            QuadOp::Lt => "BLT",
            QuadOp::Le => "BLE",
            QuadOp::Gt => "BGT",
            QuadOp::Ge => "BGE",
            QuadOp::Eq => "BEQ",
            QuadOp::Ne => "BNE",
            _ => unreachable!("caller matched a relational op"),
        };
        self.line(format_args!("{mnemonic} $t0, $t1, {}", quad.result));
        Ok(())
    }

    /// `(RET, value?, , )` → optionally load `$v0`, then jump to `$ra`.
    fn lower_return(&mut self, quad: &Quad) -> Result<(), CodeGenError> {
        if !quad.arg1.is_empty() {
            self.load("$v0", &quad.arg1)?;
        }
        self.line(format_args!("JR $ra"));
        Ok(())
    }

    /// Emits the load of one operand into `reg`: `LI` for a numeric
    /// literal, `LW` from the stack slot for a named symbol.
    fn load(&mut self, reg: &str, operand: &str) -> Result<(), CodeGenError> {
        if operand.parse::<i32>().is_ok() {
            self.line(format_args!("LI {reg}, {operand}"));
            return Ok(());
        }
        let offset = self.offset_of(operand)?;
        self.line(format_args!("LW {reg}, {offset}($sp)"));
        Ok(())
    }

    /// Resolves a name to its assigned stack offset.
    fn offset_of(&self, name: &str) -> Result<i32, CodeGenError> {
        let symbol = self
            .symbols
            .get_by_name(name)
            .ok_or(CodeGenError::UndeclaredIdentifier)?;
        symbol.offset.ok_or_else(|| {
            CodeGenError::Internal(format!("no stack offset assigned to '{name}'"))
        })
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        // Writing to a String cannot fail
        let _ = writeln!(self.output, "{args}");
    }
}

//! The semantic analyzer.

use minic_ir::{QuadBuffer, QuadOp, SymKind, SymbolTable, Type, WORD_SIZE};
use rustc_hash::FxHashMap;

use crate::error::SemError;

/// A resolved operand: its type, and its value when that is knowable at
/// compile time.
///
/// Operands come in three kinds: numeric literals (type `int`, value
/// known), temporaries (type recorded at their defining quadruple, value
/// known only if it was folded), and declared names (value never known;
/// variables are runtime state).
struct Operand {
    ty: Type,
    value: Option<i32>,
}

/// Semantic pass over one compilation's quadruple stream.
pub struct Analyzer<'a> {
    quads: &'a QuadBuffer,
    symbols: &'a mut SymbolTable,
    /// Next free stack offset.
    offset: i32,
    /// Folded values of temporaries.
    known: FxHashMap<String, i32>,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer over the parser's output.
    pub fn new(quads: &'a QuadBuffer, symbols: &'a mut SymbolTable) -> Self {
        Self {
            quads,
            symbols,
            offset: 0,
            known: FxHashMap::default(),
        }
    }

    /// Runs the pass over every quadruple, in order.
    pub fn run(mut self) -> Result<(), SemError> {
        for quad in self.quads.iter() {
            match quad.op {
                QuadOp::Dec => self.check_declaration(&quad.result)?,
                QuadOp::Assign => self.check_assignment(&quad.arg1, &quad.result)?,
                QuadOp::Add | QuadOp::Sub | QuadOp::Mul | QuadOp::Div | QuadOp::Rem => {
                    self.check_arithmetic(quad.op, &quad.arg1, &quad.arg2, &quad.result)?
                }
                QuadOp::Lt
                | QuadOp::Le
                | QuadOp::Gt
                | QuadOp::Ge
                | QuadOp::Eq
                | QuadOp::Ne => self.check_relation(&quad.arg1, &quad.arg2)?,
                QuadOp::Jmp => {}
                QuadOp::Ret => self.check_return(&quad.arg1)?,
            }
        }
        Ok(())
    }

    /// `(DEC, type, , name)`: hand the declared variable the next stack
    /// slot.
    fn check_declaration(&mut self, name: &str) -> Result<(), SemError> {
        let index = self
            .symbols
            .lookup(name)
            .ok_or(SemError::UndeclaredIdentifier)?;
        let slot = self.next_slot();
        self.symbols.set_offset(index, slot)?;
        Ok(())
    }

    /// `(=, src, , dst)`: types must match; a known source value is
    /// propagated onto the target symbol.
    fn check_assignment(&mut self, src: &str, dst: &str) -> Result<(), SemError> {
        let src = self.resolve_operand(src)?;
        let index = self
            .symbols
            .lookup(dst)
            .ok_or(SemError::UndeclaredIdentifier)?;
        if src.ty != self.symbols.get(index)?.ty {
            return Err(SemError::TypeMismatch);
        }
        if let Some(value) = src.value {
            self.symbols.update_value(index, value)?;
        }
        Ok(())
    }

    /// `(op, left, right, temp)`: types must match; the result temporary
    /// enters the symbol table with its own stack slot and, when both
    /// operands are known, a folded value.
    fn check_arithmetic(
        &mut self,
        op: QuadOp,
        left: &str,
        right: &str,
        result: &str,
    ) -> Result<(), SemError> {
        let left = self.resolve_operand(left)?;
        let right = self.resolve_operand(right)?;
        if left.ty != right.ty {
            return Err(SemError::TypeMismatch);
        }
        if matches!(op, QuadOp::Div | QuadOp::Rem) && right.value == Some(0) {
            return Err(SemError::DivideByZero);
        }
        if result.is_empty() {
            return Err(SemError::InvalidQuad);
        }

        let folded = match (left.value, right.value) {
            (Some(a), Some(b)) => fold(op, a, b),
            _ => None,
        };

        let index = self.symbols.insert(
            result,
            SymKind::Temporary,
            left.ty,
            folded.unwrap_or(0),
        )?;
        let slot = self.next_slot();
        self.symbols.set_offset(index, slot)?;
        if let Some(value) = folded {
            self.known.insert(result.to_string(), value);
        }
        Ok(())
    }

    /// `(relop, left, right, target)`: operand types must match. The
    /// target is a quadruple position and needs no checking here.
    fn check_relation(&mut self, left: &str, right: &str) -> Result<(), SemError> {
        let left = self.resolve_operand(left)?;
        let right = self.resolve_operand(right)?;
        if left.ty != right.ty {
            return Err(SemError::TypeMismatch);
        }
        Ok(())
    }

    /// `(RET, value?, , )`: a present value must be `int` or `char`.
    fn check_return(&mut self, value: &str) -> Result<(), SemError> {
        if value.is_empty() {
            return Ok(());
        }
        let operand = self.resolve_operand(value)?;
        match operand.ty {
            Type::Int | Type::Char => Ok(()),
            Type::Void => Err(SemError::InvalidReturnType),
        }
    }

    /// Classifies an operand as literal, temporary, or declared name.
    ///
    /// A literal operand enters the symbol table as a constant the first
    /// time it is seen, value recorded; repeated uses of the same literal
    /// share one entry. Constants occupy no stack slot.
    fn resolve_operand(&mut self, text: &str) -> Result<Operand, SemError> {
        if text.is_empty() {
            return Err(SemError::InvalidQuad);
        }
        if let Ok(value) = text.parse::<i32>() {
            if self.symbols.lookup(text).is_none() {
                self.symbols
                    .insert(text, SymKind::Constant, Type::Int, value)?;
            }
            return Ok(Operand {
                ty: Type::Int,
                value: Some(value),
            });
        }
        match self.symbols.get_by_name(text) {
            Some(symbol) => Ok(Operand {
                ty: symbol.ty,
                value: self.known.get(text).copied(),
            }),
            None => Err(SemError::UndeclaredIdentifier),
        }
    }

    fn next_slot(&mut self) -> i32 {
        let slot = self.offset;
        self.offset += WORD_SIZE;
        slot
    }
}

/// Evaluates `op` over two known values. Overflow makes the result
/// unknown again rather than wrapping.
fn fold(op: QuadOp, a: i32, b: i32) -> Option<i32> {
    match op {
        QuadOp::Add => a.checked_add(b),
        QuadOp::Sub => a.checked_sub(b),
        QuadOp::Mul => a.checked_mul(b),
        QuadOp::Div => a.checked_div(b),
        QuadOp::Rem => a.checked_rem(b),
        _ => None,
    }
}

//! Expression, term, factor, and condition parsing.
//!
//! Each function returns the *place* its value lives in: an identifier, a
//! numeric literal's text, or a freshly minted temporary. Binary steps
//! emit `(op, left, right, temp)` quadruples left-to-right, so `* / %`
//! bind tighter than `+ -` simply by the call structure.

use minic_ir::{Quad, QuadOp};
use minic_lex::TokenKind;

use crate::{ParseError, Parser};

impl<'a> Parser<'a> {
    /// `Expression ::= Term { ('+'|'-') Term }`
    pub(crate) fn parse_expression(&mut self) -> Result<String, ParseError> {
        let mut place = self.parse_term()?;
        loop {
            let op = if self.current.is_operator("+") {
                QuadOp::Add
            } else if self.current.is_operator("-") {
                QuadOp::Sub
            } else {
                break;
            };
            self.advance()?;
            let right = self.parse_term()?;
            let temp = self.temps.fresh();
            self.quads
                .emit(Quad::new(op, place, right, temp.clone()))?;
            place = temp;
        }
        Ok(place)
    }

    /// `Term ::= Factor { ('*'|'/'|'%') Factor }`
    pub(crate) fn parse_term(&mut self) -> Result<String, ParseError> {
        let mut place = self.parse_factor()?;
        loop {
            let op = if self.current.is_operator("*") {
                QuadOp::Mul
            } else if self.current.is_operator("/") {
                QuadOp::Div
            } else if self.current.is_operator("%") {
                QuadOp::Rem
            } else {
                break;
            };
            self.advance()?;
            let right = self.parse_factor()?;
            let temp = self.temps.fresh();
            self.quads
                .emit(Quad::new(op, place, right, temp.clone()))?;
            place = temp;
        }
        Ok(place)
    }

    /// `Factor ::= Identifier | Number | '(' Expression ')'`
    ///
    /// An identifier must already be declared.
    pub(crate) fn parse_factor(&mut self) -> Result<String, ParseError> {
        match self.current.kind {
            TokenKind::Identifier => {
                let name = self.current.lexeme.clone();
                if self.symbols.lookup(&name).is_none() {
                    return Err(ParseError::UndeclaredIdentifier);
                }
                self.advance()?;
                Ok(name)
            }
            TokenKind::Number => {
                let literal = self.current.lexeme.clone();
                self.advance()?;
                Ok(literal)
            }
            TokenKind::Delimiter if self.current.lexeme == "(" => {
                self.advance()?;
                let place = self.parse_expression()?;
                self.expect_delimiter(")", ParseError::MissingRParen)?;
                Ok(place)
            }
            _ => Err(ParseError::InvalidFactor),
        }
    }

    /// `Condition ::= Expression RelOp Expression`
    ///
    /// Emits the branch pair `(relop, left, right, trueL)` and
    /// `(JMP, , , falseL)` and returns both labels for the caller to
    /// resolve.
    pub(crate) fn parse_condition(&mut self) -> Result<(String, String), ParseError> {
        let left = self.parse_expression()?;

        let op = match self.current.kind {
            TokenKind::Operator => QuadOp::from_operator(&self.current.lexeme)
                .filter(|op| op.is_relational())
                .ok_or(ParseError::InvalidRelationOperator)?,
            _ => return Err(ParseError::InvalidRelationOperator),
        };
        self.advance()?;

        let right = self.parse_expression()?;

        let true_label = self.labels.fresh();
        let false_label = self.labels.fresh();
        self.emit_branch(op, left, right, &true_label)?;
        self.emit_jump(&false_label)?;
        Ok((true_label, false_label))
    }
}

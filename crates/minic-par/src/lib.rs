//! minic-par - Recursive-descent parser and quadruple emitter.
//!
//! The parser drives the grammar below by recursive descent, pulling
//! tokens from the scanner one at a time and emitting quadruples as
//! productions are matched. There is no AST: code generation state (the
//! symbol table, the quadruple buffer, label and temporary counters) is
//! threaded through the parse itself.
//!
//! ```text
//! Program        ::= DeclarationList StatementList
//! DeclarationList::= Declaration DeclarationList | ε
//! Declaration    ::= Type Identifier ';'
//! Type           ::= 'int' | 'char' | 'void'
//! StatementList  ::= Statement StatementList | ε
//! Statement      ::= AssignStmt | IfStmt | WhileStmt | ReturnStmt
//! AssignStmt     ::= Identifier '=' Expression ';'
//! Expression     ::= Term { ('+'|'-') Term }
//! Term           ::= Factor { ('*'|'/'|'%') Factor }
//! Factor         ::= Identifier | Number | '(' Expression ')'
//! IfStmt         ::= 'if' '(' Condition ')' Statement [ 'else' Statement ]
//! Condition      ::= Expression RelOp Expression
//! RelOp          ::= '<'|'<='|'>'|'>='|'=='|'!='
//! WhileStmt      ::= 'while' '(' Condition ')' Statement
//! ReturnStmt     ::= 'return' ';' | 'return' '(' Expression ')' ';'
//! ```
//!
//! The invariant throughout is that `current` holds the next unconsumed
//! token. Forward jumps are emitted against freshly minted labels and
//! resolved through per-label patch-lists (see [`labels`]); after a
//! successful parse every branch target is a plain quadruple position.

mod error;
pub mod labels;
mod expr;
mod stmt;

pub use error::ParseError;

use minic_ir::{Quad, QuadBuffer, QuadOp, SymKind, SymbolTable, Type};
use minic_lex::{Scanner, Token, TokenKind};

use crate::labels::{Labels, Temps};

/// Everything the parser leaves behind for the later passes.
#[derive(Debug)]
pub struct ParseOutput {
    /// The emitted quadruple sequence, branch targets fully resolved.
    pub quads: QuadBuffer,
    /// Declared variables, in declaration order.
    pub symbols: SymbolTable,
}

/// The recursive-descent parser.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    /// The next unconsumed token.
    current: Token,
    quads: QuadBuffer,
    symbols: SymbolTable,
    labels: Labels,
    temps: Temps,
}

impl<'a> Parser<'a> {
    /// Creates a parser over a scanner. No token is consumed until
    /// [`Parser::parse`] runs.
    pub fn new(scanner: Scanner<'a>) -> Self {
        Self {
            scanner,
            current: Token::eof(),
            quads: QuadBuffer::new(),
            symbols: SymbolTable::new(),
            labels: Labels::new(),
            temps: Temps::new(),
        }
    }

    /// Parses a complete program and returns the IR.
    ///
    /// Fails on the first violated expectation; trailing tokens after the
    /// top-level parse are a `Syntax error`.
    pub fn parse(mut self) -> Result<ParseOutput, ParseError> {
        self.advance()?;
        self.parse_program()?;
        if !self.current.is_eof() {
            return Err(ParseError::SyntaxError);
        }
        debug_assert!(
            self.labels.all_resolved(),
            "a minted label was never given a target"
        );
        Ok(ParseOutput {
            quads: self.quads,
            symbols: self.symbols,
        })
    }

    fn parse_program(&mut self) -> Result<(), ParseError> {
        self.parse_declaration_list()?;
        self.parse_statement_list()
    }

    fn parse_declaration_list(&mut self) -> Result<(), ParseError> {
        while self.current.is_type_keyword() {
            self.parse_declaration()?;
        }
        Ok(())
    }

    /// `Declaration ::= Type Identifier ';'`
    ///
    /// Declares the name in the symbol table and emits `(DEC, type, , name)`.
    fn parse_declaration(&mut self) -> Result<(), ParseError> {
        let ty = self.parse_type()?;
        self.advance()?;

        if self.current.kind != TokenKind::Identifier {
            return Err(ParseError::MissingIdentifier);
        }
        let name = self.current.lexeme.clone();
        self.advance()?;

        if !self.current.is_delimiter(";") {
            return Err(ParseError::MissingSemicolon);
        }
        self.symbols.insert(name.clone(), SymKind::Variable, ty, 0)?;
        self.quads
            .emit(Quad::new(QuadOp::Dec, ty.as_str(), "", name))?;
        self.advance()
    }

    /// `Type ::= 'int' | 'char' | 'void'`
    fn parse_type(&mut self) -> Result<Type, ParseError> {
        if self.current.kind == TokenKind::Keyword {
            if let Some(ty) = Type::from_keyword(&self.current.lexeme) {
                return Ok(ty);
            }
        }
        Err(ParseError::InvalidType)
    }

    /// Pulls the next token into `current`.
    pub(crate) fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.scanner.next_token()?;
        Ok(())
    }

    /// Consumes the expected delimiter or fails with `err`.
    pub(crate) fn expect_delimiter(
        &mut self,
        delim: &str,
        err: ParseError,
    ) -> Result<(), ParseError> {
        if self.current.is_delimiter(delim) {
            self.advance()
        } else {
            Err(err)
        }
    }

    /// Emits an unconditional jump against `label`.
    pub(crate) fn emit_jump(&mut self, label: &str) -> Result<(), ParseError> {
        let pos = self.quads.emit(Quad::new(QuadOp::Jmp, "", "", label))?;
        self.labels.attach(label, pos, &mut self.quads)?;
        Ok(())
    }

    /// Emits a conditional branch against `label`.
    pub(crate) fn emit_branch(
        &mut self,
        op: QuadOp,
        arg1: String,
        arg2: String,
        label: &str,
    ) -> Result<(), ParseError> {
        let pos = self.quads.emit(Quad::new(op, arg1, arg2, label))?;
        self.labels.attach(label, pos, &mut self.quads)?;
        Ok(())
    }

    /// Resolves `label` to `target`, patching any waiting branches.
    pub(crate) fn define_label(&mut self, label: &str, target: usize) -> Result<(), ParseError> {
        self.labels
            .define(label, target, &mut self.quads)
            .map_err(Into::into)
    }
}

//! Statement parsing: assignment, if/else, while, return.

use minic_ir::{Quad, QuadOp};
use minic_lex::TokenKind;

use crate::{ParseError, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement_list(&mut self) -> Result<(), ParseError> {
        while self.current.kind == TokenKind::Identifier
            || self.current.is_keyword("if")
            || self.current.is_keyword("while")
            || self.current.is_keyword("return")
        {
            self.parse_statement()?;
        }
        Ok(())
    }

    pub(crate) fn parse_statement(&mut self) -> Result<(), ParseError> {
        if self.current.kind == TokenKind::Identifier {
            self.parse_assign_stmt()
        } else if self.current.is_keyword("if") {
            self.parse_if_stmt()
        } else if self.current.is_keyword("while") {
            self.parse_while_stmt()
        } else if self.current.is_keyword("return") {
            self.parse_return_stmt()
        } else {
            Err(ParseError::InvalidStatement)
        }
    }

    /// `AssignStmt ::= Identifier '=' Expression ';'`
    ///
    /// Emits `(=, place, , name)`. When the place is a numeric literal its
    /// value is recorded on the variable's symbol, best-effort.
    fn parse_assign_stmt(&mut self) -> Result<(), ParseError> {
        let name = self.current.lexeme.clone();
        let index = self
            .symbols
            .lookup(&name)
            .ok_or(ParseError::UndeclaredIdentifier)?;
        self.advance()?;

        if !self.current.is_operator("=") {
            return Err(ParseError::MissingAssign);
        }
        self.advance()?;

        let place = self.parse_expression()?;
        if !self.current.is_delimiter(";") {
            return Err(ParseError::MissingSemicolon);
        }

        self.quads
            .emit(Quad::new(QuadOp::Assign, place.clone(), "", name))?;
        if let Ok(value) = place.parse::<i32>() {
            self.symbols.update_value(index, value)?;
        }
        self.advance()
    }

    /// `IfStmt ::= 'if' '(' Condition ')' Statement [ 'else' Statement ]`
    ///
    /// The condition's true label lands on the then-statement. Without an
    /// else, the false label lands just past it; with one, the then-branch
    /// jumps over the else-statement.
    fn parse_if_stmt(&mut self) -> Result<(), ParseError> {
        if !self.current.is_keyword("if") {
            return Err(ParseError::MissingIf);
        }
        self.advance()?;

        if !self.current.is_delimiter("(") {
            return Err(ParseError::MissingLParen);
        }
        self.advance()?;

        let (true_label, false_label) = self.parse_condition()?;
        self.expect_delimiter(")", ParseError::MissingRParen)?;

        self.define_label(&true_label, self.quads.next_pos())?;
        self.parse_statement()?;

        if self.current.is_keyword("else") {
            let end_label = self.labels.fresh();
            self.emit_jump(&end_label)?;
            self.define_label(&false_label, self.quads.next_pos())?;
            self.advance()?;
            self.parse_statement()?;
            self.define_label(&end_label, self.quads.next_pos())?;
        } else {
            self.define_label(&false_label, self.quads.next_pos())?;
        }
        Ok(())
    }

    /// `WhileStmt ::= 'while' '(' Condition ')' Statement`
    ///
    /// The loop's begin label is resolved before the condition is parsed,
    /// so the trailing jump back to it patches immediately.
    fn parse_while_stmt(&mut self) -> Result<(), ParseError> {
        if !self.current.is_keyword("while") {
            return Err(ParseError::MissingWhile);
        }
        self.advance()?;

        if !self.current.is_delimiter("(") {
            return Err(ParseError::MissingLParen);
        }
        self.advance()?;

        let begin_label = self.labels.fresh();
        self.define_label(&begin_label, self.quads.next_pos())?;

        let (true_label, false_label) = self.parse_condition()?;
        self.expect_delimiter(")", ParseError::MissingRParen)?;

        self.define_label(&true_label, self.quads.next_pos())?;
        self.parse_statement()?;
        self.emit_jump(&begin_label)?;
        self.define_label(&false_label, self.quads.next_pos())?;
        Ok(())
    }

    /// `ReturnStmt ::= 'return' ';' | 'return' '(' Expression ')' ';'`
    fn parse_return_stmt(&mut self) -> Result<(), ParseError> {
        if !self.current.is_keyword("return") {
            return Err(ParseError::MissingReturn);
        }
        self.advance()?;

        if self.current.is_delimiter(";") {
            self.quads.emit(Quad::new(QuadOp::Ret, "", "", ""))?;
            self.advance()
        } else if self.current.is_delimiter("(") {
            self.advance()?;
            let place = self.parse_expression()?;
            self.expect_delimiter(")", ParseError::MissingRParen)?;
            if !self.current.is_delimiter(";") {
                return Err(ParseError::MissingSemicolon);
            }
            self.quads.emit(Quad::new(QuadOp::Ret, place, "", ""))?;
            self.advance()
        } else {
            Err(ParseError::InvalidReturnStatement)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseOutput;
    use minic_lex::Scanner;

    fn parse_source(source: &str) -> Result<ParseOutput, ParseError> {
        Parser::new(Scanner::new(source)).parse()
    }

    fn quad_strings(output: &ParseOutput) -> Vec<String> {
        output.quads.iter().map(|q| q.to_string()).collect()
    }

    #[test]
    fn test_if_else_layout() {
        let output = parse_source("int x; if (x < 10) x = 1; else x = 2;").unwrap();
        assert_eq!(
            quad_strings(&output),
            vec![
                "(DEC, int, , x)",
                "(<, x, 10, 3)", // true: then-branch
                "(JMP, , , 5)",  // false: else-branch
                "(=, 1, , x)",
                "(JMP, , , 6)", // skip the else-branch
                "(=, 2, , x)",
            ]
        );
    }

    #[test]
    fn test_if_without_else() {
        let output = parse_source("int x; if (x >= 0) x = 1; x = 2;").unwrap();
        assert_eq!(
            quad_strings(&output),
            vec![
                "(DEC, int, , x)",
                "(>=, x, 0, 3)",
                "(JMP, , , 4)",
                "(=, 1, , x)",
                "(=, 2, , x)",
            ]
        );
    }

    #[test]
    fn test_while_layout() {
        let output = parse_source("int i; while (i < 10) i = i + 1;").unwrap();
        assert_eq!(
            quad_strings(&output),
            vec![
                "(DEC, int, , i)",
                "(<, i, 10, 3)", // true: loop body
                "(JMP, , , 6)",  // false: past the loop
                "(+, i, 1, t0)",
                "(=, t0, , i)",
                "(JMP, , , 1)", // back to the condition
            ]
        );
    }

    #[test]
    fn test_nested_while_in_if() {
        let output =
            parse_source("int i; if (i != 0) while (i > 0) i = i - 1; i = 9;").unwrap();
        assert_eq!(
            quad_strings(&output),
            vec![
                "(DEC, int, , i)",
                "(!=, i, 0, 3)", // true: enter the while
                "(JMP, , , 8)",  // false: past the whole if
                "(>, i, 0, 5)",
                "(JMP, , , 8)",
                "(-, i, 1, t0)",
                "(=, t0, , i)",
                "(JMP, , , 3)", // back to the while condition
                "(=, 9, , i)",
            ]
        );
    }

    #[test]
    fn test_return_without_value() {
        let output = parse_source("return ;").unwrap();
        assert_eq!(quad_strings(&output), vec!["(RET, , , )"]);
    }

    #[test]
    fn test_return_with_expression() {
        let output = parse_source("int x; return (x);").unwrap();
        assert_eq!(
            quad_strings(&output),
            vec!["(DEC, int, , x)", "(RET, x, , )"]
        );
    }

    #[test]
    fn test_return_with_computed_expression() {
        let output = parse_source("int x; return (x + 1);").unwrap();
        assert_eq!(
            quad_strings(&output),
            vec!["(DEC, int, , x)", "(+, x, 1, t0)", "(RET, t0, , )"]
        );
    }

    #[test]
    fn test_invalid_return_statement() {
        assert_eq!(
            parse_source("int x; return x;").unwrap_err(),
            ParseError::InvalidReturnStatement
        );
    }

    #[test]
    fn test_missing_assign() {
        assert_eq!(
            parse_source("int x; x 1;").unwrap_err(),
            ParseError::MissingAssign
        );
    }

    #[test]
    fn test_missing_lparen_in_if() {
        assert_eq!(
            parse_source("int x; if x < 1) x = 1;").unwrap_err(),
            ParseError::MissingLParen
        );
    }

    #[test]
    fn test_missing_rparen_in_while() {
        assert_eq!(
            parse_source("int x; while (x < 1 x = 1;").unwrap_err(),
            ParseError::MissingRParen
        );
    }

    #[test]
    fn test_invalid_statement_as_loop_body() {
        assert_eq!(
            parse_source("int x; while (x < 1) ;").unwrap_err(),
            ParseError::InvalidStatement
        );
    }

    #[test]
    fn test_missing_semicolon_in_assignment() {
        assert_eq!(
            parse_source("int x; x = 1").unwrap_err(),
            ParseError::MissingSemicolon
        );
    }
}

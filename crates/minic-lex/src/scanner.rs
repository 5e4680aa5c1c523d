//! The minic scanner.
//!
//! Produces one token per call, dispatching on the first significant
//! character. Two-character operators are recognized by peeking before
//! consuming, so the cursor never backtracks.

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{is_keyword, Token, TokenKind, MAX_LEXEME};

/// Characters that start an operator.
const OPERATOR_CHARS: &str = "+-*/%<>=!&|";

/// Delimiter characters.
const DELIMITER_CHARS: &str = "(),;{}";

/// Scanner state over a single source buffer.
///
/// The scanner owns the input stream; callers pull tokens with
/// [`Scanner::next_token`]. In echo mode every produced token (except the
/// end-of-file marker) is printed to stdout as `<KIND, lexeme>`, the
/// compiler's scanning trace.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    echo: bool,
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over the given source, with echo off.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            echo: false,
            done: false,
        }
    }

    /// Enables or disables the stdout token trace.
    pub fn echo(mut self, enabled: bool) -> Self {
        self.echo = enabled;
        self
    }

    /// Returns the next token from the input.
    ///
    /// Skips whitespace, then classifies on the first character. Total:
    /// every call yields a token, the end-of-file token, or a fatal
    /// [`LexError`]. An invalid character is echoed as an `ERR` token
    /// before the error is returned.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.cursor.skip_whitespace();

        if self.cursor.is_at_end() {
            self.done = true;
            return Ok(Token::eof());
        }

        let c = self.cursor.current_char();

        let token = if is_ident_start(c) {
            self.scan_identifier()?
        } else if c.is_ascii_digit() {
            self.scan_number()?
        } else if OPERATOR_CHARS.contains(c) {
            self.scan_operator()
        } else if DELIMITER_CHARS.contains(c) {
            self.cursor.advance();
            Token::new(TokenKind::Delimiter, c.to_string())
        } else {
            self.cursor.advance();
            let token = Token::new(TokenKind::Error, c.to_string());
            self.emit(&token);
            self.done = true;
            return Err(LexError::InvalidCharacter);
        };

        self.emit(&token);
        Ok(token)
    }

    /// Scans an identifier or keyword: a letter or `_` followed by the
    /// maximal run of letters, digits, and `_`.
    fn scan_identifier(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start);
        if text.len() > MAX_LEXEME {
            self.done = true;
            return Err(LexError::TokenTooLong);
        }

        let kind = if is_keyword(text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Ok(Token::new(kind, text))
    }

    /// Scans a number: the maximal run of decimal digits.
    fn scan_number(&mut self) -> Result<Token, LexError> {
        let start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start);
        if text.len() > MAX_LEXEME {
            self.done = true;
            return Err(LexError::TokenTooLong);
        }

        Ok(Token::new(TokenKind::Number, text))
    }

    /// Scans an operator.
    ///
    /// After `<`, `>`, `=`, or `!` a trailing `=` is consumed, giving
    /// `<= >= == !=`. `&` and `|` pair only with themselves (`&&`, `||`).
    /// Everything else is a single-character operator.
    fn scan_operator(&mut self) -> Token {
        let start = self.cursor.position();
        let first = self.cursor.current_char();
        self.cursor.advance();

        match first {
            '<' | '>' | '=' | '!' => {
                self.cursor.match_char('=');
            }
            '&' | '|' => {
                self.cursor.match_char(first);
            }
            _ => {}
        }

        Token::new(TokenKind::Operator, self.cursor.slice_from(start))
    }

    fn emit(&self, token: &Token) {
        if self.echo {
            println!("{token}");
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token, LexError>;

    /// Iterates tokens up to and including the first error; the end-of-file
    /// token is not yielded.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_eof() => None,
            item => Some(item),
        }
    }
}

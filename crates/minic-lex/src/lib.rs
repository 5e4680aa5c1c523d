//! minic-lex - Lexical analysis for the minic C subset.
//!
//! The scanner transforms a stream of source characters into a stream of
//! tokens. It is hand-written with a single character of lookahead: a
//! lexeme may read one character past its end, and the cursor never
//! re-reads it because the scanner peeks before consuming.
//!
//! Token categories follow the classic teaching split:
//!
//! - Keywords: `int`, `char`, `if`, `else`, `while`, `return`, `main`, `void`
//! - Identifiers: `[a-zA-Z_][a-zA-Z0-9_]*`
//! - Numbers: decimal digit runs
//! - Operators: `+ - * / % < > = ! & |` and the two-character forms
//!   `<= >= == != && ||`
//! - Delimiters: `( ) , ; { }`
//!
//! The scanner is total: every call to [`Scanner::next`] produces a valid
//! token, the end-of-file token, or a fatal lexical error.

pub mod cursor;
mod error;
mod scanner;
mod token;

pub use error::LexError;
pub use scanner::Scanner;
pub use token::{Token, TokenKind, KEYWORDS, MAX_LEXEME};

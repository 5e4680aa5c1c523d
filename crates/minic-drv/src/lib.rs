//! minic-drv - Compiler driver.
//!
//! The driver owns the edges of the pipeline: command line, source file,
//! target file. Between those edges the phases run strictly in sequence,
//! handing their results forward:
//!
//! ```text
//! source text
//!      │
//!      ▼
//!  [Scanner] ──▶ tokens (echoed to stdout)
//!      │
//!      ▼
//!  [Parser] ──▶ quadruples + symbol table
//!      │
//!      ▼
//!  [Semantic pass] ──▶ offsets, values, checks
//!      │
//!      ▼
//!  [Code generator] ──▶ pseudo-MIPS listing
//!      │
//!      ▼
//! target file (default `target.txt`)
//! ```
//!
//! Every fatal error, from any phase, reaches the user as a single
//! `Error: <message>` line on stdout and exit code 1.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use minic_gen::{AsmGenerator, CodeGenError};
use minic_lex::Scanner;
use minic_par::{ParseError, Parser};
use minic_sem::{Analyzer, SemError};

/// Default target file name, written into the working directory.
pub const DEFAULT_TARGET: &str = "target.txt";

/// A fatal compilation failure, from any phase or from the driver's own
/// file handling.
#[derive(Debug, Error)]
pub enum CompileError {
    /// No source path on the command line.
    #[error("Missing source file name")]
    MissingSourceFile,

    /// The source path could not be read.
    #[error("Cannot open source file")]
    CannotOpenSource,

    /// The target path could not be created or written.
    #[error("Cannot open target file")]
    CannotOpenTarget,

    /// Malformed command line.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Sem(#[from] SemError),

    #[error(transparent)]
    CodeGen(#[from] CodeGenError),
}

/// One compiler invocation's configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source file to compile.
    pub source: PathBuf,

    /// Where the assembly listing goes.
    pub target: PathBuf,

    /// Echo each token to stdout as it is scanned.
    pub echo_tokens: bool,
}

impl Config {
    /// Creates a configuration with the default target path and token
    /// echo on, as the command line tool behaves.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: PathBuf::from(DEFAULT_TARGET),
            echo_tokens: true,
        }
    }

    /// Builds a configuration from command line arguments (without the
    /// program name).
    ///
    /// Usage: `minic <source> [-o <target>]`. One positional argument,
    /// the source path; `-o` overrides the default target path.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, CompileError> {
        let mut source: Option<PathBuf> = None;
        let mut target: Option<PathBuf> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-o" => {
                    let path = args.next().ok_or_else(|| {
                        CompileError::InvalidArguments("-o requires a target path".into())
                    })?;
                    target = Some(PathBuf::from(path));
                }
                _ if source.is_none() => source = Some(PathBuf::from(arg)),
                _ => {
                    return Err(CompileError::InvalidArguments(format!(
                        "unexpected argument '{arg}'"
                    )));
                }
            }
        }

        let mut config = Self::new(source.ok_or(CompileError::MissingSourceFile)?);
        if let Some(target) = target {
            config.target = target;
        }
        Ok(config)
    }
}

/// Compiles the configured source file to the configured target file.
pub fn compile(config: &Config) -> Result<(), CompileError> {
    let source =
        fs::read_to_string(&config.source).map_err(|_| CompileError::CannotOpenSource)?;

    let asm = compile_source(&source, config.echo_tokens)?;

    fs::write(&config.target, asm).map_err(|_| CompileError::CannotOpenTarget)?;
    Ok(())
}

/// Runs the in-memory pipeline: scan, parse, analyze, generate.
///
/// Returns the assembly listing. This is the whole compiler minus file
/// handling, which makes it the natural seam for tests.
pub fn compile_source(source: &str, echo_tokens: bool) -> Result<String, CompileError> {
    let scanner = Scanner::new(source).echo(echo_tokens);

    let output = Parser::new(scanner).parse()?;
    let mut symbols = output.symbols;

    Analyzer::new(&output.quads, &mut symbols).run()?;

    let asm = AsmGenerator::new(&symbols).generate(&output.quads)?;
    Ok(asm)
}

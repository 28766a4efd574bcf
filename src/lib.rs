//! # knight
//!
//! knight is an interpreter for the Knight scripting language written in
//! Rust. A Knight program is a single prefix-notation expression; this crate
//! parses it into an abstract syntax tree and evaluates that tree directly.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum: immediates, variables and calls of
/// built-in functions. The AST is built by the parser and walked by the
/// evaluator; it is never modified after construction.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while parsing or
/// evaluating code, with enough detail (line numbers, offending text, types
/// involved) to report them to the user.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator).
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and the I/O collaborators to provide a complete runtime
/// for Knight programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric conversion.
pub mod util;

pub use interpreter::evaluator::core::Completion;
use interpreter::{evaluator::core::Context, io::Io};

/// Parses and runs a program in a fresh environment.
///
/// # Errors
/// Returns an error if parsing or evaluation fails. A program that calls
/// `QUIT` completes normally with [`Completion::Quit`].
///
/// # Examples
/// ```
/// use knight::{Completion, interpreter::{io::MemoryIo, value::core::Value}};
///
/// let mut io = MemoryIo::new();
/// let result = knight::run("; = x 3 OUTPUT * x x", &mut io).unwrap();
///
/// assert_eq!(result, Completion::Finished(Value::Null));
/// assert_eq!(io.output(), "9\n");
///
/// // An undefined variable is a runtime error.
/// assert!(knight::run("+ y 1", &mut io).is_err());
/// ```
pub fn run<I: Io>(source: &str, io: I) -> Result<Completion, error::Error> {
    Context::new(io).run(source)
}

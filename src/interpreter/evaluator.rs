/// Binary function evaluation.
///
/// Implements arithmetic on integers and text, and the ordering functions
/// `<` and `>`.
pub mod binary;

/// Unary function evaluation.
///
/// Implements the pure single-operand functions: `LENGTH`, `ASCII` and `~`.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the evaluation context, the opcode dispatch with its
/// eager/lazy operand handling, the control-flow functions and the
/// `Unwind` type that carries errors and `QUIT` out of evaluation.
pub mod core;

/// Side-effecting functions.
///
/// `PROMPT`, `OUTPUT`, `DUMP`, `EVAL` and the shell function, all performed
/// through the context's I/O collaborators.
pub mod effects;

/// Substring functions `GET` and `SET`.
pub mod text;

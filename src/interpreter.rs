/// The environment module holds the program's variables.
///
/// Knight has a single global namespace per run; this module defines it and
/// the lookup that reports undefined variables.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST depth first, evaluating operands eagerly or
/// lazily as each function requires, and performs side effects through the
/// I/O collaborators.
///
/// # Responsibilities
/// - Dispatches every function exhaustively on its opcode.
/// - Defers `BLOCK` operands and short-circuits `&`, `|`, `IF` and `WHILE`.
/// - Reports runtime errors and carries `QUIT` out of nested evaluation.
pub mod evaluator;
/// The I/O module defines the collaborators behind every side effect.
///
/// Input, output, randomness and shell access are reached through the `Io`
/// trait, with a process-backed implementation and an in-memory one.
pub mod io;
/// The lexer module tokenizes source code for the parser.
///
/// The lexer reads the raw source text and produces integer, text,
/// identifier, word and symbol tokens, skipping whitespace, brackets and
/// comments. It also serves as the parser's position-tracked cursor.
pub mod lexer;
/// The opcode module lists the built-in functions.
///
/// Each function has a symbol, a name and a code whose range encodes its
/// arity, plus the set of operands it receives unevaluated.
pub mod opcode;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// # Responsibilities
/// - Turns literal tokens into immediates and identifiers into variables.
/// - Looks up function symbols and parses exactly as many operands as their
///   arity.
/// - Reports syntax errors with the offending fragment and line.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the `Value` enum (null, boolean, integer, text and
/// block) and the coercions between them.
pub mod value;

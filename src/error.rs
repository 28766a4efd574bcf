/// Parsing errors.
///
/// Defines all error types that can occur while turning source text into an
/// AST: running out of input, unknown function symbols and malformed
/// literals.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// undefined variables, type mismatches or division by zero.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure that ends a program run.
///
/// Syntax errors abort the parse before anything executes; runtime errors
/// propagate out of the evaluator. Both are fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The program (or text given to `EVAL`) could not be parsed.
    Syntax(ParseError),
    /// Evaluation failed.
    Runtime(RuntimeError),
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Syntax(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "Syntax error: {e}"),
            Self::Runtime(e) => write!(f, "Runtime error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}

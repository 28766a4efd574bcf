#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The source ended where a literal or function was expected.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The leading character is not a registered function symbol.
    UnknownFunction {
        /// The offending fragment of source text.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A quoted text literal was never closed.
    UnterminatedString {
        /// The text following the opening quote.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An integer literal was too large to be represented safely.
    LiteralTooLarge {
        /// The digits of the literal.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl ParseError {
    /// Returns the source line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedEndOfInput { line }
            | Self::UnknownFunction { line, .. }
            | Self::UnterminatedString { line, .. }
            | Self::LiteralTooLarge { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::UnknownFunction { token, line } => {
                write!(f, "Error on line {line}: Unknown function '{token}'.")
            },

            Self::UnterminatedString { token, line } => write!(f,
                                                               "Error on line {line}: Unterminated string literal: {token}"),

            Self::LiteralTooLarge { token, line } => {
                write!(f, "Error on line {line}: Literal {token} is too large.")
            },
        }
    }
}

impl std::error::Error for ParseError {}

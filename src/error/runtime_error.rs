#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Tried to read a variable that was never assigned.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
    },
    /// A value had an unexpected or incompatible type.
    TypeMismatch {
        /// Details about the type mismatch.
        details: String,
    },
    /// Attempted division or modulo by zero.
    DivisionByZero,
    /// A range fell outside the text it was applied to.
    IndexOutOfRange {
        /// Length of the text being indexed.
        length: usize,
        /// The requested start index.
        start:  i64,
        /// The requested number of characters.
        count:  i64,
    },
    /// An argument was invalid for the function it was passed to.
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// The function that overflowed.
        function: &'static str,
    },
    /// An input or output collaborator failed.
    Io {
        /// Details reported by the collaborator.
        details: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "Undefined variable '{name}'."),
            Self::TypeMismatch { details } => write!(f, "Type mismatch: {details}."),
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::IndexOutOfRange { length,
                                    start,
                                    count, } => write!(f,
                                                       "Index out of range: start {start} and length {count} do not fit in {length} characters."),
            Self::InvalidArgument { details } => write!(f, "Invalid argument: {details}."),
            Self::Overflow { function } => {
                write!(f, "Integer overflow while computing {function}.")
            },
            Self::Io { details } => write!(f, "I/O failure: {details}."),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<std::io::Error> for RuntimeError {
    fn from(error: std::io::Error) -> Self {
        Self::Io { details: error.to_string() }
    }
}

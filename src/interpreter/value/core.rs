use std::rc::Rc;

use crate::ast::Expr;

/// Represents a runtime value in the interpreter.
///
/// Values are immutable once constructed. Variables can be rebound to new
/// values, but a value itself is never changed in place; text and blocks are
/// reference counted so copies are cheap.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absence of a value, written `NULL`.
    #[default]
    Null,
    /// A boolean value, written `TRUE` or `FALSE`.
    Boolean(bool),
    /// A 64 bit signed integer.
    Integer(i64),
    /// Text, taken verbatim from the source or built at runtime.
    Text(Rc<str>),
    /// An unevaluated expression, produced by `BLOCK` and run by `CALL`.
    Block(Rc<Expr>),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v.into())
    }
}

/// Structural equality, as used by `?`.
///
/// Values of different variants are never equal. Blocks are equal only when
/// they are the same block.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Block(a), Self::Block(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// Name of the value's type, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Text(_) => "text",
            Self::Block(_) => "block",
        }
    }

    /// Returns `true` if the value is [`Value::Text`].
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(..))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(text) => write!(f, "{text}"),
            Self::Block(body) => write!(f, "BLOCK {body}"),
        }
    }
}

use std::rc::Rc;

use crate::{error::RuntimeError, interpreter::value::core::Value, util::num::parse_integer_prefix};

impl Value {
    /// Converts the value to an integer.
    ///
    /// `NULL` is `0`, booleans are `0` or `1`, and text is read like C's
    /// `strtoll`: leading whitespace, an optional sign, then as many digits as
    /// follow. Text without leading digits is `0`.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` for blocks.
    ///
    /// # Example
    /// ```
    /// use knight::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("  -12abc").to_integer().unwrap(), -12);
    /// assert_eq!(Value::from("abc").to_integer().unwrap(), 0);
    /// assert_eq!(Value::Boolean(true).to_integer().unwrap(), 1);
    /// ```
    pub fn to_integer(&self) -> Result<i64, RuntimeError> {
        match self {
            Self::Null => Ok(0),
            Self::Boolean(b) => Ok(i64::from(*b)),
            Self::Integer(n) => Ok(*n),
            Self::Text(text) => Ok(parse_integer_prefix(text)),
            Self::Block(_) => Err(cannot_convert(self, "an integer")),
        }
    }

    /// Converts the value to text.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` for blocks.
    ///
    /// # Example
    /// ```
    /// use knight::interpreter::value::core::Value;
    ///
    /// assert_eq!(&*Value::Null.to_text().unwrap(), "null");
    /// assert_eq!(&*Value::Integer(-4).to_text().unwrap(), "-4");
    /// ```
    pub fn to_text(&self) -> Result<Rc<str>, RuntimeError> {
        match self {
            Self::Text(text) => Ok(Rc::clone(text)),
            Self::Block(_) => Err(cannot_convert(self, "text")),
            _ => Ok(self.to_string().into()),
        }
    }

    /// Converts the value to a boolean.
    ///
    /// `NULL`, `0` and empty text are false; everything else is true.
    ///
    /// # Errors
    /// Returns `RuntimeError::TypeMismatch` for blocks.
    pub fn to_boolean(&self) -> Result<bool, RuntimeError> {
        match self {
            Self::Null => Ok(false),
            Self::Boolean(b) => Ok(*b),
            Self::Integer(n) => Ok(*n != 0),
            Self::Text(text) => Ok(!text.is_empty()),
            Self::Block(_) => Err(cannot_convert(self, "a boolean")),
        }
    }

    /// Renders the value the way `DUMP` writes it.
    ///
    /// # Example
    /// ```
    /// use knight::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(5).dump(), "Number(5)");
    /// assert_eq!(Value::from("hi").dump(), "String(hi)");
    /// assert_eq!(Value::Null.dump(), "Null()");
    /// ```
    #[must_use]
    pub fn dump(&self) -> String {
        match self {
            Self::Null => "Null()".to_string(),
            Self::Boolean(b) => format!("Boolean({b})"),
            Self::Integer(n) => format!("Number({n})"),
            Self::Text(text) => format!("String({text})"),
            Self::Block(body) => format!("Block({body})"),
        }
    }
}

fn cannot_convert(value: &Value, target: &str) -> RuntimeError {
    RuntimeError::TypeMismatch { details: format!("cannot convert a {} to {target}",
                                                  value.type_name()) }
}

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::Context, io::Io, value::core::Value},
    util::num::count_to_i64,
};

impl<I: Io> Context<I> {
    /// Evaluates `LENGTH`: the number of characters in the operand's text
    /// form.
    ///
    /// # Errors
    /// Returns `TypeMismatch` for blocks.
    pub fn eval_length(operand: &Value) -> Result<Value, RuntimeError> {
        let text = operand.to_text()?;
        Ok(Value::Integer(count_to_i64(text.chars().count(), "LENGTH")?))
    }

    /// Evaluates `ASCII`.
    ///
    /// An integer becomes the one-character text with that code point; text
    /// becomes the code point of its first character.
    ///
    /// # Errors
    /// - `InvalidArgument` for integers that are not code points, or empty
    ///   text.
    /// - `TypeMismatch` for any other operand.
    ///
    /// # Example
    /// ```
    /// use knight::interpreter::{evaluator::core::Context, io::MemoryIo, value::core::Value};
    ///
    /// assert_eq!(Context::<MemoryIo>::eval_ascii(&Value::Integer(65)).unwrap(),
    ///            Value::from("A"));
    /// assert_eq!(Context::<MemoryIo>::eval_ascii(&Value::from("abc")).unwrap(),
    ///            Value::Integer(97));
    /// ```
    pub fn eval_ascii(operand: &Value) -> Result<Value, RuntimeError> {
        match operand {
            Value::Integer(code) => u32::try_from(*code).ok()
                                                        .and_then(char::from_u32)
                                                        .map(|c| Value::from(c.to_string()))
                                                        .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("{code} is not a character code") }),
            Value::Text(text) => text.chars()
                                     .next()
                                     .map(|c| Value::Integer(i64::from(u32::from(c))))
                                     .ok_or_else(|| RuntimeError::InvalidArgument { details: "ASCII of empty text".to_string() }),
            _ => Err(RuntimeError::TypeMismatch { details: format!("cannot ASCII a {}",
                                                                   operand.type_name()) }),
        }
    }

    /// Evaluates `~`: the arithmetic negation of the operand as an integer.
    ///
    /// # Errors
    /// Returns `Overflow` for `i64::MIN` and `TypeMismatch` for blocks.
    pub fn eval_negate(operand: &Value) -> Result<Value, RuntimeError> {
        operand.to_integer()?
               .checked_neg()
               .map(Value::Integer)
               .ok_or(RuntimeError::Overflow { function: "NEGATE" })
    }
}

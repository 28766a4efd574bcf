use std::ops::Range;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::Context, io::Io, value::core::Value},
};

impl<I: Io> Context<I> {
    /// Evaluates `GET`: the `count` characters of `text` starting at `start`.
    ///
    /// # Errors
    /// - `TypeMismatch` if `text` is not text; the container is never
    ///   coerced.
    /// - `IndexOutOfRange` if the range is negative or runs past the end of
    ///   the text.
    ///
    /// # Example
    /// ```
    /// use knight::interpreter::{evaluator::core::Context, io::MemoryIo, value::core::Value};
    ///
    /// let slice = Context::<MemoryIo>::eval_get(&Value::from("hello"),
    ///                                          &Value::Integer(1),
    ///                                          &Value::Integer(3));
    /// assert_eq!(slice.unwrap(), Value::from("ell"));
    /// ```
    pub fn eval_get(text: &Value, start: &Value, count: &Value) -> Result<Value, RuntimeError> {
        let text = container(text, "GET")?;
        let range = char_range(text, start.to_integer()?, count.to_integer()?)?;

        Ok(Value::from(&text[range]))
    }

    /// Evaluates `SET`: a copy of `text` with `count` characters starting at
    /// `start` replaced by `replacement`.
    ///
    /// # Errors
    /// - `TypeMismatch` if `text` is not text.
    /// - `IndexOutOfRange` if the range is negative or runs past the end of
    ///   the text.
    pub fn eval_set(text: &Value,
                    start: &Value,
                    count: &Value,
                    replacement: &Value)
                    -> Result<Value, RuntimeError> {
        let text = container(text, "SET")?;
        let range = char_range(text, start.to_integer()?, count.to_integer()?)?;
        let replacement = replacement.to_text()?;

        let mut result = String::with_capacity(text.len() - range.len() + replacement.len());
        result.push_str(&text[..range.start]);
        result.push_str(&replacement);
        result.push_str(&text[range.end..]);
        Ok(Value::from(result))
    }
}

/// Borrows the text a substring function operates on.
fn container<'a>(value: &'a Value, function: &str) -> Result<&'a str, RuntimeError> {
    match value {
        Value::Text(text) => Ok(&**text),
        _ => Err(RuntimeError::TypeMismatch { details: format!("can only {function} on text, not a {}",
                                                               value.type_name()) }),
    }
}

/// Converts a character range into the byte range it occupies in `text`.
fn char_range(text: &str, start: i64, count: i64) -> Result<Range<usize>, RuntimeError> {
    let out_of_range = || RuntimeError::IndexOutOfRange { length: text.chars().count(),
                                                          start,
                                                          count };

    let first = usize::try_from(start).map_err(|_| out_of_range())?;
    let length = usize::try_from(count).map_err(|_| out_of_range())?;

    let mut boundaries = text.char_indices().map(|(index, _)| index).chain([text.len()]);
    let begin = boundaries.nth(first).ok_or_else(out_of_range)?;
    let end = if length == 0 {
        begin
    } else {
        boundaries.nth(length - 1).ok_or_else(out_of_range)?
    };

    Ok(begin..end)
}

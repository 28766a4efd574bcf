use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::Context, io::Io, opcode::Opcode, value::core::Value},
};

/// Longest text, in bytes, that `*` will build.
pub const MAX_TEXT_LEN: usize = 1 << 30;

impl<I: Io> Context<I> {
    /// Evaluates an arithmetic function on two evaluated operands.
    ///
    /// The left operand decides the operation: `+` concatenates when either
    /// side is text, `*` repeats text, and everything else is integer
    /// arithmetic with the right operand coerced to an integer. Division
    /// truncates toward zero.
    ///
    /// # Parameters
    /// - `op`: One of `Add`, `Sub`, `Mul`, `Div`, `Mod` or `Pow`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Errors
    /// - `DivisionByZero` for `/` or `%` by zero, or `0` raised to a negative
    ///   power.
    /// - `Overflow` if the result does not fit in an `i64`, or repeated text
    ///   would exceed [`MAX_TEXT_LEN`] bytes.
    /// - `TypeMismatch` if the left operand cannot be used with `op`.
    /// - `InvalidArgument` if `op` is not an arithmetic function.
    ///
    /// # Example
    /// ```
    /// use knight::interpreter::{
    ///     evaluator::core::Context, io::MemoryIo, opcode::Opcode, value::core::Value,
    /// };
    ///
    /// let sum = Context::<MemoryIo>::eval_arithmetic(Opcode::Add,
    ///                                                &Value::from("n="),
    ///                                                &Value::Integer(3));
    /// assert_eq!(sum.unwrap(), Value::from("n=3"));
    ///
    /// let quotient = Context::<MemoryIo>::eval_arithmetic(Opcode::Div,
    ///                                                     &Value::Integer(7),
    ///                                                     &Value::Integer(2));
    /// assert_eq!(quotient.unwrap(), Value::Integer(3));
    /// ```
    pub fn eval_arithmetic(op: Opcode, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
        use Opcode::{Add, Div, Mod, Mul, Pow, Sub};

        if op == Add && (left.is_text() || right.is_text()) {
            let mut text = left.to_text()?.to_string();
            text.push_str(&right.to_text()?);
            return Ok(Value::from(text));
        }

        match (op, left) {
            (Mul, Value::Text(text)) => {
                let count = right.to_integer()?;
                let count = usize::try_from(count).map_err(|_| {
                                                      RuntimeError::InvalidArgument { details: format!("cannot repeat text {count} times") }
                                                  })?;
                if text.len().checked_mul(count).is_none_or(|size| size > MAX_TEXT_LEN) {
                    return Err(RuntimeError::Overflow { function: op.name() });
                }
                Ok(Value::from(text.repeat(count)))
            },
            (_, Value::Integer(lhs)) => {
                let rhs = right.to_integer()?;
                let result = match op {
                    Add => lhs.checked_add(rhs),
                    Sub => lhs.checked_sub(rhs),
                    Mul => lhs.checked_mul(rhs),
                    Div | Mod if rhs == 0 => return Err(RuntimeError::DivisionByZero),
                    Div => lhs.checked_div(rhs),
                    Mod => lhs.checked_rem(rhs),
                    Pow => return Ok(Value::Integer(power(*lhs, rhs)?)),
                    _ => return Err(not_applicable(op, "an arithmetic")),
                };
                result.map(Value::Integer)
                      .ok_or(RuntimeError::Overflow { function: op.name() })
            },
            _ => Err(RuntimeError::TypeMismatch { details: format!("cannot {op} a {}",
                                                                   left.type_name()) }),
        }
    }

    /// Evaluates `<` or `>` on two evaluated operands.
    ///
    /// Integers compare numerically, text lexicographically and booleans with
    /// `FALSE` before `TRUE`; the right operand is coerced to the left
    /// operand's type.
    ///
    /// # Errors
    /// - `TypeMismatch` if the left operand is `NULL` or a block.
    /// - `InvalidArgument` if `op` is neither `Lth` nor `Gth`.
    pub fn eval_comparison(op: Opcode, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
        let expected = match op {
            Opcode::Lth => Ordering::Less,
            Opcode::Gth => Ordering::Greater,
            _ => return Err(not_applicable(op, "a comparison")),
        };

        Ok(Value::Boolean(compare(op, left, right)? == expected))
    }
}

/// Reports an opcode passed to an evaluator that does not implement it.
fn not_applicable(op: Opcode, kind: &str) -> RuntimeError {
    RuntimeError::InvalidArgument { details: format!("{op} is not {kind} function") }
}

/// Orders `left` against `right` coerced to `left`'s type.
fn compare(op: Opcode, left: &Value, right: &Value) -> Result<Ordering, RuntimeError> {
    match left {
        Value::Integer(lhs) => Ok(lhs.cmp(&right.to_integer()?)),
        Value::Text(lhs) => Ok((**lhs).cmp(&*right.to_text()?)),
        Value::Boolean(lhs) => Ok(lhs.cmp(&right.to_boolean()?)),
        Value::Null | Value::Block(_) => {
            Err(RuntimeError::TypeMismatch { details: format!("cannot {op} a {}", left.type_name()) })
        },
    }
}

/// Raises `base` to `exponent`.
///
/// Negative exponents follow integer division: `1` and `-1` stay
/// magnitude one, every other base rounds to `0`, and `0` divides by zero.
fn power(base: i64, exponent: i64) -> Result<i64, RuntimeError> {
    match base {
        0 if exponent < 0 => Err(RuntimeError::DivisionByZero),
        0 => Ok(i64::from(exponent == 0)),
        1 => Ok(1),
        -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
        _ if exponent < 0 => Ok(0),
        _ => u32::try_from(exponent).ok()
                                    .and_then(|exponent| base.checked_pow(exponent))
                                    .ok_or(RuntimeError::Overflow { function: "POW" }),
    }
}

use crate::error::RuntimeError;

/// Reads the integer at the start of `text`, the way C's `strtoll` does.
///
/// Leading whitespace is skipped, then an optional `+` or `-`, then as many
/// decimal digits as follow. Anything after the digits is ignored. Text with
/// no digits reads as `0`, and values beyond the `i64` range saturate.
///
/// ## Example
/// ```
/// use knight::util::num::parse_integer_prefix;
///
/// assert_eq!(parse_integer_prefix("42"), 42);
/// assert_eq!(parse_integer_prefix("\t -7 apples"), -7);
/// assert_eq!(parse_integer_prefix("x1"), 0);
/// assert_eq!(parse_integer_prefix("99999999999999999999"), i64::MAX);
/// ```
#[must_use]
pub fn parse_integer_prefix(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Converts a character count to an integer value.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the count does not fit in an `i64`.
pub fn count_to_i64(count: usize, function: &'static str) -> Result<i64, RuntimeError> {
    i64::try_from(count).map_err(|_| RuntimeError::Overflow { function })
}

/// Maps a `QUIT` operand onto a process exit status.
///
/// Statuses are truncated to the low eight bits, matching what the operating
/// system reports for out-of-range codes.
///
/// ## Example
/// ```
/// use knight::util::num::exit_status;
///
/// assert_eq!(exit_status(3), 3);
/// assert_eq!(exit_status(256), 0);
/// assert_eq!(exit_status(-1), 255);
/// ```
#[must_use]
pub fn exit_status(code: i64) -> i32 {
    #[allow(clippy::cast_possible_truncation)]
    let status = code.rem_euclid(256) as i32;
    status
}

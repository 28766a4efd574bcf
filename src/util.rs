/// Numeric conversion helpers.
///
/// This module provides the integer reading and narrowing conversions shared
/// by the value coercions and the evaluator: reading integers out of text,
/// turning character counts into integers, and mapping `QUIT` operands onto
/// process exit statuses.
pub mod num;

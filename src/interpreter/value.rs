/// Conversions between values.
///
/// Defines how each value is read as an integer, as text and as a boolean,
/// and how values are rendered by `DUMP`. Every function coerces its
/// operands through these rules rather than inspecting variants directly.
pub mod coerce;

pub mod core;

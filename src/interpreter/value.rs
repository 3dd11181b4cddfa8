/// The `Value` union and its helpers.
///
/// Defines the tagged runtime value, tag derivation, element-tag inference
/// for array literals, and the stringification used by `print`/`toString`.
pub mod core;
/// The runtime type tag.
///
/// Defines the recursive `Type` enum behind the string tags (`int`, `float`,
/// `string`, `bool`, `null`, `func`, `val`, and `T[]` nesting), with parsing
/// and rendering.
pub mod tag;

/// Numeric helpers.
///
/// Index normalization and the numeric-token test shared by the evaluator and
/// the built-in library.
pub mod num;
/// Identifier helpers.
///
/// The identifier format check and the reserved-word list.
pub mod ident;

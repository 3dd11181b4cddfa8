/// The error-stack component.
///
/// Defines the linked chain of `{message, line}` frames that carries a failure
/// upward through nested call layers, together with its bounded-depth collapse
/// and user-facing rendering.
pub mod stack;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation and
/// execution: type mismatches, unknown names, arithmetic faults, arity and
/// value errors.
pub mod runtime_error;
/// Syntax errors.
///
/// Defines all error types detected while slicing lines, blocks, and literals:
/// missing brackets, invalid identifiers, unterminated blocks.
pub mod syntax_error;

pub use runtime_error::RuntimeError;
pub use stack::{ErrorStack, EvalResult};
pub use syntax_error::SyntaxError;

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError},
    interpreter::value::core::Value,
};

/// Applies unary negation (`¬`, `not`, or a rewritten leading `-`).
///
/// Numbers negate arithmetically, booleans logically; anything else is an
/// error.
pub fn negate(value: Value, line: usize) -> EvalResult<Value> {
    match value {
        Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
        Value::Float(x) => Ok(Value::Float(-x)),
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => {
            Err(ErrorStack::new(RuntimeError::InvalidUnaryOperand { tag: other.tag() }, line))
        },
    }
}

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError},
    interpreter::value::core::Value,
};

/// `round(f)`: rounds half away from zero.
pub fn round(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Float(x) => Ok(Value::Float(x.round())),
        _ => Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                     name:    "round",
                                     details: "Argument must be a float".to_string(),
                                 },
                                 line)),
    }
}

/// `sqrt(n)`: the square root of a non-negative number, as a float.
#[allow(clippy::cast_precision_loss)]
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    let x = match &args[0] {
        Value::Int(n) => *n as f64,
        Value::Float(x) => *x,
        _ => {
            return Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                           name:    "sqrt",
                                           details: "Argument must be a number".to_string(),
                                       },
                                       line));
        },
    };

    if x < 0.0 {
        return Err(ErrorStack::new(RuntimeError::NegativeSqrt, line));
    }
    Ok(Value::Float(x.sqrt()))
}

/// `random()`: a float in `[0, 1)` from the thread-local generator, which is
/// seeded once rather than per call.
pub fn random(_args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Float(rand::random::<f64>()))
}

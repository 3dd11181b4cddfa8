use crate::{
    error::{ErrorStack, EvalResult, RuntimeError},
    interpreter::{
        evaluator::binary::{
            core::{invalid_operands, BinaryOp},
            scalar::as_float,
        },
        value::core::Value,
    },
};

/// Evaluates `^` and `%`.
///
/// Exponentiation goes through `f64::powf`; when both operands are integers
/// the result is truncated back to `int`, which matches the original's
/// `math.Pow` path. Modulo is the plain remainder on two integers and the
/// floored modulo `a - b*floor(a/b)` as soon as a float is involved; a zero
/// divisor is an error either way.
#[allow(clippy::cast_possible_truncation)]
pub fn apply(op: BinaryOp, token: &str, left: &Value, right: &Value, line: usize)
             -> EvalResult<Value> {
    use Value::{Float, Int};

    match (left, right) {
        (Int(a), Int(b)) => match op {
            BinaryOp::Pow => Ok(Int(as_float(left).powf(as_float(right)) as i64)),
            BinaryOp::Mod => {
                if *b == 0 {
                    Err(ErrorStack::new(RuntimeError::DivisionByZero, line))
                } else {
                    Ok(Int(a.wrapping_rem(*b)))
                }
            },
            _ => unreachable!("routed by binary::core"),
        },

        (Int(_) | Float(_), Int(_) | Float(_)) => {
            let a = as_float(left);
            let b = as_float(right);
            match op {
                BinaryOp::Pow => Ok(Float(a.powf(b))),
                BinaryOp::Mod => {
                    if b == 0.0 {
                        Err(ErrorStack::new(RuntimeError::DivisionByZero, line))
                    } else {
                        Ok(Float(a - b * (a / b).floor()))
                    }
                },
                _ => unreachable!("routed by binary::core"),
            }
        },

        _ => Err(invalid_operands(token, left, right, line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_power_truncates() {
        let result = apply(BinaryOp::Pow, "^", &Value::Int(2), &Value::Int(10), 1).unwrap();
        assert!(matches!(result, Value::Int(1024)));
    }

    #[test]
    fn float_modulo_satisfies_the_floored_identity() {
        for (a, b) in [(7.5, 2.0), (-7.5, 2.0), (7.5, -2.0), (0.25, 0.125)] {
            let result = apply(BinaryOp::Mod, "%", &Value::Float(a), &Value::Float(b), 1).unwrap();
            let Value::Float(r) = result else { panic!("expected float") };
            assert_eq!(r + b * (a / b).floor(), a);
        }
    }

    #[test]
    fn integer_modulo_is_the_remainder() {
        let result = apply(BinaryOp::Mod, "%", &Value::Int(-7), &Value::Int(3), 1).unwrap();
        assert!(matches!(result, Value::Int(-1)));
    }

    #[test]
    fn zero_divisors_are_errors() {
        assert!(apply(BinaryOp::Mod, "%", &Value::Int(1), &Value::Int(0), 1).is_err());
        assert!(apply(BinaryOp::Mod, "%", &Value::Float(1.0), &Value::Float(0.0), 1).is_err());
    }
}

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError},
    interpreter::{
        evaluator::binary::core::{invalid_operands, BinaryOp},
        value::core::Value,
    },
};

/// Evaluates `+`, `-`, `*` and `/` (and through their aliases, `or` and
/// `and`).
///
/// Numeric pairs widen to float when either side is float; integer pairs use
/// wrapping 64-bit arithmetic. Beyond numbers, `+` concatenates strings and
/// same-tagged arrays and prepends a string onto an array, `*` repeats a
/// string and ANDs booleans, and `+` ORs booleans. Division checks the
/// divisor for every numeric category. Every other pairing is an error.
#[allow(clippy::cast_precision_loss)]
pub fn apply(op: BinaryOp, token: &str, left: &Value, right: &Value, line: usize)
             -> EvalResult<Value> {
    use Value::{Array, Bool, Float, Int, Str};

    match (left, right) {
        (Int(a), Int(b)) => match op {
            BinaryOp::Add => Ok(Int(a.wrapping_add(*b))),
            BinaryOp::Sub => Ok(Int(a.wrapping_sub(*b))),
            BinaryOp::Mul => Ok(Int(a.wrapping_mul(*b))),
            BinaryOp::Div => {
                if *b == 0 {
                    Err(ErrorStack::new(RuntimeError::DivisionByZero, line))
                } else {
                    Ok(Int(a.wrapping_div(*b)))
                }
            },
            _ => unreachable!("routed by binary::core"),
        },

        (Int(_) | Float(_), Int(_) | Float(_)) => {
            let a = as_float(left);
            let b = as_float(right);
            match op {
                BinaryOp::Add => Ok(Float(a + b)),
                BinaryOp::Sub => Ok(Float(a - b)),
                BinaryOp::Mul => Ok(Float(a * b)),
                BinaryOp::Div => {
                    if b == 0.0 {
                        Err(ErrorStack::new(RuntimeError::DivisionByZero, line))
                    } else {
                        Ok(Float(a / b))
                    }
                },
                _ => unreachable!("routed by binary::core"),
            }
        },

        (Str(a), Str(b)) if op == BinaryOp::Add => Ok(Str(format!("{a}{b}"))),

        (Str(a), Int(times)) if op == BinaryOp::Mul => {
            let times = usize::try_from(*times).map_err(|_| {
                                                    invalid_operands(token, left, right, line)
                                                })?;
            Ok(Str(a.repeat(times)))
        },

        (Bool(a), Bool(b)) => match op {
            BinaryOp::Add => Ok(Bool(*a || *b)),
            BinaryOp::Mul => Ok(Bool(*a && *b)),
            _ => Err(invalid_operands(token, left, right, line)),
        },

        (Array { elem: left_elem, items: left_items },
         Array { elem: right_elem, items: right_items })
            if op == BinaryOp::Add && left_elem == right_elem =>
        {
            let mut items = left_items.borrow().clone();
            items.extend(right_items.borrow().iter().cloned());
            Ok(Value::array(left_elem.clone(), items))
        },

        // A string may be prepended onto an array; the mirrored order has no
        // meaning.
        (Str(a), Array { items, .. }) if op == BinaryOp::Add => {
            let mut combined = vec![Str(a.clone())];
            combined.extend(items.borrow().iter().cloned());
            let elem = Value::infer_elem(&combined);
            Ok(Value::array(elem, combined))
        },

        _ => Err(invalid_operands(token, left, right, line)),
    }
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn as_float(value: &Value) -> f64 {
    match value {
        Value::Int(n) => *n as f64,
        Value::Float(x) => *x,
        _ => unreachable!("caller matched a numeric value"),
    }
}

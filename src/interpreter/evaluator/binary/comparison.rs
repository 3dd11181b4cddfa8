use std::cmp::Ordering;

use crate::{
    error::EvalResult,
    interpreter::{
        evaluator::binary::{
            core::{invalid_operands, BinaryOp},
            scalar::as_float,
        },
        value::core::Value,
    },
};

/// Evaluates `==`, `!=`, `<`, `>`, `<=` and `>=` (and `is`, the `==` alias).
///
/// Equality crosses the numeric tags with promotion and otherwise requires
/// matching tags; `null == null` holds. Ordering promotes numerics and, for
/// strings, compares *lengths* rather than code points — the original
/// behaves this way and programs can observe it.
pub fn apply(op: BinaryOp, token: &str, left: &Value, right: &Value, line: usize)
             -> EvalResult<Value> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(equals(token, left, right, line)?)),
        BinaryOp::Ne => Ok(Value::Bool(!equals(token, left, right, line)?)),
        _ => {
            let ordering = order(token, left, right, line)?;
            let holds = match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::Gt => ordering == Ordering::Greater,
                BinaryOp::Le => ordering != Ordering::Greater,
                BinaryOp::Ge => ordering != Ordering::Less,
                _ => unreachable!("routed by binary::core"),
            };
            Ok(Value::Bool(holds))
        },
    }
}

#[allow(clippy::float_cmp)]
fn equals(token: &str, left: &Value, right: &Value, line: usize) -> EvalResult<bool> {
    use Value::{Bool, Float, Int, Null, Str};

    match (left, right) {
        (Int(a), Int(b)) => Ok(a == b),
        (Int(_) | Float(_), Int(_) | Float(_)) => Ok(as_float(left) == as_float(right)),
        (Str(a), Str(b)) => Ok(a == b),
        (Bool(a), Bool(b)) => Ok(a == b),
        (Null, Null) => Ok(true),
        _ => Err(invalid_operands(token, left, right, line)),
    }
}

fn order(token: &str, left: &Value, right: &Value, line: usize) -> EvalResult<Ordering> {
    use Value::{Float, Int, Str};

    match (left, right) {
        (Int(a), Int(b)) => Ok(a.cmp(b)),
        (Int(_) | Float(_), Int(_) | Float(_)) => {
            Ok(as_float(left).partial_cmp(&as_float(right)).unwrap_or(Ordering::Equal))
        },
        (Str(a), Str(b)) => Ok(a.len().cmp(&b.len())),
        _ => Err(invalid_operands(token, left, right, line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(op: BinaryOp, token: &str, left: Value, right: Value) -> bool {
        match apply(op, token, &left, &right, 1).unwrap() {
            Value::Bool(b) => b,
            other => panic!("expected bool, got {other}"),
        }
    }

    #[test]
    fn numeric_comparison_promotes() {
        assert!(check(BinaryOp::Eq, "==", Value::Int(2), Value::Float(2.0)));
        assert!(check(BinaryOp::Lt, "<", Value::Float(1.5), Value::Int(2)));
    }

    #[test]
    fn null_equals_null() {
        assert!(check(BinaryOp::Eq, "==", Value::Null, Value::Null));
    }

    #[test]
    fn strings_order_by_length() {
        assert!(check(BinaryOp::Gt, ">", Value::Str("abc".into()), Value::Str("zz".into())));
        assert!(check(BinaryOp::Le, "<=", Value::Str("ab".into()), Value::Str("cd".into())));
    }

    #[test]
    fn mismatched_tags_are_errors() {
        assert!(apply(BinaryOp::Eq, "==", &Value::Int(1), &Value::Str("1".into()), 1).is_err());
        assert!(apply(BinaryOp::Lt, "<", &Value::Bool(true), &Value::Bool(false), 1).is_err());
    }
}

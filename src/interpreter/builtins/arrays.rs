use crate::{
    error::{ErrorStack, EvalResult, RuntimeError},
    interpreter::value::{core::Value, tag::Type},
    util::num::wrap_index,
};

/// `len(v)`: the byte length of a string or the element count of an array.
#[allow(clippy::cast_possible_wrap)]
pub fn len(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Str(text) => Ok(Value::Int(text.len() as i64)),
        Value::Array { items, .. } => Ok(Value::Int(items.borrow().len() as i64)),
        _ => Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                     name:    "len",
                                     details: "Expected an array or string as the argument"
                                              .to_string(),
                                 },
                                 line)),
    }
}

/// `append(a, v)`: a new array with `v` at the back.
///
/// The element must match the array's element tag unless that tag is the
/// wildcard. The result has fresh identity and a re-inferred element tag, so
/// appending a concrete element to an empty `val[]` produces a typed array.
pub fn append(args: &[Value], line: usize) -> EvalResult<Value> {
    let Value::Array { elem, items } = &args[0] else {
        return Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                       name:    "append",
                                       details: "Expected an array as the first argument"
                                                .to_string(),
                                   },
                                   line));
    };

    if *elem != Type::Val && args[1].tag() != *elem {
        return Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                       name:    "append",
                                       details: format!("Expected a {elem} as the second \
                                                         argument"),
                                   },
                                   line));
    }

    let mut combined = items.borrow().clone();
    combined.push(args[1].clone());
    let elem = Value::infer_elem(&combined);
    Ok(Value::array(elem, combined))
}

/// `truncate(a, i)`: a new array with the element at the wrapped index
/// removed.
pub fn truncate(args: &[Value], line: usize) -> EvalResult<Value> {
    let Value::Array { items, .. } = &args[0] else {
        return Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                       name:    "truncate",
                                       details: "Expected an array as the first argument"
                                                .to_string(),
                                   },
                                   line));
    };
    let Value::Int(index) = &args[1] else {
        return Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                       name:    "truncate",
                                       details: "Expected an int as the second argument"
                                                .to_string(),
                                   },
                                   line));
    };

    let items = items.borrow();
    let at = wrap_index(*index, items.len())
        .ok_or_else(|| ErrorStack::new(RuntimeError::EmptyArray, line))?;

    let mut remaining = Vec::with_capacity(items.len() - 1);
    for (position, item) in items.iter().enumerate() {
        if position != at {
            remaining.push(item.clone());
        }
    }
    let elem = Value::infer_elem(&remaining);
    Ok(Value::array(elem, remaining))
}

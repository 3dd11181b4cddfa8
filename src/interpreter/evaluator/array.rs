use std::collections::VecDeque;

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError, SyntaxError},
    interpreter::{evaluator::core::evaluate, frame::FrameRef, value::core::Value},
    util::num::wrap_index,
};

/// Collects the comma-separated expressions of a bracketed group and
/// evaluates each one.
///
/// The opener has already been consumed; scanning runs until `closer` (`]`
/// for array literals and indexes, `)` for call arguments) appears at
/// nesting level zero. Nested parentheses and brackets are counted and
/// string regions are skipped, so commas inside either never split. Sub-
/// expression text is stitched the same way the statement layer stitches:
/// verbatim inside strings, space-joined outside.
pub fn extract_values(scope: &FrameRef, queue: &mut VecDeque<String>, depth: usize, line: usize,
                      closer: &str)
                      -> EvalResult<Vec<Value>> {
    let mut nested = 0_i64;
    let mut closed = false;
    let mut in_string = false;
    let mut text = String::new();
    let mut values = Vec::new();

    while let Some(token) = queue.pop_front() {
        if (token == "(" || token == "[") && !in_string {
            nested += 1;
        } else if (token == ")" || token == "]") && !in_string {
            if nested == 0 && token == closer {
                closed = true;
                break;
            }
            nested -= 1;
        } else if token == "," && nested == 0 && !in_string {
            values.push(evaluate(scope, &text, depth, line)?);
            text.clear();
            continue;
        }

        if token == "\"" {
            in_string = !in_string;
        }

        text.push_str(&token);
        if !in_string {
            text.push(' ');
        }
    }

    if !closed {
        let error = if closer == ")" {
            ErrorStack::new(SyntaxError::MissingClosingParenthesis, line)
        } else {
            ErrorStack::new(SyntaxError::MissingClosingBracket, line)
        };
        return Err(error);
    }

    if !text.is_empty() {
        values.push(evaluate(scope, &text, depth, line)?);
    }
    Ok(values)
}

/// Extracts a subscript: the bracket group must reduce to exactly one `int`.
pub fn extract_index(scope: &FrameRef, queue: &mut VecDeque<String>, depth: usize, line: usize)
                     -> EvalResult<i64> {
    let values = extract_values(scope, queue, depth, line, "]")?;
    match values.as_slice() {
        [Value::Int(index)] => Ok(*index),
        _ => Err(ErrorStack::new(RuntimeError::InvalidIndex, line)),
    }
}

/// Reads one element out of an array or string with the wrap-index rule.
///
/// String indexing is byte-oriented and yields a one-byte string.
pub fn index_into(value: &Value, index: i64, line: usize) -> EvalResult<Value> {
    match value {
        Value::Array { items, .. } => {
            let items = items.borrow();
            let at = wrap_index(index, items.len())
                .ok_or_else(|| ErrorStack::new(RuntimeError::EmptyArray, line))?;
            Ok(items[at].clone())
        },
        Value::Str(text) => {
            let bytes = text.as_bytes();
            let at = wrap_index(index, bytes.len())
                .ok_or_else(|| ErrorStack::new(RuntimeError::EmptyString, line))?;
            Ok(Value::Str((bytes[at] as char).to_string()))
        },
        other => {
            Err(ErrorStack::new(RuntimeError::IndexNotSupported { tag: other.tag() }, line))
        },
    }
}

/// Counts the `[]` suffix of a declaration: every balanced pair adds one
/// array dimension. A `[` without its `]` is a syntax error.
pub fn dimension_suffix(queue: &mut VecDeque<String>, line: usize) -> EvalResult<usize> {
    let mut dims = 0;
    while queue.front().map(String::as_str) == Some("[") {
        queue.pop_front();
        if queue.front().map(String::as_str) == Some("]") {
            queue.pop_front();
            dims += 1;
        } else {
            return Err(ErrorStack::new(SyntaxError::InvalidArrayDimension, line));
        }
    }
    Ok(dims)
}

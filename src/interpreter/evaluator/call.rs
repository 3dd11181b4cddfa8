use std::collections::{HashMap, VecDeque};

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError, SyntaxError},
    interpreter::{
        evaluator::array,
        executor::core::{run, Exit},
        frame::{CellRef, Frame, FrameRef},
        value::core::Value,
    },
};

/// Extracts call arguments: consumes the `(`, then the comma-separated
/// argument expressions up to the matching `)`.
pub fn extract_call_args(scope: &FrameRef, queue: &mut VecDeque<String>, depth: usize,
                         line: usize)
                         -> EvalResult<Vec<Value>> {
    if queue.pop_front().as_deref() != Some("(") {
        return Err(ErrorStack::new(SyntaxError::MissingOpeningParenthesis, line));
    }
    array::extract_values(scope, queue, depth, line, ")")
}

/// Invokes a function value.
///
/// The template is cloned for the call (fresh cell map captured from its
/// lexical parent), the arguments are bound by the executor, and the body
/// runs one recursion level deeper. Only an explicit `return` produces a
/// value; falling off the end yields `null`. Errors from the body are
/// wrapped in an `In function "NAME"` frame at the callee's header line.
pub fn invoke(template: &FrameRef, queue: &mut VecDeque<String>, scope: &FrameRef, depth: usize,
              line: usize, name: &str)
              -> EvalResult<Value> {
    let args = extract_call_args(scope, queue, depth, line)?;
    let callee = Frame::clone_for_call(template);
    let header = callee.borrow().line_index;

    let (value, exit) = run_wrapped(&callee, args, HashMap::new(), depth, header, name)?;
    if exit == Exit::Return {
        Ok(value)
    } else {
        Ok(Value::Null)
    }
}

/// Instantiates a function with `new`.
///
/// The fresh frame starts with an empty cell map — only `_DEBUG` and
/// `_MAX_RECURSION` are injected from the calling scope — and its parent
/// self-loops, so `super` inside the instance resolves to the instance. The
/// constructor's return value is discarded: the captured frame itself is the
/// result, its cells outliving the call.
pub fn instantiate(template: &FrameRef, queue: &mut VecDeque<String>, scope: &FrameRef,
                   depth: usize, line: usize, name: &str)
                   -> EvalResult<Value> {
    let args = extract_call_args(scope, queue, depth, line)?;
    let instance = Frame::instantiate(template);
    let header = instance.borrow().line_index;

    let mut injected: HashMap<String, CellRef> = HashMap::new();
    for meta in ["_DEBUG", "_MAX_RECURSION"] {
        if let Some(cell) = scope.borrow().lookup(meta) {
            injected.insert(meta.to_string(), cell);
        }
    }

    run_wrapped(&instance, args, injected, depth, header, name)?;
    Ok(Value::Func(instance))
}

fn run_wrapped(callee: &FrameRef, args: Vec<Value>, injected: HashMap<String, CellRef>,
               depth: usize, header: usize, name: &str)
               -> EvalResult<(Value, Exit)> {
    run(callee, args, injected, depth + 1, header).map_err(|stack| {
        stack.wrap(RuntimeError::InFunction { name: name.to_string() }, header)
    })
}

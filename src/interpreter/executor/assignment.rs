use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError, SyntaxError},
    interpreter::{
        builtins,
        evaluator::{array, call, core::evaluate},
        frame::{CellRef, FrameRef},
        lexer::stitch,
        value::{core::Value, tag::Type},
    },
    util::num::wrap_index,
};

/// The write target of an assignment: a variable cell, or one element of a
/// shared array storage reached through a subscript chain.
enum Slot {
    Cell(CellRef),
    Element(Rc<RefCell<Vec<Value>>>, usize),
}

impl Slot {
    fn read(&self) -> Value {
        match self {
            Self::Cell(cell) => cell.borrow().clone(),
            Self::Element(items, at) => items.borrow()[*at].clone(),
        }
    }

    fn write(&self, value: Value) {
        match self {
            Self::Cell(cell) => *cell.borrow_mut() = value,
            Self::Element(items, at) => items.borrow_mut()[*at] = value,
        }
    }
}

/// Executes a statement that begins with a bare identifier.
///
/// A scope variable may be followed by a `[index]` chain and then `=`
/// (type-checked assignment) or `:=` (coerced assignment); with neither, the
/// whole line is an expression statement whose value is discarded. A
/// built-in name is called and its result discarded. Anything else is an
/// unknown command.
pub fn execute(scope: &FrameRef, command: &str, tokens: &mut VecDeque<String>, depth: usize,
               line: usize)
               -> EvalResult<()> {
    let Some(cell) = scope.borrow().lookup(command) else {
        if builtins::exists(command) {
            let args = call::extract_call_args(scope, tokens, depth, line)?;
            builtins::invoke(command, &args, line)?;
            return Ok(());
        }
        return Err(ErrorStack::new(RuntimeError::UnknownCommand { name: command.to_string() },
                                   line));
    };

    let snapshot = tokens.clone();
    let mut slot = Slot::Cell(cell);

    while tokens.front().map(String::as_str) == Some("[") {
        let current = slot.read();
        let Value::Array { items, .. } = current else {
            return Err(ErrorStack::new(RuntimeError::IndexNotSupported { tag: current.tag() },
                                       line));
        };

        tokens.pop_front();
        let index = array::extract_index(scope, tokens, depth, line)?;
        let len = items.borrow().len();
        let at = wrap_index(index, len)
            .ok_or_else(|| ErrorStack::new(RuntimeError::EmptyArray, line))?;
        slot = Slot::Element(items, at);
    }

    match tokens.front().map(String::as_str) {
        Some("=") => {
            tokens.pop_front();
            assign(scope, command, &slot, tokens, depth, line, false)
        },
        Some(":=") => {
            tokens.pop_front();
            assign(scope, command, &slot, tokens, depth, line, true)
        },
        _ => {
            // No assignment: the line is a plain expression statement. The
            // subscript lookahead may have consumed tokens, so evaluation
            // restarts from the untouched snapshot.
            *tokens = snapshot;
            let expression = format!("{command} {}", stitch(tokens));
            evaluate(scope, &expression, depth, line)?;
            Ok(())
        },
    }
}

fn assign(scope: &FrameRef, name: &str, slot: &Slot, tokens: &mut VecDeque<String>, depth: usize,
          line: usize, coerce: bool)
          -> EvalResult<()> {
    let expression = stitch(tokens);
    if expression.trim().is_empty() {
        return Err(ErrorStack::new(SyntaxError::MissingValue, line));
    }

    let mut value = evaluate(scope, &expression, depth, line)?;

    if !coerce {
        let target = slot.read().tag();
        if value.tag() != target {
            if target.is_array() && value.is_empty_wildcard_array() {
                // The empty literal adopts the target's element tag.
                if let Value::Array { elem, .. } = &mut value {
                    *elem = target.elem().expect("target tag is an array").clone();
                }
            } else if target.elem() == Some(&Type::Val) && value.tag().is_array() {
                // A `val[]` target adopts the tag of whatever array arrives.
            } else {
                return Err(ErrorStack::new(RuntimeError::AssignmentTypeMismatch {
                                               expected: target,
                                               found:    value.tag(),
                                           },
                                           line));
            }
        }
    }

    if scope.borrow().debug_enabled() {
        println!("Updated variable {name}({}).", value.tag());
    }
    slot.write(value);
    Ok(())
}

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError},
    interpreter::{
        evaluator::core::evaluate,
        executor::{assignment, condition, declaration, function_def, loops},
        frame::{CellRef, FrameRef},
        lexer::{stitch, tokenize, EXPRESSION_DELIMITERS},
        value::{core::Value, tag::Type},
    },
};

/// The executor's tri-state exit signal.
///
/// `None` falls through to the next statement, `Return` unwinds to the
/// nearest function boundary carrying a value, `Break` unwinds to the
/// nearest enclosing loop, which consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Plain fall-through.
    None,
    /// `return`: propagate the value upward through block frames.
    Return,
    /// `break`: terminate the innermost `for`.
    Break,
}

/// Executes the body of a frame line by line.
///
/// `args` are bound positionally over the declared parameters (primitives by
/// copy, arrays and functions by shared handle) and `injected` cells are
/// installed verbatim before them. `depth` is checked against the scope's
/// `_MAX_RECURSION` before anything runs. `line_offset` is the number of
/// source lines above this body in the original program; it turns body-local
/// indexes into the absolute 1-based lines used in error frames.
///
/// Each line is tokenized and dispatched on its first token; the evaluator
/// is re-entered for every expression, and block statements (`if`, `for`,
/// `func`) consume the following lines up to their terminator.
pub fn run(scope: &FrameRef, args: Vec<Value>, injected: HashMap<String, CellRef>, depth: usize,
           line_offset: usize)
           -> EvalResult<(Value, Exit)> {
    let limit = scope.borrow().max_recursion();
    if depth > limit {
        let header = scope.borrow().line_index.max(1);
        return Err(ErrorStack::new(RuntimeError::RecursionLimit { limit }, header));
    }

    for (name, cell) in injected {
        scope.borrow_mut().variables.insert(name, cell);
    }
    bind_arguments(scope, args)?;

    let code = scope.borrow().code.clone();
    let lines: Vec<&str> = code.split('\n').collect();

    let mut index = 0;
    while index < lines.len() {
        let line_no = line_offset + index + 1;
        let mut tokens: VecDeque<String> =
            tokenize(lines[index], EXPRESSION_DELIMITERS, true).into();

        while let Some(command) = tokens.pop_front() {
            match command.as_str() {
                "#" => tokens.clear(),

                "val" | "int" | "float" | "string" | "bool" => {
                    declaration::declare(scope, &command, &mut tokens, depth, line_no)?;
                },

                "if" => {
                    let (value, exit, next) =
                        condition::execute(scope, &mut tokens, index, &lines, line_offset,
                                           depth)?;
                    index = next;
                    if exit != Exit::None {
                        return Ok((value, exit));
                    }
                },

                "for" => {
                    let (value, exit, next) =
                        loops::execute(scope, &mut tokens, index, &lines, line_offset, depth)?;
                    index = next;
                    if exit != Exit::None {
                        return Ok((value, exit));
                    }
                },

                "func" => {
                    index = function_def::define(scope, &mut tokens, index, &lines,
                                                 line_offset)?;
                },

                "return" => {
                    let value = return_value(scope, &mut tokens, depth, line_no)?;
                    return Ok((value, Exit::Return));
                },

                "break" => return Ok((Value::Null, Exit::Break)),

                _ => assignment::execute(scope, &command, &mut tokens, depth, line_no)?,
            }
        }

        index += 1;
    }

    Ok((Value::Null, Exit::None))
}

/// Binds call arguments over the declared parameters.
///
/// Binding is positional; supplying more arguments than parameters is an
/// error, supplying fewer leaves the remaining slots at their tag's default.
/// A parameter accepts an argument of its own tag, or anything when its tag
/// is `val`. Every binding installs a fresh cell: primitives are copied into
/// it, arrays and functions bring their shared storage along.
fn bind_arguments(scope: &FrameRef, args: Vec<Value>) -> EvalResult<()> {
    let parameters = scope.borrow().arguments.clone();
    let header = scope.borrow().line_index.max(1);

    for (position, value) in args.into_iter().enumerate() {
        let Some(parameter) = parameters.get(position) else {
            return Err(ErrorStack::new(RuntimeError::TooManyArguments, header));
        };

        if parameter.tag != Type::Val && parameter.tag != value.tag() {
            return Err(ErrorStack::new(RuntimeError::ArgumentTypeMismatch {
                                           name: parameter.name.clone(),
                                       },
                                       header));
        }

        scope.borrow_mut()
             .variables
             .insert(parameter.name.clone(), Rc::new(RefCell::new(value)));
    }
    Ok(())
}

/// Evaluates the trailing expression of a `return` statement.
///
/// A bare `return` yields `null` without a type check; a valued `return`
/// must match the declared return tag unless that tag is the wildcard.
fn return_value(scope: &FrameRef, tokens: &mut VecDeque<String>, depth: usize, line: usize)
                -> EvalResult<Value> {
    let expression = stitch(tokens);
    if expression.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value = evaluate(scope, &expression, depth, line)?;
    let expected = scope.borrow().return_type.clone();
    if expected == Type::Val || value.tag() == expected {
        Ok(value)
    } else {
        Err(ErrorStack::new(RuntimeError::ReturnTypeMismatch { expected,
                                                               found: value.tag() },
                            line))
    }
}

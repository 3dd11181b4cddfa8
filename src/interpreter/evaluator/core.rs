use std::collections::VecDeque;

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError, SyntaxError},
    interpreter::{
        builtins,
        evaluator::{array, binary, call, literal, unary},
        frame::{Frame, FrameRef},
        lexer::{tokenize, EXPRESSION_DELIMITERS},
        value::core::Value,
    },
    util::num::is_number,
};

/// Evaluates one expression against a scope and reduces it to a value.
///
/// The expression text is re-tokenized on every call (bodies are stored as
/// raw source), a fixup pass rewrites unary `-` into `¬`, and the token
/// queue is then reduced with the two-stack shunting-yard scheme: values on
/// one stack, operator tokens on the other, operators reduced whenever the
/// stack top has at least the precedence of the incoming token.
///
/// `depth` is the current call depth, threaded through so calls performed
/// inside the expression still honor `_MAX_RECURSION`. `line` is the
/// absolute 1-based source line the expression came from; every error this
/// expression produces is anchored there.
pub fn evaluate(scope: &FrameRef, expression: &str, depth: usize, line: usize)
                -> EvalResult<Value> {
    let tokens = fix_negation(tokenize(expression, EXPRESSION_DELIMITERS, true));
    let mut queue: VecDeque<String> = tokens.into();
    let mut values: Vec<Value> = Vec::new();
    let mut operators: Vec<String> = Vec::new();

    while let Some(token) = queue.pop_front() {
        let text = token.as_str();
        match text {
            "#" => break,

            "self" => values.push(Value::Func(scope.clone())),

            "super" => values.push(Value::Func(Frame::parent_of(scope))),

            "null" => values.push(Value::Null),

            "true" => values.push(Value::Bool(true)),

            "false" => values.push(Value::Bool(false)),

            "\"" => values.push(literal::string_literal(&mut queue, line)?),

            "." => member_access(scope, &mut queue, &mut values, depth, line)?,

            "new" => {
                let name = queue.pop_front()
                                .ok_or_else(|| {
                                    ErrorStack::new(RuntimeError::InvalidExpression, line)
                                })?;
                let template = resolve_function(scope, &name, line)?;
                values.push(call::instantiate(&template, &mut queue, scope, depth, line, &name)?);
            },

            "[" => {
                let items = array::extract_values(scope, &mut queue, depth, line, "]")?;
                let elem = Value::infer_elem(&items);
                values.push(Value::array(elem, items));
            },

            "(" => operators.push(token.clone()),

            ")" => loop {
                match operators.last().map(String::as_str) {
                    None => {
                        return Err(ErrorStack::new(SyntaxError::UnbalancedParenthesis, line));
                    },
                    Some("(") => {
                        operators.pop();
                        break;
                    },
                    Some(_) => {
                        let op = operators.pop().expect("stack top was just inspected");
                        reduce_once(&mut values, &op, line)?;
                    },
                }
            },

            op if binary::core::is_operator(op) => {
                while let Some(top) = operators.last() {
                    if top == "(" || binary::core::precedence(top) < binary::core::precedence(op)
                    {
                        break;
                    }
                    let top = operators.pop().expect("stack top was just inspected");
                    reduce_once(&mut values, &top, line)?;
                }
                operators.push(token.clone());
            },

            number if is_number(number) => {
                values.push(literal::numeric(number, &mut queue, line)?);
            },

            name if scope.borrow().has(name) => {
                identifier(scope, name, &mut queue, &mut values, depth, line)?;
            },

            name if builtins::exists(name) => {
                let args = call::extract_call_args(scope, &mut queue, depth, line)?;
                values.push(builtins::invoke(name, &args, line)?);
            },

            _ => return Err(ErrorStack::new(RuntimeError::InvalidExpression, line)),
        }
    }

    while let Some(op) = operators.pop() {
        if op == "(" {
            return Err(ErrorStack::new(SyntaxError::MissingClosingParenthesis, line));
        }
        reduce_once(&mut values, &op, line)?;
    }

    values.pop()
          .ok_or_else(|| ErrorStack::new(RuntimeError::EmptyExpression, line))
}

/// Rewrites `-` into the unary `¬` where it cannot be a binary minus: as the
/// first token, or right after another operator. String regions are left
/// untouched.
fn fix_negation(mut tokens: Vec<String>) -> Vec<String> {
    let mut in_string = false;
    for index in 0..tokens.len() {
        if tokens[index] == "\"" {
            in_string = !in_string;
            continue;
        }
        if in_string || tokens[index] != "-" {
            continue;
        }
        if index == 0 || binary::core::is_operator(&tokens[index - 1]) {
            tokens[index] = "¬".to_string();
        }
    }
    tokens
}

/// Pops and applies one operator: unary spellings take one value, binary
/// operators take two (right popped first).
fn reduce_once(values: &mut Vec<Value>, op: &str, line: usize) -> EvalResult<()> {
    if binary::core::is_unary(op) {
        let value = values.pop()
                          .ok_or_else(|| ErrorStack::new(RuntimeError::InvalidExpression, line))?;
        values.push(unary::negate(value, line)?);
        return Ok(());
    }

    let right = values.pop()
                      .ok_or_else(|| ErrorStack::new(RuntimeError::InvalidExpression, line))?;
    let left = values.pop()
                     .ok_or_else(|| ErrorStack::new(RuntimeError::InvalidExpression, line))?;
    values.push(binary::core::apply(op, &left, &right, line)?);
    Ok(())
}

/// Member access: the value under the dot must be a function frame; the next
/// token names a member of that frame. A `func` member followed by `(` is
/// invoked as a method, anything else is pushed as-is.
fn member_access(scope: &FrameRef, queue: &mut VecDeque<String>, values: &mut Vec<Value>,
                 depth: usize, line: usize)
                 -> EvalResult<()> {
    let target = values.pop()
                       .ok_or_else(|| ErrorStack::new(RuntimeError::InvalidExpression, line))?;
    let Value::Func(frame) = target else {
        return Err(ErrorStack::new(RuntimeError::MemberOfNonFunction, line));
    };

    let member = queue.pop_front()
                      .ok_or_else(|| ErrorStack::new(RuntimeError::InvalidExpression, line))?;
    let cell = frame.borrow().lookup(&member).ok_or_else(|| {
                                                 ErrorStack::new(RuntimeError::UnknownMember {
                                                                     name: member.clone(),
                                                                 },
                                                                 line)
                                             })?;

    let value = cell.borrow().clone();
    match value {
        Value::Func(ref template) if queue.front().map(String::as_str) == Some("(") => {
            values.push(call::invoke(template, queue, scope, depth, line, &member)?);
        },
        other => values.push(other),
    }
    Ok(())
}

/// A bare identifier: a `func` followed by `(` is called, an array or string
/// followed by `[` is indexed (chains allowed), anything else is pushed.
fn identifier(scope: &FrameRef, name: &str, queue: &mut VecDeque<String>,
              values: &mut Vec<Value>, depth: usize, line: usize)
              -> EvalResult<()> {
    let cell = scope.borrow().lookup(name).expect("caller checked the name resolves");
    let value = cell.borrow().clone();

    match value {
        Value::Func(ref template) if queue.front().map(String::as_str) == Some("(") => {
            values.push(call::invoke(template, queue, scope, depth, line, name)?);
        },
        mut current => {
            while queue.front().map(String::as_str) == Some("[")
                  && matches!(current, Value::Array { .. } | Value::Str(_))
            {
                queue.pop_front();
                let index = array::extract_index(scope, queue, depth, line)?;
                current = array::index_into(&current, index, line)?;
            }
            values.push(current);
        },
    }
    Ok(())
}

fn resolve_function(scope: &FrameRef, name: &str, line: usize) -> EvalResult<FrameRef> {
    let cell = scope.borrow().lookup(name).ok_or_else(|| {
                                              ErrorStack::new(RuntimeError::UnknownIdentifier {
                                                                  name: name.to_string(),
                                                              },
                                                              line)
                                          })?;
    let value = cell.borrow().clone();
    match value {
        Value::Func(frame) => Ok(frame),
        _ => Err(ErrorStack::new(RuntimeError::NotAFunction { name: name.to_string() }, line)),
    }
}

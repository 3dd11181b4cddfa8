use std::collections::{HashMap, VecDeque};

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError, SyntaxError},
    interpreter::{
        evaluator::core::evaluate,
        executor::core::{run, Exit},
        frame::{Frame, FrameRef},
        lexer::{stitch, tokenize, BLOCK_DELIMITERS},
        value::core::Value,
    },
};

/// A `for` loop: its condition text, the absolute line of the `for`
/// statement, and the raw body text.
pub struct LoopBlock {
    /// The condition expression, re-evaluated before every iteration.
    pub condition: String,
    /// Absolute 1-based line of the `for` statement.
    pub loop_line: usize,
    /// The raw source of the loop body.
    pub code:      String,
}

/// Scans the lines after a `for` statement up to its matching `end for`,
/// tracking nested loops. Returns the block and the index of the `end for`
/// line.
pub fn parse_block(tokens: &mut VecDeque<String>, start: usize, lines: &[&str],
                   line_offset: usize)
                   -> EvalResult<(LoopBlock, usize)> {
    let condition = stitch(tokens);
    let loop_line = line_offset + start + 1;

    let mut index = start + 1;
    let mut nested = 0;
    let mut found_boundary = false;
    let mut code = String::new();

    while index < lines.len() {
        let words = tokenize(lines[index], BLOCK_DELIMITERS, false);

        if words.first().map(String::as_str) == Some("for") {
            nested += 1;
        } else if words.len() > 1 && words[0] == "end" && words[1] == "for" {
            if nested == 0 {
                found_boundary = true;
                break;
            }
            nested -= 1;
        }

        code.push_str(lines[index]);
        code.push('\n');
        index += 1;
    }

    if !found_boundary {
        return Err(ErrorStack::new(SyntaxError::UnclosedFor, loop_line));
    }

    Ok((LoopBlock { condition,
                    loop_line,
                    code },
        index))
}

/// Executes a `for` loop.
///
/// The condition is re-evaluated against the current scope before every
/// iteration and must be a boolean. Each iteration runs the body in a fresh
/// child frame whose cells alias the current scope's. `Return` from the
/// body propagates upward; `Break` terminates the loop here.
pub fn execute(scope: &FrameRef, tokens: &mut VecDeque<String>, start: usize, lines: &[&str],
               line_offset: usize, depth: usize)
               -> EvalResult<(Value, Exit, usize)> {
    let (block, next) = parse_block(tokens, start, lines, line_offset)?;

    loop {
        let condition = evaluate(scope, &block.condition, depth, block.loop_line)?;
        let keep_going = match condition {
            Value::Bool(truthy) => truthy,
            other => {
                return Err(ErrorStack::new(RuntimeError::ConditionNotBool {
                                               found: other.tag(),
                                           },
                                           block.loop_line));
            },
        };
        if !keep_going {
            break;
        }

        let child = Frame::block(scope, block.code.clone(), block.loop_line);
        let (value, exit) = run(&child, Vec::new(), HashMap::new(), depth + 1, block.loop_line)?;
        match exit {
            Exit::Return => return Ok((value, Exit::Return, next)),
            Exit::Break => break,
            Exit::None => {},
        }
    }

    Ok((Value::Null, Exit::None, next))
}

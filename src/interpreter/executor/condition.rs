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

/// One arm of an `if` cascade: its condition text (the literal `else` for
/// the unconditional arm), the absolute line the condition sits on, and the
/// raw body text.
pub struct ConditionBlock {
    /// The condition expression, or `"else"`.
    pub condition:      String,
    /// Absolute 1-based line of the `if` / `else if` / `else` marker.
    pub condition_line: usize,
    /// The raw source of the arm's body.
    pub code:           String,
}

/// Scans the lines after an `if` statement into condition blocks.
///
/// Arms are delimited by `else if` and `else` at nesting level zero and the
/// cascade ends at the matching `end if`; a counter tracks nested `if`
/// cascades so inner arms never bind to the outer one. Returns the blocks
/// and the index of the `end if` line.
pub fn parse_blocks(tokens: &mut VecDeque<String>, start: usize, lines: &[&str],
                    line_offset: usize)
                    -> EvalResult<(Vec<ConditionBlock>, usize)> {
    let condition = stitch(tokens);
    let mut blocks = vec![ConditionBlock { condition,
                                           condition_line: line_offset + start + 1,
                                           code: String::new() }];

    let mut index = start + 1;
    let mut nested = 0;
    let mut found_boundary = false;

    while index < lines.len() {
        let words = tokenize(lines[index], BLOCK_DELIMITERS, false);

        if words.first().map(String::as_str) == Some("if") {
            nested += 1;
        } else if nested == 0
                  && words.len() > 1
                  && words[0] == "else"
                  && words[1] == "if"
        {
            blocks.push(ConditionBlock { condition:      words[2..].join(" "),
                                         condition_line: line_offset + index + 1,
                                         code:           String::new(), });
            index += 1;
            continue;
        } else if nested == 0 && words.first().map(String::as_str) == Some("else") {
            blocks.push(ConditionBlock { condition:      "else".to_string(),
                                         condition_line: line_offset + index + 1,
                                         code:           String::new(), });
            index += 1;
            continue;
        }

        if words.len() > 1 && words[0] == "end" && words[1] == "if" {
            if nested == 0 {
                found_boundary = true;
                break;
            }
            nested -= 1;
        }

        let block = blocks.last_mut().expect("the cascade always has at least one arm");
        block.code.push_str(lines[index]);
        block.code.push('\n');
        index += 1;
    }

    if !found_boundary {
        let last_line = blocks.last().expect("at least one arm").condition_line;
        return Err(ErrorStack::new(SyntaxError::UnclosedIf, last_line));
    }

    Ok((blocks, index))
}

/// Executes an `if` cascade.
///
/// Conditions are evaluated in order against the current scope and must be
/// booleans; the first truthy arm (or the `else` arm, unconditionally) runs
/// in a child frame whose cells alias the current scope's. The child's exit
/// signal is passed through untouched, so `return` and `break` keep
/// unwinding.
pub fn execute(scope: &FrameRef, tokens: &mut VecDeque<String>, start: usize, lines: &[&str],
               line_offset: usize, depth: usize)
               -> EvalResult<(Value, Exit, usize)> {
    let (blocks, next) = parse_blocks(tokens, start, lines, line_offset)?;

    for block in blocks {
        let chosen = if block.condition == "else" {
            true
        } else {
            let value = evaluate(scope, &block.condition, depth, block.condition_line)?;
            match value {
                Value::Bool(truthy) => truthy,
                other => {
                    return Err(ErrorStack::new(RuntimeError::ConditionNotBool {
                                                   found: other.tag(),
                                               },
                                               block.condition_line));
                },
            }
        };

        if chosen {
            let child = Frame::block(scope, block.code, block.condition_line);
            let (value, exit) =
                run(&child, Vec::new(), HashMap::new(), depth + 1, block.condition_line)?;
            return Ok((value, exit, next));
        }
    }

    Ok((Value::Null, Exit::None, next))
}

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError, SyntaxError},
    interpreter::{
        evaluator::array,
        frame::{Frame, FrameRef, Parameter},
        lexer::{tokenize, BLOCK_DELIMITERS},
        value::{core::Value, tag::Type},
    },
    util::ident::{has_valid_name, is_reserved},
};

/// Executes a `func` statement: parses the header, captures the body up to
/// the matching `end NAME`, and stores the resulting template in the current
/// scope under NAME.
///
/// Parameters are a comma-separated `type name` list; parameter types are
/// the value-type keywords (plus `[]` dimensions), never `func` or `null`.
/// The optional return tag follows the closing parenthesis and defaults to
/// `null`. Returns the index of the `end NAME` line.
pub fn define(scope: &FrameRef, tokens: &mut VecDeque<String>, start: usize, lines: &[&str],
              line_offset: usize)
              -> EvalResult<usize> {
    let header_line = line_offset + start + 1;

    let Some(name) = tokens.pop_front() else {
        return Err(ErrorStack::new(SyntaxError::MissingName { what: "function" }, header_line));
    };
    if !has_valid_name(&name) {
        return Err(ErrorStack::new(SyntaxError::InvalidName { name }, header_line));
    }
    if is_reserved(&name) {
        return Err(ErrorStack::new(SyntaxError::ReservedName { name }, header_line));
    }
    if scope.borrow().has(&name) {
        return Err(ErrorStack::new(RuntimeError::AlreadyDeclared { name }, header_line));
    }

    if tokens.pop_front().as_deref() != Some("(") {
        return Err(ErrorStack::new(SyntaxError::MissingOpeningParenthesis, header_line));
    }

    let parameters = parse_parameters(tokens, header_line)?;
    let return_type = parse_return_type(tokens, header_line)?;

    let mut index = start + 1;
    let mut code = String::new();
    let mut ended = false;
    while index < lines.len() {
        let words = tokenize(lines[index], BLOCK_DELIMITERS, false);
        if words.len() > 1 && words[0] == "end" && words[1] == name {
            ended = true;
            break;
        }
        code.push_str(lines[index]);
        code.push('\n');
        index += 1;
    }
    if !ended {
        return Err(ErrorStack::new(SyntaxError::UnclosedFunction { name }, header_line));
    }

    let template = Frame { arguments: parameters,
                           variables: HashMap::new(),
                           return_type,
                           parent: Some(scope.clone()),
                           name: name.clone(),
                           line_index: header_line,
                           code };
    scope.borrow_mut()
         .variables
         .insert(name,
                 Rc::new(RefCell::new(Value::Func(Rc::new(RefCell::new(template))))));
    Ok(index)
}

fn parse_parameters(tokens: &mut VecDeque<String>, line: usize) -> EvalResult<Vec<Parameter>> {
    let mut parameters = Vec::new();

    loop {
        let Some(token) = tokens.pop_front() else {
            return Err(ErrorStack::new(SyntaxError::MissingClosingParenthesis, line));
        };
        if token == ")" {
            break;
        }

        let base = match Type::base(&token) {
            Some(tag) if tag != Type::Null && tag != Type::Func => tag,
            _ => return Err(ErrorStack::new(SyntaxError::InvalidParameterType { token }, line)),
        };
        let dims = array::dimension_suffix(tokens, line)?;
        let tag = base.wrap_array(dims);

        let Some(param_name) = tokens.pop_front() else {
            return Err(ErrorStack::new(SyntaxError::MissingName { what: "parameter" }, line));
        };
        if !has_valid_name(&param_name) {
            return Err(ErrorStack::new(SyntaxError::InvalidName { name: param_name }, line));
        }
        parameters.push(Parameter { name: param_name,
                                    tag });

        match tokens.pop_front() {
            Some(separator) if separator == "," => {},
            Some(separator) if separator == ")" => break,
            Some(separator) => {
                return Err(ErrorStack::new(SyntaxError::InvalidFunctionSyntax {
                                               token: separator,
                                           },
                                           line));
            },
            None => return Err(ErrorStack::new(SyntaxError::MissingClosingParenthesis, line)),
        }
    }

    Ok(parameters)
}

fn parse_return_type(tokens: &mut VecDeque<String>, line: usize) -> EvalResult<Type> {
    let Some(token) = tokens.pop_front() else {
        return Ok(Type::Null);
    };

    let base = match Type::base(&token) {
        Some(tag) if tag != Type::Null => tag,
        _ => return Err(ErrorStack::new(SyntaxError::InvalidReturnType { token }, line)),
    };
    let dims = array::dimension_suffix(tokens, line)?;
    Ok(base.wrap_array(dims))
}

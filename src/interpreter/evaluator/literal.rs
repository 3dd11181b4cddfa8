use std::collections::VecDeque;

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError, SyntaxError},
    interpreter::value::core::Value,
    util::num::is_number,
};

/// Builds a numeric value from a leading numeric token.
///
/// The lexer splits `3.14` into `3`, `.`, `14`; this merges a
/// `digit . digit` sequence back into one float token. A second decimal
/// point in the same literal is a syntax error. Tokens that parse as `i64`
/// become `int`, everything else falls back to the `f64` parse (which also
/// covers exponent forms like `1e5`).
pub fn numeric(token: &str, queue: &mut VecDeque<String>, line: usize) -> EvalResult<Value> {
    let mut text = token.to_string();

    if queue.front().map(String::as_str) == Some(".") {
        queue.pop_front();
        let fraction = match queue.pop_front() {
            Some(part) if is_number(&part) && !part.contains('.') => part,
            part => {
                let text = format!("{text}.{}", part.unwrap_or_default());
                return Err(ErrorStack::new(RuntimeError::ParseNumber { text }, line));
            },
        };
        text = format!("{text}.{fraction}");

        if queue.front().map(String::as_str) == Some(".") {
            return Err(ErrorStack::new(SyntaxError::DuplicateDecimalPoint, line));
        }
    }

    if let Ok(n) = text.parse::<i64>() {
        return Ok(Value::Int(n));
    }
    match text.parse::<f64>() {
        Ok(x) => Ok(Value::Float(x)),
        Err(_) => Err(ErrorStack::new(RuntimeError::ParseNumber { text }, line)),
    }
}

/// Assembles a string literal from the tokens following an opening `"`.
///
/// Tokens are appended verbatim (the lexer preserved whitespace inside the
/// region), the escape token `\"` decodes to a plain quote, and the first
/// bare `"` closes the literal. Running out of tokens first is an error.
pub fn string_literal(queue: &mut VecDeque<String>, line: usize) -> EvalResult<Value> {
    let mut text = String::new();

    while let Some(token) = queue.pop_front() {
        match token.as_str() {
            "\"" => return Ok(Value::Str(text)),
            "\\\"" => text.push('"'),
            _ => text.push_str(&token),
        }
    }
    Err(ErrorStack::new(SyntaxError::UnclosedString, line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::{tokenize, EXPRESSION_DELIMITERS};

    fn queue_of(text: &str) -> VecDeque<String> {
        tokenize(text, EXPRESSION_DELIMITERS, true).into()
    }

    #[test]
    fn merges_split_float_tokens() {
        let mut queue = queue_of("3.25");
        let first = queue.pop_front().unwrap();
        let value = numeric(&first, &mut queue, 1).unwrap();
        assert!(matches!(value, Value::Float(x) if x == 3.25));
        assert!(queue.is_empty());
    }

    #[test]
    fn rejects_duplicate_decimal_points() {
        let mut queue = queue_of("3.1.4");
        let first = queue.pop_front().unwrap();
        assert!(numeric(&first, &mut queue, 1).is_err());
    }

    #[test]
    fn assembles_strings_with_escapes() {
        let mut queue = queue_of("\"say \\\"hi\\\"\"");
        assert_eq!(queue.pop_front().unwrap(), "\"");
        let value = string_literal(&mut queue, 1).unwrap();
        assert!(matches!(value, Value::Str(s) if s == "say \"hi\""));
    }

    #[test]
    fn unterminated_strings_are_errors() {
        let mut queue = queue_of("\"oops");
        queue.pop_front();
        assert!(string_literal(&mut queue, 1).is_err());
    }
}

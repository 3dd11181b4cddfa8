use crate::{
    error::{ErrorStack, EvalResult, RuntimeError},
    interpreter::value::core::Value,
    util::num::is_number,
};

/// `yell(s)`: the upper-cased string.
pub fn yell(args: &[Value], line: usize) -> EvalResult<Value> {
    let text = expect_string(&args[0], "yell", line)?;
    Ok(Value::Str(text.to_uppercase()))
}

/// `whisper(s)`: the lower-cased string.
pub fn whisper(args: &[Value], line: usize) -> EvalResult<Value> {
    let text = expect_string(&args[0], "whisper", line)?;
    Ok(Value::Str(text.to_lowercase()))
}

/// `isNumeric(s)`: whether the string parses as a number.
pub fn is_numeric(args: &[Value], line: usize) -> EvalResult<Value> {
    let text = expect_string(&args[0], "isNumeric", line)?;
    Ok(Value::Bool(is_number(text)))
}

/// `isAlphaNumeric(s)`: whether the string is nonempty and contains only
/// ASCII letters and digits.
pub fn is_alpha_numeric(args: &[Value], line: usize) -> EvalResult<Value> {
    let text = expect_string(&args[0], "isAlphaNumeric", line)?;
    Ok(Value::Bool(!text.is_empty() && text.chars().all(|c| c.is_ascii_alphanumeric())))
}

fn expect_string<'a>(value: &'a Value, name: &'static str, line: usize)
                     -> EvalResult<&'a str> {
    match value {
        Value::Str(text) => Ok(text),
        _ => Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                     name,
                                     details: "Argument must be a string".to_string(),
                                 },
                                 line)),
    }
}

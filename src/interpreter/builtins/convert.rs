use crate::{
    error::{ErrorStack, EvalResult, RuntimeError},
    interpreter::value::core::Value,
};

/// `toString(v)`: the stringification of any value. Floats render in the
/// shortest decimal form that round-trips.
pub fn to_string(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Str(args[0].to_string()))
}

/// `toInt(v)`: parses a string, passes an int through, truncates a float
/// toward zero.
#[allow(clippy::cast_possible_truncation)]
pub fn to_int(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Str(text) => match text.parse::<i64>() {
            Ok(n) => Ok(Value::Int(n)),
            Err(_) => Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                              name:    "toInt",
                                              details: format!("\"{text}\" is not an int"),
                                          },
                                          line)),
        },
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Float(x) => Ok(Value::Int(*x as i64)),
        other => Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                         name:    "toInt",
                                         details: format!("Cannot convert a {}", other.tag()),
                                     },
                                     line)),
    }
}

/// `toFloat(v)`: parses a string, widens an int, passes a float through.
#[allow(clippy::cast_precision_loss)]
pub fn to_float(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Str(text) => match text.parse::<f64>() {
            Ok(x) => Ok(Value::Float(x)),
            Err(_) => Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                              name:    "toFloat",
                                              details: format!("\"{text}\" is not a float"),
                                          },
                                          line)),
        },
        Value::Int(n) => Ok(Value::Float(*n as f64)),
        Value::Float(x) => Ok(Value::Float(*x)),
        other => Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                         name:    "toFloat",
                                         details: format!("Cannot convert a {}", other.tag()),
                                     },
                                     line)),
    }
}

/// `typeOf(v)`: the value's type tag as a string.
pub fn type_of(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Str(args[0].tag().to_string()))
}

/// `toUnicode(s)`: the first byte of a length-1 string.
pub fn to_unicode(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Str(text) if text.len() == 1 => Ok(Value::Int(i64::from(text.as_bytes()[0]))),
        Value::Str(_) => Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                                 name:    "toUnicode",
                                                 details: "Expected a string of length 1"
                                                          .to_string(),
                                             },
                                             line)),
        other => Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                         name:    "toUnicode",
                                         details: format!("Expected a string, got a {}",
                                                          other.tag()),
                                     },
                                     line)),
    }
}

/// `fromUnicode(i)`: a one-character string for a code point.
pub fn from_unicode(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Int(n) => u32::try_from(*n).ok()
                                          .and_then(char::from_u32)
                                          .map(|c| Value::Str(c.to_string()))
                                          .ok_or_else(|| {
                                              ErrorStack::new(RuntimeError::InvalidCodePoint {
                                                                  value: *n,
                                                              },
                                                              line)
                                          }),
        other => Err(ErrorStack::new(RuntimeError::InvalidArgument {
                                         name:    "fromUnicode",
                                         details: format!("Expected an int, got a {}",
                                                          other.tag()),
                                     },
                                     line)),
    }
}

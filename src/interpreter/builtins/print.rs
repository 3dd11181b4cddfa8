use crate::{error::EvalResult, interpreter::value::core::Value};

/// Prints the space-joined stringification of its arguments, followed by a
/// newline, and returns the joined string.
pub fn print(args: &[Value], _line: usize) -> EvalResult<Value> {
    let message = args.iter()
                      .map(ToString::to_string)
                      .collect::<Vec<_>>()
                      .join(" ");
    println!("{message}");
    Ok(Value::Str(message))
}

use crate::{
    error::{ErrorStack, EvalResult, RuntimeError},
    interpreter::value::core::Value,
};

/// `print` and its stringification.
pub mod print;
/// Conversions: `toString`, `toInt`, `toFloat`, `typeOf`, `toUnicode`,
/// `fromUnicode`.
pub mod convert;
/// String helpers: `yell`, `whisper`, `isNumeric`, `isAlphaNumeric`.
pub mod strings;
/// Array helpers: `len`, `append`, `truncate`.
pub mod arrays;
/// Numeric helpers: `round`, `sqrt`, `random`.
pub mod numeric;

/// Type alias for built-in function handlers.
///
/// A built-in receives the evaluated argument values and the line number of
/// the call, and returns its result (or an error) — it never sees the scope.
type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a built-in.
#[derive(Clone, Copy)]
enum Arity {
    /// The built-in takes exactly `n` arguments.
    Exact(usize),
    /// The built-in is variadic.
    Any,
}

/// Defines the built-in library by generating a lookup table and the public
/// name list (which doubles as part of the reserved-word set).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// The names of every built-in function. These are reserved words.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"          => { arity: Arity::Any,      func: print::print },
    "toString"       => { arity: Arity::Exact(1), func: convert::to_string },
    "toInt"          => { arity: Arity::Exact(1), func: convert::to_int },
    "toFloat"        => { arity: Arity::Exact(1), func: convert::to_float },
    "yell"           => { arity: Arity::Exact(1), func: strings::yell },
    "whisper"        => { arity: Arity::Exact(1), func: strings::whisper },
    "typeOf"         => { arity: Arity::Exact(1), func: convert::type_of },
    "len"            => { arity: Arity::Exact(1), func: arrays::len },
    "random"         => { arity: Arity::Exact(0), func: numeric::random },
    "append"         => { arity: Arity::Exact(2), func: arrays::append },
    "truncate"       => { arity: Arity::Exact(2), func: arrays::truncate },
    "round"          => { arity: Arity::Exact(1), func: numeric::round },
    "sqrt"           => { arity: Arity::Exact(1), func: numeric::sqrt },
    "isNumeric"      => { arity: Arity::Exact(1), func: strings::is_numeric },
    "isAlphaNumeric" => { arity: Arity::Exact(1), func: strings::is_alpha_numeric },
    "toUnicode"      => { arity: Arity::Exact(1), func: convert::to_unicode },
    "fromUnicode"    => { arity: Arity::Exact(1), func: convert::from_unicode },
}

/// Whether `name` is a built-in function.
#[must_use]
pub fn exists(name: &str) -> bool {
    BUILTIN_TABLE.iter().any(|def| def.name == name)
}

/// Runs a built-in by name after checking its arity.
pub fn invoke(name: &str, args: &[Value], line: usize) -> EvalResult<Value> {
    let def = BUILTIN_TABLE.iter()
                           .find(|def| def.name == name)
                           .ok_or_else(|| {
                               ErrorStack::new(RuntimeError::UnknownIdentifier {
                                                   name: name.to_string(),
                                               },
                                               line)
                           })?;

    if let Arity::Exact(expected) = def.arity {
        if args.len() != expected {
            return Err(ErrorStack::new(RuntimeError::ArityMismatch { name: def.name,
                                                                     expected },
                                       line));
        }
    }

    (def.func)(args, line)
}

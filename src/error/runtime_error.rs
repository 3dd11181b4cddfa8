use crate::interpreter::value::tag::Type;

#[derive(Debug)]
/// Represents all errors that can be raised while evaluating expressions and
/// executing statements.
///
/// Variants render to a bare message; the line position is added by the
/// [`ErrorStack`](crate::error::ErrorStack) frame the message ends up in.
pub enum RuntimeError {
    /// A statement began with a name that is neither a variable, a keyword
    /// nor a built-in.
    UnknownCommand {
        /// The unrecognized name.
        name: String,
    },
    /// An expression referenced a name that does not resolve in scope.
    UnknownIdentifier {
        /// The unresolved name.
        name: String,
    },
    /// Member access named a variable the target frame does not hold.
    UnknownMember {
        /// The missing member name.
        name: String,
    },
    /// A declaration reused a name that already resolves in the scope.
    AlreadyDeclared {
        /// The conflicting name.
        name: String,
    },
    /// `new` or a call targeted a value that is not a function.
    NotAFunction {
        /// The name of the non-callable value.
        name: String,
    },
    /// Member access (`.`) was applied to a non-function value.
    MemberOfNonFunction,
    /// A binary operator received operand types it is not defined for.
    InvalidOperands {
        /// The operator token as written.
        op:    String,
        /// Type tag of the left operand.
        left:  Type,
        /// Type tag of the right operand.
        right: Type,
    },
    /// Unary negation was applied to a type it is not defined for.
    InvalidUnaryOperand {
        /// Type tag of the operand.
        tag: Type,
    },
    /// Attempted division (or modulo) with a zero divisor.
    DivisionByZero,
    /// The declared type of a new variable does not match its value.
    DeclarationTypeMismatch {
        /// The declared type tag.
        declared: Type,
        /// The tag of the evaluated value.
        found:    Type,
    },
    /// A `=` assignment would change the type of the target.
    AssignmentTypeMismatch {
        /// The tag currently held by the target.
        expected: Type,
        /// The tag of the evaluated value.
        found:    Type,
    },
    /// A `return` expression does not match the declared return tag.
    ReturnTypeMismatch {
        /// The declared return tag.
        expected: Type,
        /// The tag of the returned value.
        found:    Type,
    },
    /// An `if` or `for` condition evaluated to a non-boolean.
    ConditionNotBool {
        /// The tag of the condition value.
        found: Type,
    },
    /// An argument's tag does not match the parameter declaration.
    ArgumentTypeMismatch {
        /// The parameter name.
        name: String,
    },
    /// More arguments were supplied than the function declares.
    TooManyArguments,
    /// The call depth exceeded the `_MAX_RECURSION` bound.
    RecursionLimit {
        /// The bound that was exceeded.
        limit: usize,
    },
    /// Indexed into an array with no elements.
    EmptyArray,
    /// Indexed into an empty string.
    EmptyString,
    /// An index expression did not reduce to a single `int`.
    InvalidIndex,
    /// Subscripted a value that is neither an array nor a string.
    IndexNotSupported {
        /// The tag of the subscripted value.
        tag: Type,
    },
    /// The expression could not be reduced.
    InvalidExpression,
    /// The expression contained no value at all.
    EmptyExpression,
    /// A token could not be parsed as the number it looked like.
    ParseNumber {
        /// The offending token text.
        text: String,
    },
    /// A built-in received the wrong number of arguments.
    ArityMismatch {
        /// The built-in name.
        name:     &'static str,
        /// The expected argument count.
        expected: usize,
    },
    /// A built-in received an argument of the wrong type or shape.
    InvalidArgument {
        /// The built-in name.
        name:    &'static str,
        /// What was expected instead.
        details: String,
    },
    /// `sqrt` of a negative number.
    NegativeSqrt,
    /// `fromUnicode` received an int outside the valid code point range.
    InvalidCodePoint {
        /// The rejected value.
        value: i64,
    },
    /// Context frame added while an error crosses a function boundary.
    InFunction {
        /// The function name.
        name: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand { name } => write!(f, "Unknown command \"{name}\""),
            Self::UnknownIdentifier { name } => write!(f, "Unknown identifier \"{name}\""),
            Self::UnknownMember { name } => write!(f, "Unknown member \"{name}\""),
            Self::AlreadyDeclared { name } => write!(f, "\"{name}\" was already declared"),
            Self::NotAFunction { name } => write!(f, "\"{name}\" is not a function"),
            Self::MemberOfNonFunction => {
                write!(f, "Cannot access a member of a non-function value")
            },
            Self::InvalidOperands { op, left, right } => {
                write!(f, "Cannot apply \"{op}\" to {left} and {right}")
            },
            Self::InvalidUnaryOperand { tag } => write!(f, "Cannot negate a value of type {tag}"),
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::DeclarationTypeMismatch { declared, found } => {
                write!(f, "Invalid variable type: expected {declared} but the value is {found}")
            },
            Self::AssignmentTypeMismatch { expected, found } => {
                write!(f, "Variable type mismatch: expected type {expected} but got type {found}")
            },
            Self::ReturnTypeMismatch { expected, found } => {
                write!(f, "Invalid return type: expected {expected} but got {found}")
            },
            Self::ConditionNotBool { found } => {
                write!(f, "Invalid condition: expected a bool but got {found}")
            },
            Self::ArgumentTypeMismatch { name } => {
                write!(f, "Argument type mismatch for the argument \"{name}\"")
            },
            Self::TooManyArguments => write!(f, "Too many arguments"),
            Self::RecursionLimit { limit } => {
                write!(f, "Maximum recursion depth of {limit} exceeded")
            },
            Self::EmptyArray => write!(f, "Array is empty"),
            Self::EmptyString => write!(f, "String is empty"),
            Self::InvalidIndex => write!(f, "Invalid array index"),
            Self::IndexNotSupported { tag } => write!(f, "Cannot index into a value of type {tag}"),
            Self::InvalidExpression => write!(f, "Invalid expression"),
            Self::EmptyExpression => write!(f, "Empty expression"),
            Self::ParseNumber { text } => write!(f, "\"{text}\" is not a number"),
            Self::ArityMismatch { name, expected } => {
                write!(f, "Expected {expected} argument(s) for \"{name}\"")
            },
            Self::InvalidArgument { name, details } => write!(f, "{details} for \"{name}\""),
            Self::NegativeSqrt => write!(f, "Cannot take the square root of a negative number"),
            Self::InvalidCodePoint { value } => write!(f, "{value} is not a valid code point"),
            Self::InFunction { name } => write!(f, "In function \"{name}\""),
        }
    }
}

impl std::error::Error for RuntimeError {}

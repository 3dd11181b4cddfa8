#[derive(Debug)]
/// Represents all errors detected while slicing lines, blocks and literals,
/// before any value is computed.
pub enum SyntaxError {
    /// A call was written without its opening parenthesis.
    MissingOpeningParenthesis,
    /// A call or parameter list was never closed.
    MissingClosingParenthesis,
    /// A `)` was reduced without a matching `(` on the operator stack.
    UnbalancedParenthesis,
    /// An array literal or index was never closed.
    MissingClosingBracket,
    /// A string literal ran to the end of the expression without a closing
    /// quote.
    UnclosedString,
    /// A numeric literal contained more than one decimal point.
    DuplicateDecimalPoint,
    /// The `[]` suffix of a declaration was left unbalanced.
    InvalidArrayDimension,
    /// A declaration or definition is missing its name.
    MissingName {
        /// What kind of name is missing (`variable`, `function`, ...).
        what: &'static str,
    },
    /// A name does not match the identifier format.
    InvalidName {
        /// The rejected name.
        name: String,
    },
    /// A reserved word was used as an identifier.
    ReservedName {
        /// The reserved word.
        name: String,
    },
    /// A declaration is missing its `=`.
    MissingAssignment,
    /// A declaration or assignment has no right-hand side.
    MissingValue,
    /// An `if` cascade was not terminated by `end if`.
    UnclosedIf,
    /// A `for` block was not terminated by `end for`.
    UnclosedFor,
    /// A function body was not terminated by `end NAME`.
    UnclosedFunction {
        /// The function name.
        name: String,
    },
    /// A parameter was declared with an unknown type.
    InvalidParameterType {
        /// The offending token.
        token: String,
    },
    /// A function header declared an unknown return type.
    InvalidReturnType {
        /// The offending token.
        token: String,
    },
    /// A token appeared where the function header grammar allows none.
    InvalidFunctionSyntax {
        /// The offending token.
        token: String,
    },
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingOpeningParenthesis => write!(f, "Missing opening parenthesis"),
            Self::MissingClosingParenthesis => write!(f, "Missing closing parenthesis"),
            Self::UnbalancedParenthesis => write!(f, "Missing a \"(\""),
            Self::MissingClosingBracket => write!(f, "Missing closing bracket for the array"),
            Self::UnclosedString => write!(f, "Missing closing quote for the string"),
            Self::DuplicateDecimalPoint => write!(f, "Duplicate decimal point in number"),
            Self::InvalidArrayDimension => write!(f, "Invalid array dimension declaration"),
            Self::MissingName { what } => write!(f, "Missing {what} name"),
            Self::InvalidName { name } => write!(f,
                                                 "Invalid name \"{name}\": names must be \
                                                  alphanumeric and start with a letter"),
            Self::ReservedName { name } => write!(f, "\"{name}\" is a reserved word"),
            Self::MissingAssignment => write!(f, "Missing variable assignment \"=\""),
            Self::MissingValue => write!(f, "Missing variable value"),
            Self::UnclosedIf => write!(f, "Condition block not closed with \"end if\""),
            Self::UnclosedFor => write!(f, "Loop block not closed with \"end for\""),
            Self::UnclosedFunction { name } => {
                write!(f, "Missing \"end {name}\" for function \"{name}\"")
            },
            Self::InvalidParameterType { token } => {
                write!(f, "Invalid parameter type \"{token}\"")
            },
            Self::InvalidReturnType { token } => write!(f, "Invalid return type \"{token}\""),
            Self::InvalidFunctionSyntax { token } => {
                write!(f, "Invalid function syntax \"{token}\"")
            },
        }
    }
}

impl std::error::Error for SyntaxError {}

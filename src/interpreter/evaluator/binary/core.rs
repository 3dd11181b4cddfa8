use crate::{
    error::{ErrorStack, EvalResult, RuntimeError},
    interpreter::{
        evaluator::binary::{comparison, power, scalar},
        value::core::Value,
    },
};

/// The binary operators after alias normalization: `and` is `*` on booleans,
/// `or` is `+`, and `is` is `==`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+` / `or`
    Add,
    /// `-`
    Sub,
    /// `*` / `and`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
    /// `%`
    Mod,
    /// `==` / `is`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

impl BinaryOp {
    /// Maps an operator token to its normalized operation, or `None` when the
    /// token is not a binary operator.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" | "or" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" | "and" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "^" => Some(Self::Pow),
            "%" => Some(Self::Mod),
            "==" | "is" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            "<" => Some(Self::Lt),
            ">" => Some(Self::Gt),
            "<=" => Some(Self::Le),
            ">=" => Some(Self::Ge),
            _ => None,
        }
    }
}

/// Whether a token is an operator, unary or binary, in any of its spellings.
#[must_use]
pub fn is_operator(token: &str) -> bool {
    is_unary(token) || BinaryOp::from_token(token).is_some()
}

/// Whether a token is one of the unary negation spellings.
#[must_use]
pub fn is_unary(token: &str) -> bool {
    token == "¬" || token == "not"
}

/// Operator precedence, low to high. Non-operators (including `(`) sit at
/// zero so they never win a reduction comparison.
#[must_use]
pub fn precedence(token: &str) -> u8 {
    match token {
        "or" | "and" => 1,
        "is" | "==" | "!=" | "<" | ">" | "<=" | ">=" | "not" => 2,
        "+" | "-" => 3,
        "*" | "/" => 4,
        "^" | "%" => 5,
        "¬" => 6,
        _ => 0,
    }
}

/// Applies a binary operator token to two values.
///
/// The token is kept alongside the normalized operation so error messages
/// show the operator as the program wrote it (`and`, not `*`).
pub fn apply(token: &str, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    let Some(op) = BinaryOp::from_token(token) else {
        return Err(ErrorStack::new(RuntimeError::InvalidExpression, line));
    };

    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            scalar::apply(op, token, left, right, line)
        },
        BinaryOp::Pow | BinaryOp::Mod => power::apply(op, token, left, right, line),
        BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le
        | BinaryOp::Ge => comparison::apply(op, token, left, right, line),
    }
}

/// The error every dispatch arm falls back to when an operand pair has no
/// entry in the matrix.
pub(crate) fn invalid_operands(token: &str, left: &Value, right: &Value, line: usize)
                               -> ErrorStack {
    ErrorStack::new(RuntimeError::InvalidOperands { op:    token.to_string(),
                                                    left:  left.tag(),
                                                    right: right.tag(), },
                    line)
}

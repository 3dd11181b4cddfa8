use std::{cell::RefCell, rc::Rc};

use crate::interpreter::{
    frame::FrameRef,
    value::tag::Type,
};

/// Represents a runtime value in the interpreter.
///
/// Primitives (`Int`, `Float`, `Str`, `Bool`, `Null`) copy on clone. Arrays
/// and functions clone their `Rc` handle and share identity, which is what
/// makes element mutation in a callee observable by the caller.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A boolean.
    Bool(bool),
    /// The null value.
    Null,
    /// A function frame: a template when declared, a live instance when
    /// produced by `new`.
    Func(FrameRef),
    /// An array. The element tag is carried explicitly so the empty literal
    /// (`val[]` with zero elements) can be retagged on assignment to a typed
    /// slot.
    Array {
        /// The element tag.
        elem:  Type,
        /// The shared element storage.
        items: Rc<RefCell<Vec<Value>>>,
    },
}

impl Value {
    /// Builds an array value with fresh storage.
    #[must_use]
    pub fn array(elem: Type, items: Vec<Self>) -> Self {
        Self::Array { elem,
                      items: Rc::new(RefCell::new(items)) }
    }

    /// The dynamic type tag of this value.
    #[must_use]
    pub fn tag(&self) -> Type {
        match self {
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::Str(_) => Type::Str,
            Self::Bool(_) => Type::Bool,
            Self::Null => Type::Null,
            Self::Func(_) => Type::Func,
            Self::Array { elem, .. } => Type::Array(Box::new(elem.clone())),
        }
    }

    /// Infers the element tag of an array from its elements: homogeneous
    /// elements give their common tag, an empty or mixed array is `val`.
    #[must_use]
    pub fn infer_elem(items: &[Self]) -> Type {
        let Some(first) = items.first() else {
            return Type::Val;
        };

        let tag = first.tag();
        if items[1..].iter().all(|item| item.tag() == tag) {
            tag
        } else {
            Type::Val
        }
    }

    /// The initial value a parameter slot of the given tag holds before an
    /// argument is bound over it.
    #[must_use]
    pub fn default_for(tag: &Type) -> Self {
        match tag {
            Type::Int => Self::Int(0),
            Type::Float => Self::Float(0.0),
            Type::Str => Self::Str(String::new()),
            Type::Bool => Self::Bool(false),
            Type::Array(elem) => Self::array((**elem).clone(), Vec::new()),
            Type::Null | Type::Func | Type::Val => Self::Null,
        }
    }

    /// Whether this value is the empty wildcard array literal (`val[]` with
    /// zero elements), the one array whose tag may be rewritten on
    /// assignment.
    #[must_use]
    pub fn is_empty_wildcard_array(&self) -> bool {
        match self {
            Self::Array { elem, items } => *elem == Type::Val && items.borrow().is_empty(),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl std::fmt::Display for Value {
    /// Stringification as the `print` and `toString` built-ins produce it.
    /// Floats use the shortest decimal form that round-trips.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
            Self::Func(_) => write!(f, "function"),
            Self::Array { items, .. } => {
                write!(f, "[")?;
                for (index, item) in items.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_follow_values() {
        assert_eq!(Value::Int(1).tag(), Type::Int);
        assert_eq!(Value::Str("x".to_string()).tag(), Type::Str);
        assert_eq!(Value::array(Type::Int, vec![]).tag(), Type::parse("int[]").unwrap());
    }

    #[test]
    fn element_tag_inference() {
        assert_eq!(Value::infer_elem(&[]), Type::Val);
        assert_eq!(Value::infer_elem(&[Value::Int(1), Value::Int(2)]), Type::Int);
        assert_eq!(Value::infer_elem(&[Value::Int(1), Value::Bool(true)]), Type::Val);
    }

    #[test]
    fn clones_share_array_storage() {
        let original = Value::array(Type::Int, vec![Value::Int(1)]);
        let alias = original.clone();

        if let Value::Array { items, .. } = &alias {
            items.borrow_mut().push(Value::Int(2));
        }
        if let Value::Array { items, .. } = &original {
            assert_eq!(items.borrow().len(), 2);
        }
    }

    #[test]
    fn display_matches_print_output() {
        assert_eq!(Value::Float(3.0).to_string(), "3");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Null.to_string(), "null");
        let xs = Value::array(Type::Int, vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(xs.to_string(), "[1, 2]");
    }
}

/// The runtime type tag attached to every value.
///
/// Tags form an open, recursive set: the primitive tags, the callable tag,
/// the `val` wildcard, and arrays of any tag (`int[]`, `val[][]`, ...).
/// `Val` only ever appears on declarations and on the empty or heterogeneous
/// array literal; materialized primitive values always carry their concrete
/// tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// 64-bit signed integer.
    Int,
    /// IEEE 754 binary64.
    Float,
    /// UTF-8 string.
    Str,
    /// Boolean.
    Bool,
    /// The null value (and the return tag of functions without one).
    Null,
    /// A callable function frame.
    Func,
    /// The wildcard tag: accepts anything at declaration and binding time.
    Val,
    /// An array of the given element tag.
    Array(Box<Type>),
}

impl Type {
    /// Parses a non-array base tag (`int`, `float`, `string`, `bool`, `null`,
    /// `func`, `val`).
    #[must_use]
    pub fn base(text: &str) -> Option<Self> {
        match text {
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "string" => Some(Self::Str),
            "bool" => Some(Self::Bool),
            "null" => Some(Self::Null),
            "func" => Some(Self::Func),
            "val" => Some(Self::Val),
            _ => None,
        }
    }

    /// Parses a full tag, including any number of `[]` suffixes.
    ///
    /// # Example
    /// ```
    /// use kode::interpreter::value::tag::Type;
    ///
    /// assert_eq!(Type::parse("int"), Some(Type::Int));
    /// assert_eq!(Type::parse("val[][]"),
    ///            Some(Type::Array(Box::new(Type::Array(Box::new(Type::Val))))));
    /// assert_eq!(Type::parse("int["), None);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut base = text;
        let mut dims = 0;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped;
            dims += 1;
        }
        Some(Self::base(base)?.wrap_array(dims))
    }

    /// Wraps this tag in `dims` levels of array.
    #[must_use]
    pub fn wrap_array(self, dims: usize) -> Self {
        let mut tag = self;
        for _ in 0..dims {
            tag = Self::Array(Box::new(tag));
        }
        tag
    }

    /// Whether this tag is an array tag.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// The element tag of an array tag, if this is one.
    #[must_use]
    pub fn elem(&self) -> Option<&Self> {
        match self {
            Self::Array(elem) => Some(elem),
            _ => None,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Str => write!(f, "string"),
            Self::Bool => write!(f, "bool"),
            Self::Null => write!(f, "null"),
            Self::Func => write!(f, "func"),
            Self::Val => write!(f, "val"),
            Self::Array(elem) => write!(f, "{elem}[]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_parse() {
        for text in ["int", "float", "string", "bool", "null", "func", "val", "int[]",
                     "val[][]", "string[][][]"]
        {
            let tag = Type::parse(text).unwrap();
            assert_eq!(tag.to_string(), text);
        }
    }

    #[test]
    fn rejects_unknown_and_unbalanced_tags() {
        assert_eq!(Type::parse("number"), None);
        assert_eq!(Type::parse("int["), None);
        assert_eq!(Type::parse("[]"), None);
    }

    #[test]
    fn array_helpers() {
        let tag = Type::parse("int[][]").unwrap();
        assert!(tag.is_array());
        assert_eq!(tag.elem(), Some(&Type::Array(Box::new(Type::Int))));
        assert!(!Type::Int.is_array());
    }
}

use std::sync::LazyLock;

use regex::Regex;

use crate::interpreter::builtins::BUILTIN_FUNCTIONS;

static NAME_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*$").expect("identifier pattern"));

/// Keywords and literal words that can never be used as identifiers. Built-in
/// function names are reserved as well, via [`is_reserved`].
pub const KEYWORDS: &[&str] = &["null", "true", "false", "if", "else", "val", "string", "int",
                                "float", "bool", "func", "return", "for", "break", "self",
                                "super", "new", "end", "is", "not", "and", "or"];

/// Tests whether a name matches the identifier format: a letter or underscore
/// followed by letters, digits and underscores.
///
/// # Example
/// ```
/// use kode::util::ident::has_valid_name;
///
/// assert!(has_valid_name("counter_2"));
/// assert!(!has_valid_name("2counter"));
/// assert!(!has_valid_name("a-b"));
/// ```
#[must_use]
pub fn has_valid_name(name: &str) -> bool {
    NAME_FORMAT.is_match(name)
}

/// Tests whether a name is a keyword or a built-in function name.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    KEYWORDS.contains(&name) || BUILTIN_FUNCTIONS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_and_builtins_are_reserved() {
        assert!(is_reserved("for"));
        assert!(is_reserved("val"));
        assert!(is_reserved("print"));
        assert!(is_reserved("fromUnicode"));
        assert!(!is_reserved("counter"));
    }

    #[test]
    fn underscore_prefixed_names_are_valid() {
        assert!(has_valid_name("_DEBUG"));
        assert!(has_valid_name("_MAX_RECURSION"));
    }
}

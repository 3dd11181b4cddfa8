/// Normalizes an index into a collection of `len` elements.
///
/// Indexes wrap: the result is `((index mod len) + len) mod len`, so negative
/// indexes count from the back and out-of-range indexes fold into range.
/// Returns `None` for an empty collection, which every caller reports as its
/// own flavor of emptiness error.
///
/// # Example
/// ```
/// use kode::util::num::wrap_index;
///
/// assert_eq!(wrap_index(-1, 3), Some(2));
/// assert_eq!(wrap_index(5, 3), Some(2));
/// assert_eq!(wrap_index(0, 0), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn wrap_index(index: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(index.rem_euclid(len as i64) as usize)
}

/// Tests whether a token reads as a numeric literal.
///
/// Anything `f64` can parse counts, which mirrors the original
/// `strconv.ParseFloat` probe (including exponent forms like `1e5`).
#[must_use]
pub fn is_number(token: &str) -> bool {
    token.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_index_matches_the_double_mod_identity() {
        let n = 7_i64;
        for i in -20..20 {
            let expected = (((i % n) + n) % n) as usize;
            assert_eq!(wrap_index(i, 7), Some(expected));
        }
    }

    #[test]
    fn empty_collections_do_not_wrap() {
        assert_eq!(wrap_index(0, 0), None);
        assert_eq!(wrap_index(-3, 0), None);
    }

    #[test]
    fn numeric_tokens() {
        assert!(is_number("42"));
        assert!(is_number("3.25"));
        assert!(is_number("1e5"));
        assert!(!is_number("x"));
        assert!(!is_number(""));
    }
}

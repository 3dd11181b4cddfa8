use std::collections::VecDeque;

/// The delimiter list used for statements and expressions.
///
/// Order is load-bearing: at every position the first entry that matches
/// wins, so the two-character operators must come before their one-character
/// prefixes (`!=` before `=`, `<=` before `=`, `:=` before `=`), and the
/// escape `\"` is recognized at a backslash before the plain quote can be.
pub const EXPRESSION_DELIMITERS: &[&str] =
    &["!=", "==", ">=", "<=", ":=", "=", "(", ")", "[", "]", ",", ".", " ", "\t", "\r", "\n",
      "#", "\"", "\\\"", "+", "-", "*", "/", "^", "%", "¬"];

/// The delimiter list used when scanning lines for block markers (`else`,
/// `end if`, `end for`, `end NAME`). Only whitespace splits, so operator
/// characters stay glued to their words.
pub const BLOCK_DELIMITERS: &[&str] = &[" ", "\t"];

/// Splits one line into tokens.
///
/// Scanning is delimiter-driven: at each position the first entry of
/// `delimiters` whose bytes match the input wins, the accumulated character
/// run is flushed as a token, and the delimiter itself is emitted when
/// `keep_delimiters` is set.
///
/// A toggle tracks whether the scan is inside a `"…"` region; the toggle
/// flips on each `"` token but never on the escape token `\"`. Whitespace
/// tokens (`" "`, `"\t"`) are suppressed outside string regions and kept
/// inside them, which is what lets string contents be stitched back together
/// from tokens later.
///
/// # Example
/// ```
/// use kode::interpreter::lexer::{tokenize, EXPRESSION_DELIMITERS};
///
/// let tokens = tokenize("val x = a!=b", EXPRESSION_DELIMITERS, true);
/// assert_eq!(tokens, ["val", "x", "=", "a", "!=", "b"]);
/// ```
#[must_use]
pub fn tokenize(line: &str, delimiters: &[&str], keep_delimiters: bool) -> Vec<String> {
    let mut raw = Vec::new();
    let mut word = String::new();
    let mut position = 0;

    'scan: while position < line.len() {
        let rest = &line[position..];
        for delimiter in delimiters {
            if rest.starts_with(delimiter) {
                if !word.is_empty() {
                    raw.push(std::mem::take(&mut word));
                }
                if keep_delimiters {
                    raw.push((*delimiter).to_string());
                }
                position += delimiter.len();
                continue 'scan;
            }
        }

        let ch = rest.chars().next().expect("position is on a char boundary");
        word.push(ch);
        position += ch.len_utf8();
    }

    if !word.is_empty() {
        raw.push(word);
    }

    let mut in_string = false;
    let mut tokens = Vec::with_capacity(raw.len());
    for token in raw {
        if token == "\"" {
            in_string = !in_string;
        }
        if in_string || (token != " " && token != "\t") {
            tokens.push(token);
        }
    }
    tokens
}

/// Reconstitutes the remaining tokens of a queue into expression text.
///
/// Outside string regions tokens are joined with a single space; inside them
/// they are appended verbatim, so string contents survive the round trip. An
/// unquoted `#` ends the reconstitution (intra-line comment).
#[must_use]
pub fn stitch(queue: &mut VecDeque<String>) -> String {
    let mut text = String::new();
    let mut in_string = false;

    while let Some(token) = queue.pop_front() {
        if token == "\"" {
            in_string = !in_string;
        } else if token == "#" && !in_string {
            queue.clear();
            break;
        }

        text.push_str(&token);
        if !in_string {
            text.push(' ');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(line: &str) -> Vec<String> {
        tokenize(line, EXPRESSION_DELIMITERS, true)
    }

    #[test]
    fn ordered_matching_prefers_two_character_operators() {
        assert_eq!(lex("a!=b"), ["a", "!=", "b"]);
        assert_eq!(lex("a==b"), ["a", "==", "b"]);
        assert_eq!(lex("x:=1"), ["x", ":=", "1"]);
        assert_eq!(lex("n<=3"), ["n", "<=", "3"]);
    }

    #[test]
    fn whitespace_is_suppressed_outside_strings() {
        assert_eq!(lex("  val   x  "), ["val", "x"]);
        assert_eq!(lex("\tint n = 1"), ["int", "n", "=", "1"]);
    }

    #[test]
    fn whitespace_is_preserved_inside_strings() {
        assert_eq!(lex("\"a  b\""), ["\"", "a", " ", " ", "b", "\""]);
    }

    #[test]
    fn escaped_quotes_do_not_toggle_the_string_region() {
        // The space after the escape is still inside the string.
        assert_eq!(lex("\"a\\\" b\""), ["\"", "a", "\\\"", " ", "b", "\""]);
    }

    #[test]
    fn unary_minus_and_negation_symbol_are_delimiters() {
        assert_eq!(lex("1-2"), ["1", "-", "2"]);
        assert_eq!(lex("¬true"), ["¬", "true"]);
    }

    #[test]
    fn delimiters_can_be_dropped() {
        assert_eq!(tokenize("end if", BLOCK_DELIMITERS, false), ["end", "if"]);
    }

    #[test]
    fn stitch_round_trips_strings_and_stops_at_comments() {
        let mut queue: VecDeque<String> = lex("\"a b\" + c # trailing").into();
        assert_eq!(stitch(&mut queue), "\"a b\" + c ");
        assert!(queue.is_empty());
    }
}

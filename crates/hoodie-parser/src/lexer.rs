//! Line tokenizer for hoodie source text.
//!
//! Source text is line oriented. Everything from the first `//` on a line is a
//! comment; the rest is split on runs of spaces and tabs. Lines that yield no
//! tokens are dropped. There is no escaping: tokens never contain whitespace.
//!
//! Tokens are returned verbatim. A token wrapped in one pair of double quotes
//! is read as its content through [`unquote`], which the tree builder applies
//! to names and pair tokens after structural tokens (`{`, `}`, `trait`) have
//! been recognized.

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{preceded, repeat, terminated},
    error::ModalResult,
    token::take_till,
};

/// Start of a line comment.
const COMMENT: &str = "//";

/// One non-empty tokenized source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number in the source text.
    pub number: usize,
    /// Tokens in order of appearance.
    pub tokens: Vec<String>,
}

/// Parse a single whitespace-free token.
fn token<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_till(1.., [' ', '\t']).parse_next(input)
}

/// Parse every token of a comment-free line.
fn tokens<'a>(input: &mut &'a str) -> ModalResult<Vec<&'a str>> {
    preceded(space0, repeat(0.., terminated(token, space0))).parse_next(input)
}

/// Drop everything from the first `//` onward.
fn strip_comment(line: &str) -> &str {
    line.find(COMMENT).map_or(line, |at| &line[..at])
}

/// Split one raw line into its tokens.
///
/// Returns an empty vector for blank and comment-only lines.
///
/// # Examples
///
/// ```
/// # use hoodie_parser::lexer::tokenize_line;
/// assert_eq!(tokenize_line("  weapon\tsharp {  // a comment"), ["weapon", "sharp", "{"]);
/// assert!(tokenize_line("// nothing here").is_empty());
/// ```
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut input = strip_comment(line);
    tokens
        .parse_next(&mut input)
        .expect("token splitting accepts any input")
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Tokenize a whole source text, skipping lines without tokens.
pub fn tokenize(source: &str) -> Vec<Line> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let tokens = tokenize_line(raw);
            (!tokens.is_empty()).then(|| Line {
                number: index + 1,
                tokens,
            })
        })
        .collect()
}

/// Strip one pair of enclosing double quotes from `token`.
///
/// # Examples
///
/// ```
/// # use hoodie_parser::lexer::unquote;
/// assert_eq!(unquote("\"sword\""), "sword");
/// assert_eq!(unquote("sword"), "sword");
/// assert_eq!(unquote("\""), "\"");
/// ```
pub fn unquote(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_tokenize_line_splits_on_spaces_and_tabs() {
        assert_eq!(tokenize_line("a b\t\tc"), ["a", "b", "c"]);
        assert_eq!(tokenize_line("\t  key   value  "), ["key", "value"]);
    }

    #[test]
    fn test_tokenize_line_strips_comments() {
        assert_eq!(tokenize_line("key value // trailing"), ["key", "value"]);
        assert_eq!(tokenize_line("key//value"), ["key"]);
        assert!(tokenize_line("//").is_empty());
        assert!(tokenize_line("   ").is_empty());
        assert!(tokenize_line("").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_line_numbers() {
        let source = "item {\n\n  // comment\n  name sword\n}\n";
        let lines = tokenize(source);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].number, 4);
        assert_eq!(lines[1].tokens, ["name", "sword"]);
        assert_eq!(lines[2].number, 5);
    }

    #[test]
    fn test_tokenize_handles_crlf() {
        let lines = tokenize("item {\r\n}\r\n");
        assert_eq!(lines[0].tokens, ["item", "{"]);
        assert_eq!(lines[1].tokens, ["}"]);
    }

    #[test]
    fn test_unquote_requires_both_quotes() {
        assert_eq!(unquote("\"half"), "\"half");
        assert_eq!(unquote("half\""), "half\"");
        assert_eq!(unquote("\"\""), "");
    }

    proptest! {
        #[test]
        fn prop_tokens_have_no_whitespace(line in "[ \ta-z{}\"$]{0,40}") {
            for token in tokenize_line(&line) {
                prop_assert!(!token.is_empty());
                prop_assert!(!token.contains(' ') && !token.contains('\t'));
            }
        }

        #[test]
        fn prop_tokens_rejoin_to_line(words in prop::collection::vec("[a-z{}$]{1,6}", 0..8)) {
            let line = words.join(" \t ");
            prop_assert_eq!(tokenize_line(&line), words);
        }
    }
}

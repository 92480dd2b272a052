//! Brace matching and substructure location
//!
//! Indices are byte offsets into the text handed in. Every delimiter is ASCII,
//! so they always fall on character boundaries.

use super::errors::ParseError;

/// Index of the `}` matching the first `{` in `text`.
///
/// See [`find_matching`].
pub fn find_matching_brace(text: &str) -> Option<usize> {
    find_matching(text, b'{', b'}')
}

/// Index of the `close` delimiter matching the first `open` in `text`.
///
/// Returns `None` when the text has no delimiters, when the first `open`
/// is never closed, or when a `close` shows up before any `open`.
pub fn find_matching(text: &str, open: u8, close: u8) -> Option<usize> {
    let mut depth: i64 = 0;

    for (i, &b) in text.as_bytes().iter().enumerate() {
        if b == open {
            depth += 1;
        } else if b == close {
            if depth <= 0 {
                // stray close before any open
                return None;
            }
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }

    None
}

/// Span of the first top-level `{...}` block: `(index of '{', index of '}')`.
///
/// `Ok(None)` means the text is a flat declaration list.
pub fn locate_first_substructure(text: &str) -> Result<Option<(usize, usize)>, ParseError> {
    let Some(start) = text.find('{') else {
        return Ok(None);
    };

    match find_matching_brace(text) {
        Some(end) => Ok(Some((start, end))),
        None => Err(ParseError::UnbalancedBraces {
            text: text.to_string(),
            start,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("struct abc { union bde { int x,y; } myu; } myabc;", Some(41))]
    #[case(
        "struct abc { union bde { int x,y; struct xx { unsigned int yy; }; } myu; } myabc;",
        Some(73)
    )]
    #[case("{}", Some(1))]
    #[case("{{}}", Some(3))]
    #[case("{{}{}{}}", Some(7))]
    #[case("code without any parenthesis", None)]
    #[case("}{", None)]
    #[case("}{{}}", None)]
    #[case("{xxx{yyy}", None)]
    #[case("{xxx{yy{a}{b}{c}y}", None)]
    #[case("{xxx{yy{{{d}}}y}", None)]
    fn test_find_matching_brace(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(find_matching_brace(text), expected);
    }

    #[test]
    fn test_find_matching_other_delimiters() {
        assert_eq!(find_matching("f(a, (b))", b'(', b')'), Some(8));
    }

    #[rstest]
    #[case("char c; union bde { int x,y; } myu; } myabc;", (18, 29))]
    #[case(
        "struct abc { char c; union bde { int x,y; struct xx { unsigned int yy; }; } myu; } myabc;",
        (11, 81)
    )]
    fn test_locate_first_substructure(#[case] text: &str, #[case] expected: (usize, usize)) {
        assert_eq!(locate_first_substructure(text), Ok(Some(expected)));
    }

    #[test]
    fn test_locate_flat_text() {
        assert_eq!(locate_first_substructure("int a; char b;"), Ok(None));
    }

    #[test]
    fn test_locate_unbalanced_is_syntax_error() {
        let err = locate_first_substructure("int a; struct { int b;").unwrap_err();
        assert!(err.is_syntax_error());
        assert_eq!(
            err,
            ParseError::UnbalancedBraces {
                text: "int a; struct { int b;".to_string(),
                start: 14,
            }
        );
    }

    /// Random brace strings with filler characters
    fn braces() -> impl Strategy<Value = String> {
        prop::collection::vec(prop_oneof![Just('{'), Just('}'), Just('x'), Just(' ')], 0..40)
            .prop_map(|chars| chars.into_iter().collect())
    }

    fn is_balanced(text: &str) -> bool {
        let mut depth = 0i64;
        for c in text.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return false;
            }
        }
        depth == 0
    }

    proptest! {
        #[test]
        fn prop_balanced_text_always_matches(text in braces()) {
            prop_assume!(text.contains('{'));
            if is_balanced(&text) {
                let end = find_matching_brace(&text);
                prop_assert!(end.is_some());
                prop_assert_eq!(text.as_bytes()[end.unwrap()], b'}');
            }
        }

        #[test]
        fn prop_negative_prefix_never_matches(text in braces()) {
            let first_open = text.find('{');
            let first_close = text.find('}');
            if let (Some(close), open) = (first_close, first_open) {
                if open.map_or(true, |o| close < o) {
                    prop_assert_eq!(find_matching_brace(&text), None);
                }
            }
        }

        #[test]
        fn prop_match_closes_first_open(text in braces()) {
            if let Some(end) = find_matching_brace(&text) {
                let start = text.find('{').unwrap();
                prop_assert!(start < end);
                prop_assert!(is_balanced(&text[start..=end]));
            }
        }
    }
}

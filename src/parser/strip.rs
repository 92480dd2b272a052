//! Lexical stripping of declaration text
//!
//! Removes everything that carries no layout information before the text is
//! split into declarations. The passes run in a fixed order:
//!
//! 1. [`remove_comments`]: `/* ... */` (shortest span, multi-line) and `// ...`
//!    up to the end of the line
//! 2. [`remove_keywords`]: storage/type qualifiers and `__attribute__((...))`,
//!    the annotation ending at the parenthesis that closes its `((`
//! 3. [`collapse_whitespace`]: every whitespace run becomes a single space
//!
//! Comments go first so that a qualifier inside a comment never touches the
//! surrounding code, and whitespace goes last so the gaps left by removed
//! keywords are normalized too.

/// Qualifiers that never affect the layout
const IGNORED_KEYWORDS: &[&str] = &[
    "static", "const", "extern", "inline", "virtual", "volatile", "typedef",
];

const ATTRIBUTE: &str = "__attribute__";

/// Run all stripping passes in order, repeating them until the text stops
/// changing.
///
/// One round can expose work for the next, e.g. an attribute removal that
/// takes a `"` with it re-pairs the quotes after it. Every round that changes
/// the text shortens it or normalizes whitespace, so the loop ends.
pub fn strip(text: &str) -> String {
    let mut current = strip_once(text);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    let text = remove_comments(text);
    let text = remove_keywords(&text);
    collapse_whitespace(&text)
}

/// Remove block and line comments.
///
/// Comment markers inside string literals are left alone. A literal must close
/// on its own line; a `"` without a partner there is an ordinary character.
/// An unterminated `/*` is kept verbatim.
pub fn remove_comments(text: &str) -> String {
    Scanner::new(text).remove_comments()
}

/// Remove ignored qualifier tokens and `__attribute__((...))` annotations.
///
/// Where a removal would join its neighbours into `//`, `/*` or `*/`, a single
/// space is left in its place.
pub fn remove_keywords(text: &str) -> String {
    Scanner::new(text).remove_keywords()
}

/// Replace every maximal whitespace run with one space
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

struct Scanner {
    input: Vec<char>,
    position: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn starts_with(&self, at: usize, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(i, c)| self.input.get(at + i) == Some(&c))
    }

    /// Index just past the first `*/` at or after `from`
    fn find_block_end(&self, from: usize) -> Option<usize> {
        (from..self.input.len().saturating_sub(1))
            .find(|&i| self.input[i] == '*' && self.input[i + 1] == '/')
            .map(|i| i + 2)
    }

    fn remove_comments(mut self) -> String {
        let mut out = String::with_capacity(self.input.len());

        while let Some(ch) = self.peek() {
            match (ch, self.peek_next()) {
                ('"', _) => self.copy_string_literal(&mut out),
                ('/', Some('*')) => match self.find_block_end(self.position + 2) {
                    Some(end) => self.position = end,
                    None => {
                        out.push_str("/*");
                        self.position += 2;
                    }
                },
                ('/', Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.position += 1;
                    }
                }
                _ => {
                    out.push(ch);
                    self.position += 1;
                }
            }
        }

        out
    }

    /// Index of the `"` closing the literal opened at `open`, if it closes
    /// before the end of the line
    fn find_literal_end(&self, open: usize) -> Option<usize> {
        let mut i = open + 1;
        while let Some(&c) = self.input.get(i) {
            match c {
                '\\' => i += 2,
                '"' => return Some(i),
                '\n' => return None,
                _ => i += 1,
            }
        }
        None
    }

    /// Copy a `"..."` literal through unchanged, honoring backslash escapes
    fn copy_string_literal(&mut self, out: &mut String) {
        match self.find_literal_end(self.position) {
            Some(end) => {
                out.extend(&self.input[self.position..=end]);
                self.position = end + 1;
            }
            None => {
                out.push('"');
                self.position += 1;
            }
        }
    }

    fn remove_keywords(mut self) -> String {
        let mut out = String::with_capacity(self.input.len());

        while !self.is_at_end() {
            let ch = self.input[self.position];
            if !is_ident_start(ch) {
                out.push(ch);
                self.position += 1;
                continue;
            }

            let start = self.position;
            while self.peek().is_some_and(is_ident_char) {
                self.position += 1;
            }
            let word: String = self.input[start..self.position].iter().collect();

            if IGNORED_KEYWORDS.contains(&word.as_str()) {
                self.separate_comment_markers(&mut out);
                continue;
            }

            if word == ATTRIBUTE && self.starts_with(self.position, "((") {
                if let Some(end) = self.find_attribute_end(self.position) {
                    self.position = end;
                    self.separate_comment_markers(&mut out);
                    continue;
                }
            }

            out.push_str(&word);
        }

        out
    }

    /// Push a space if the text already emitted and the text still ahead
    /// would otherwise meet as a comment marker
    fn separate_comment_markers(&self, out: &mut String) {
        if matches!(
            (out.chars().last(), self.peek()),
            (Some('/'), Some('/' | '*')) | (Some('*'), Some('/'))
        ) {
            out.push(' ');
        }
    }

    /// Index just past the parenthesis matching the `(` at `open`
    fn find_attribute_end(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, &c) in self.input.iter().enumerate().skip(open) {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "/* abcdef1234567890!@#$%^&*()-=_+[]{}|;:\",./<>?~`\n\r\n\r */",
        ""
    )]
    #[case("some /*abcdef*/ code", "some  code")]
    #[case("some /* abcdef */\ncode1", "some \ncode1")]
    #[case("some /* abcdef */\n/*abcc*/code2", "some \ncode2")]
    #[case("// abcdef1234567890!@#$%^&*()-=_+[]{}|;:\",./<>?~`", "")]
    #[case("some// abcdef", "some")]
    #[case("// abcdef \ncode3", "\ncode3")]
    #[case("a /* one */ b /* two */ c", "a  b  c")]
    #[case("/* // inner */ kept", " kept")]
    #[case("int x; /* unterminated", "int x; /* unterminated")]
    fn test_remove_comments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(remove_comments(input), expected);
    }

    #[rstest]
    #[case("\"a\nb\" /* c */", "\"a\nb\" ")]
    #[case("\"open /* c */", "\"open ")]
    #[case("\"\\\"/*x*/\" tail", "\"\\\"/*x*/\" tail")]
    fn test_literal_closes_on_its_line(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(remove_comments(input), expected);
    }

    #[test]
    fn test_comment_markers_in_string_literal() {
        let input = "char *s = \"http://x/*y*/\"; // tail";
        assert_eq!(remove_comments(input), "char *s = \"http://x/*y*/\"; ");
    }

    #[rstest]
    #[case("const static unsigned int", "  unsigned int")]
    #[case("const static void *myptr", "  void *myptr")]
    #[case(
        "struct abc { const int *p; } __attribute__((packed));",
        "struct abc {  int *p; } ;"
    )]
    #[case("typedef struct s { volatile uint32_t f; } t;", " struct s {  uint32_t f; } t;")]
    #[case("int constant; u8 int_static_t;", "int constant; u8 int_static_t;")]
    #[case(
        "int a __attribute__((aligned(4))); int b __attribute__((packed));",
        "int a ; int b ;"
    )]
    fn test_remove_keywords(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(remove_keywords(input), expected);
    }

    #[rstest]
    #[case("/const/ x", "/ / x")]
    #[case("/volatile* x", "/ * x")]
    #[case("*static/", "* /")]
    #[case("/__attribute__((packed))/", "/ /")]
    #[case("a/const b", "a/ b")]
    fn test_removal_never_forms_comment_markers(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(remove_keywords(input), expected);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(
            collapse_whitespace(" testing\tspace   regular\t\nexpression \n\n."),
            " testing space regular expression ."
        );
    }

    #[test]
    fn test_strip_full_declaration() {
        let code = "typedef struct abc {\n    // const void *p;\n    unsigned int b;\n    static const int d; /* note */\n} mystruct;\n";
        assert_eq!(
            strip(code),
            " struct abc { unsigned int b; int d; } mystruct; "
        );
    }

    #[rstest]
    #[case("int a; /const/ comment-ish\nint b;")]
    #[case("\"\n\"/*c*/ int a;")]
    #[case("\"\n\"/*c*/\" x")]
    #[case("__attribute__((a(\"))) /*c*/ \"")]
    #[case("/* x *const/ int a;")]
    fn test_strip_is_idempotent_on_joined_markers(#[case] input: &str) {
        let once = strip(input);
        assert_eq!(strip(&once), once);
    }

    #[test]
    fn test_removed_qualifier_between_slashes_is_not_a_comment() {
        assert_eq!(
            strip("int a; /const/ comment-ish\nint b;"),
            "int a; / / comment-ish int b;"
        );
    }

    fn token() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("static".to_string()),
            Just("const".to_string()),
            Just("volatile".to_string()),
            Just("struct".to_string()),
            Just("union".to_string()),
            Just("{".to_string()),
            Just("}".to_string()),
            Just(";".to_string()),
            Just("/* note */".to_string()),
            Just("__attribute__((packed))".to_string()),
            Just("/".to_string()),
            Just("*".to_string()),
            Just("\"".to_string()),
            "[a-z_][a-z0-9_]{0,8}",
        ]
    }

    fn separator() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(" ".to_string()),
            Just("\t".to_string()),
            Just("\n".to_string()),
            Just("  \n ".to_string()),
            Just(String::new()),
        ]
    }

    proptest! {
        #[test]
        fn prop_strip_is_idempotent(
            parts in prop::collection::vec((token(), separator()), 0..24)
        ) {
            let text: String = parts.iter().map(|(t, s)| format!("{}{}", t, s)).collect();
            let once = strip(&text);
            prop_assert_eq!(strip(&once), once.clone());
        }

        #[test]
        fn prop_strip_is_idempotent_on_raw_text(text in "[ a-z;{}\t\n/*\"]{0,64}") {
            let once = strip(&text);
            prop_assert_eq!(strip(&once), once.clone());
        }

        #[test]
        fn prop_strip_leaves_no_runs_of_whitespace(text in "[ a-z;{}\t\n/*]{0,64}") {
            let stripped = strip(&text);
            prop_assert!(!stripped.contains("  "));
            prop_assert!(!stripped.contains('\t'));
            prop_assert!(!stripped.contains('\n'));
        }
    }
}

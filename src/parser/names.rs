//! Name resolution for nested structures
//!
//! Given the brace span of a substructure, finds the text that names it:
//!
//! ```text
//! char c; union bde { int x,y; } myu; } myabc;
//!       ^           ^          ^     ^
//!       prev        start      end   semicolon (next = semicolon + 1)
//! ```
//!
//! The tag (`union bde`) sits between the previous `;` and the `{`, the
//! variable name (`myu`) between the `}` and the terminating `;`.

use super::errors::ParseError;

/// Bounding indices and resolved name of a substructure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Last `;` before the opening brace, if any sibling declaration precedes it
    pub prev_semicolon: Option<usize>,
    /// Index just after the terminating `;`
    pub next: usize,
    /// Tag and variable name joined by a space; empty when anonymous
    pub name: String,
}

/// Resolve the tag and variable name around the span `start..=end`
pub fn resolve_name(text: &str, start: usize, end: usize) -> Result<ResolvedName, ParseError> {
    let prev_semicolon = text[..start].rfind(';');
    let tag = match prev_semicolon {
        Some(prev) => text[prev + 1..start].trim(),
        None => text[..start].trim(),
    };

    let Some(semicolon) = text[end..].find(';').map(|i| end + i) else {
        let since_prev = prev_semicolon.map_or(0, |prev| prev + 1);
        return Err(ParseError::MissingSemicolon {
            text: text[since_prev..].to_string(),
        });
    };
    let variable = text[end + 1..semicolon].trim();

    let name = [tag, variable]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    Ok(ResolvedName {
        prev_semicolon,
        next: semicolon + 1,
        name,
    })
}

//! Parse error types for structure declarations
//!
//! All parse errors are fatal to the current [`parse`](super::parse) call and
//! carry the offending text fragment so the caller can point at it.

use std::fmt;

/// Errors raised while turning declaration text into a field tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An opening brace has no matching closing brace
    UnbalancedBraces { text: String, start: usize },

    /// A structure/union body is not followed by a terminating `;`
    MissingSemicolon { text: String },

    /// A leaf's type spelling is not in the canonical type table
    UnknownType { type_name: String, var_name: String },
}

impl ParseError {
    /// Whether this is a structural (syntax) error rather than a type lookup failure
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            ParseError::UnbalancedBraces { .. } | ParseError::MissingSemicolon { .. }
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnbalancedBraces { text, start } => {
                write!(
                    f,
                    "Invalid syntax: no match for opening brace in '{}', start: {}",
                    text, start
                )
            }
            ParseError::MissingSemicolon { text } => {
                write!(f, "Semicolon missing at end of structure: '{}'", text)
            }
            ParseError::UnknownType {
                type_name,
                var_name,
            } => {
                write!(
                    f,
                    "Unknown type '{}' for variable '{}'",
                    type_name, var_name
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

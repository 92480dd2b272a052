//! C structure declaration parser
//!
//! This module turns declaration text into a [`StructureNode`] tree:
//! - [`strip`]: comment, qualifier and whitespace removal
//! - [`braces`]: brace matching and first-substructure location
//! - [`names`]: tag/variable name resolution around a substructure
//! - [`declarations`]: the recursive before/inside/after partitioning
//! - [`errors`]: [`ParseError`]
//!
//! # Supported Subset
//!
//! - Leaf members `<type> <name>;` with the spellings known to
//!   [`crate::layout::types`]
//! - Named and anonymous nested `struct`/`union` bodies, any depth
//! - No arrays, pointers, macros or multi-declarators (`int x, y;` stays one leaf)
//!
//! # Parser Implementation
//!
//! Hand-written scanners over the text; no tokenizer or parser generator.

pub mod braces;
pub mod declarations;
pub mod errors;
pub mod names;
pub mod strip;

pub use braces::{find_matching_brace, locate_first_substructure};
pub use declarations::parse;
pub use errors::ParseError;
pub use names::{resolve_name, ResolvedName};
pub use strip::strip;

use crate::layout::StructureNode;
use log::debug;

/// Parse raw declaration text: normalize newlines, strip, then [`parse`].
pub fn parse_declaration(code: &str) -> Result<Vec<StructureNode>, ParseError> {
    let code = code.replace("\r\n", "\n").replace('\r', "\n");
    let code = strip(&code);
    debug!("stripped declaration: '{}'", code);

    let nodes = parse(&code)?;
    debug!("parsed {} top-level node(s)", nodes.len());
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CanonicalType;

    #[test]
    fn test_parse_declaration_with_noise() {
        let code = "typedef struct abc {\r\n    //const void *p;\r\n    unsigned int b;\r\n    static const int d;\r\n    extern int e;\r\n    volatile uint32_t f;\r\n    char y;\r\n    /* a multiline comment\r\n       spanning lines */\r\n    union myunion { int q; long d; } part1;\r\n} mystruct;\r\n";

        let nodes = parse_declaration(code).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name(), "struct abc mystruct");

        let children = nodes[0].children();
        let names: Vec<&str> = children.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["b", "d", "e", "f", "y", "union myunion part1"]);
        assert_eq!(
            children[3].as_field().map(|f| f.canonical_type()),
            Some(CanonicalType::U32)
        );
        assert_eq!(children[5].children().len(), 2);
    }
}

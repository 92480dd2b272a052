//! Canonical type table and leaf canonicalization
//!
//! Every supported C spelling (including multi-word forms such as
//! `unsigned long long int`) resolves to one [`CanonicalType`]. The table is
//! built once on first use and only read afterwards. Lookups fail closed: an
//! unknown spelling is an error, never a default.

use super::{CanonicalType, FieldDeclaration};
use crate::parser::ParseError;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

const SPELLINGS: &[(&str, CanonicalType)] = &[
    ("s8", CanonicalType::S8),
    ("char", CanonicalType::S8),
    ("signed char", CanonicalType::S8),
    ("int8_t", CanonicalType::S8),
    ("u8", CanonicalType::U8),
    ("unsigned char", CanonicalType::U8),
    ("uint8_t", CanonicalType::U8),
    ("s16", CanonicalType::S16),
    ("short", CanonicalType::S16),
    ("short int", CanonicalType::S16),
    ("signed short", CanonicalType::S16),
    ("signed short int", CanonicalType::S16),
    ("int16_t", CanonicalType::S16),
    ("u16", CanonicalType::U16),
    ("unsigned short", CanonicalType::U16),
    ("unsigned short int", CanonicalType::U16),
    ("uint16_t", CanonicalType::U16),
    ("s32", CanonicalType::S32),
    ("int", CanonicalType::S32),
    ("signed", CanonicalType::S32),
    ("signed int", CanonicalType::S32),
    ("int32_t", CanonicalType::S32),
    ("u32", CanonicalType::U32),
    ("unsigned", CanonicalType::U32),
    ("unsigned int", CanonicalType::U32),
    ("uint32_t", CanonicalType::U32),
    ("s64", CanonicalType::S64),
    ("long", CanonicalType::S64),
    ("long int", CanonicalType::S64),
    ("signed long", CanonicalType::S64),
    ("signed long int", CanonicalType::S64),
    ("long long", CanonicalType::S64),
    ("long long int", CanonicalType::S64),
    ("signed long long", CanonicalType::S64),
    ("signed long long int", CanonicalType::S64),
    ("int64_t", CanonicalType::S64),
    ("u64", CanonicalType::U64),
    ("unsigned long", CanonicalType::U64),
    ("unsigned long int", CanonicalType::U64),
    ("unsigned long long", CanonicalType::U64),
    ("unsigned long long int", CanonicalType::U64),
    ("uint64_t", CanonicalType::U64),
];

static TYPE_TABLE: Lazy<FxHashMap<&'static str, CanonicalType>> =
    Lazy::new(|| SPELLINGS.iter().copied().collect());

/// Look up a raw type spelling
pub fn lookup(spelling: &str) -> Option<CanonicalType> {
    TYPE_TABLE.get(spelling).copied()
}

/// Turn a `"<type> <name>"` clause into a leaf field.
///
/// The clause is split at its last space, so multi-word types work but a
/// pointer or array suffix glued to the name does not.
pub fn canonicalize(declaration: &str) -> Result<(String, Vec<FieldDeclaration>), ParseError> {
    let declaration = declaration.trim();
    let (type_name, var_name) = match declaration.rfind(' ') {
        Some(idx) => (&declaration[..idx], &declaration[idx + 1..]),
        None => ("", declaration),
    };

    let canonical_type = lookup(type_name).ok_or_else(|| ParseError::UnknownType {
        type_name: type_name.to_string(),
        var_name: var_name.to_string(),
    })?;

    let field = FieldDeclaration::new(var_name, canonical_type);
    Ok((var_name.to_string(), vec![field]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("char c", "c", CanonicalType::S8)]
    #[case("unsigned char uc", "uc", CanonicalType::U8)]
    #[case("short int si", "si", CanonicalType::S16)]
    #[case("unsigned short us", "us", CanonicalType::U16)]
    #[case("int b", "b", CanonicalType::S32)]
    #[case("uint32_t f", "f", CanonicalType::U32)]
    #[case("signed long int sl", "sl", CanonicalType::S64)]
    #[case("unsigned long long int ull", "ull", CanonicalType::U64)]
    #[case("  u64 full ", "full", CanonicalType::U64)]
    fn test_canonicalize(
        #[case] decl: &str,
        #[case] name: &str,
        #[case] expected: CanonicalType,
    ) {
        let (var_name, fields) = canonicalize(decl).unwrap();
        assert_eq!(var_name, name);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].canonical_type(), expected);
        assert_eq!(fields[0].bit_width(), expected.bit_width());
        assert_eq!(fields[0].value(), 0);
    }

    #[test]
    fn test_unknown_type_names_both_parts() {
        let err = canonicalize("foo_t x").unwrap_err();
        match &err {
            ParseError::UnknownType {
                type_name,
                var_name,
            } => {
                assert_eq!(type_name, "foo_t");
                assert_eq!(var_name, "x");
            }
            other => panic!("Expected UnknownType, got {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("foo_t"));
        assert!(message.contains("'x'"));
    }

    #[test]
    fn test_missing_type_is_rejected() {
        assert!(matches!(
            canonicalize("lonely"),
            Err(ParseError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_table_covers_every_tag() {
        for tag in CanonicalType::ALL {
            assert_eq!(lookup(tag.tag()), Some(tag));
        }
    }
}

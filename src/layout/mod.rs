//! Field layout model
//!
//! This module defines the tree produced by the declaration parser:
//! - [`CanonicalType`]: the eight primitive tags every C spelling maps to
//! - [`FieldDeclaration`]: a leaf member with a concrete primitive type
//! - [`StructureNode`]: either a leaf or a named composite (struct/union)
//! - [`types`]: the canonical type table and the leaf canonicalizer
//!
//! # Type Sizes
//!
//! Widths are fixed and platform-independent:
//! - `s8`/`u8`: 1 byte
//! - `s16`/`u16`: 2 bytes
//! - `s32`/`u32`: 4 bytes
//! - `s64`/`u64`: 8 bytes
//!
//! Composites have no size of their own; a tree's size is the sum of its
//! leaves (no padding or alignment).

pub mod types;

use std::fmt;

pub use types::canonicalize;

/// Primitive tags: signed/unsigned × 8/16/32/64 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalType {
    S8,
    U8,
    S16,
    U16,
    S32,
    U32,
    S64,
    U64,
}

impl CanonicalType {
    pub const ALL: [CanonicalType; 8] = [
        CanonicalType::S8,
        CanonicalType::U8,
        CanonicalType::S16,
        CanonicalType::U16,
        CanonicalType::S32,
        CanonicalType::U32,
        CanonicalType::S64,
        CanonicalType::U64,
    ];

    pub fn bit_width(self) -> u32 {
        match self {
            CanonicalType::S8 | CanonicalType::U8 => 8,
            CanonicalType::S16 | CanonicalType::U16 => 16,
            CanonicalType::S32 | CanonicalType::U32 => 32,
            CanonicalType::S64 | CanonicalType::U64 => 64,
        }
    }

    pub fn byte_width(self) -> usize {
        (self.bit_width() / 8) as usize
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            CanonicalType::S8 | CanonicalType::S16 | CanonicalType::S32 | CanonicalType::S64
        )
    }

    pub fn tag(self) -> &'static str {
        match self {
            CanonicalType::S8 => "s8",
            CanonicalType::U8 => "u8",
            CanonicalType::S16 => "s16",
            CanonicalType::U16 => "u16",
            CanonicalType::S32 => "s32",
            CanonicalType::U32 => "u32",
            CanonicalType::S64 => "s64",
            CanonicalType::U64 => "u64",
        }
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A leaf structure member
///
/// Everything except `value` is fixed at construction; `value` holds the raw
/// bits once a byte stream has been bound to the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    name: String,
    canonical_type: CanonicalType,
    bit_width: u32,
    value: u64,
}

impl FieldDeclaration {
    pub fn new(name: impl Into<String>, canonical_type: CanonicalType) -> Self {
        FieldDeclaration {
            name: name.into(),
            canonical_type,
            bit_width: canonical_type.bit_width(),
            value: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn canonical_type(&self) -> CanonicalType {
        self.canonical_type
    }

    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    pub fn byte_width(&self) -> usize {
        self.canonical_type.byte_width()
    }

    /// Raw bits, zero-extended
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn set_value(&mut self, value: u64) {
        self.value = value & width_mask(self.bit_width);
    }

    /// The raw bits sign-extended according to the field's tag
    pub fn signed_value(&self) -> i64 {
        if !self.canonical_type.is_signed() || self.bit_width == 64 {
            return self.value as i64;
        }
        let shift = 64 - self.bit_width;
        ((self.value << shift) as i64) >> shift
    }
}

impl fmt::Display for FieldDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<'{}' - {}: {}>",
            self.name, self.canonical_type, self.bit_width
        )
    }
}

fn width_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// One node of a parsed declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureNode {
    Field(FieldDeclaration),
    /// Nested struct or union; `name` is empty when anonymous
    Composite {
        name: String,
        children: Vec<StructureNode>,
    },
}

impl StructureNode {
    pub fn composite(name: impl Into<String>, children: Vec<StructureNode>) -> Self {
        StructureNode::Composite {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StructureNode::Field(field) => field.name(),
            StructureNode::Composite { name, .. } => name,
        }
    }

    pub fn as_field(&self) -> Option<&FieldDeclaration> {
        match self {
            StructureNode::Field(field) => Some(field),
            StructureNode::Composite { .. } => None,
        }
    }

    pub fn children(&self) -> &[StructureNode] {
        match self {
            StructureNode::Field(_) => &[],
            StructureNode::Composite { children, .. } => children,
        }
    }

    /// Number of bytes the leaves under this node consume
    pub fn byte_size(&self) -> usize {
        match self {
            StructureNode::Field(field) => field.byte_width(),
            StructureNode::Composite { children, .. } => layout_size(children),
        }
    }
}

/// Total byte size of a sequence of nodes
pub fn layout_size(nodes: &[StructureNode]) -> usize {
    nodes.iter().map(StructureNode::byte_size).sum()
}

/// Kind of a flattened display row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Field(FieldDeclaration),
    Group,
}

/// A node flattened for display, with its byte placement in the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRow {
    pub depth: usize,
    pub name: String,
    pub kind: RowKind,
    pub offset: usize,
    pub size: usize,
}

/// Flatten a tree into display rows in byte-consumption order
pub fn flatten(nodes: &[StructureNode]) -> Vec<LayoutRow> {
    let mut rows = Vec::new();
    let mut offset = 0;
    flatten_into(nodes, 0, &mut offset, &mut rows);
    rows
}

fn flatten_into(
    nodes: &[StructureNode],
    depth: usize,
    offset: &mut usize,
    rows: &mut Vec<LayoutRow>,
) {
    for node in nodes {
        match node {
            StructureNode::Field(field) => {
                rows.push(LayoutRow {
                    depth,
                    name: field.name().to_string(),
                    kind: RowKind::Field(field.clone()),
                    offset: *offset,
                    size: field.byte_width(),
                });
                *offset += field.byte_width();
            }
            StructureNode::Composite { name, children } => {
                rows.push(LayoutRow {
                    depth,
                    name: name.clone(),
                    kind: RowKind::Group,
                    offset: *offset,
                    size: layout_size(children),
                });
                flatten_into(children, depth + 1, offset, rows);
            }
        }
    }
}

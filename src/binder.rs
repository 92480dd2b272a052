//! Binding a byte stream to a parsed layout
//!
//! Leaves are visited depth-first in declaration order. Each one takes
//! `bit_width / 8` bytes from the head of the stream; composites are entered
//! before moving on to their next sibling. Consumed bytes are read as a
//! little-endian integer, which is the order the big-endian hex path produces:
//! a single word `00fa` binds to a `u16` as `0x00fa`.

use crate::layout::StructureNode;
use log::debug;
use std::fmt;

/// Errors raised while binding values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The stream ran out before every field had a value
    StreamExhausted {
        field: String,
        needed: usize,
        available: usize,
        offset: usize,
    },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::StreamExhausted {
                field,
                needed,
                available,
                offset,
            } => {
                write!(
                    f,
                    "Byte stream exhausted at offset {}: field '{}' needs {} byte{}, {} left",
                    offset,
                    field,
                    needed,
                    if *needed == 1 { "" } else { "s" },
                    available
                )
            }
        }
    }
}

impl std::error::Error for BindError {}

/// Fill every leaf's value from `bytes`; returns the number of bytes consumed.
///
/// On [`BindError::StreamExhausted`] the fields before the failing one keep
/// their bound values.
pub fn bind_values(nodes: &mut [StructureNode], bytes: &[u8]) -> Result<usize, BindError> {
    let mut cursor = ByteCursor::new(bytes);
    bind_nodes(nodes, &mut cursor)?;
    debug!(
        "bound {} of {} byte(s)",
        cursor.position,
        bytes.len()
    );
    Ok(cursor.position)
}

fn bind_nodes(nodes: &mut [StructureNode], cursor: &mut ByteCursor) -> Result<(), BindError> {
    for node in nodes {
        match node {
            StructureNode::Field(field) => {
                let needed = field.byte_width();
                let chunk = cursor
                    .take(needed)
                    .ok_or_else(|| BindError::StreamExhausted {
                        field: field.name().to_string(),
                        needed,
                        available: cursor.remaining(),
                        offset: cursor.position,
                    })?;
                field.set_value(read_le(chunk));
            }
            StructureNode::Composite { children, .. } => bind_nodes(children, cursor)?,
        }
    }
    Ok(())
}

fn read_le(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

struct ByteCursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.remaining() < n {
            return None;
        }
        let chunk = &self.bytes[self.position..self.position + n];
        self.position += n;
        Some(chunk)
    }
}

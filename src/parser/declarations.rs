//! Recursive declaration parsing
//!
//! A declaration body is partitioned around its first nested structure into
//! three spans, each parsed recursively:
//!
//! ```text
//! char c; struct XYZ { int b; char y; } myXYZ; int l;
//! |-----| before     |-- inside ---|         |-after-|
//! ```
//!
//! All spans are byte ranges into the one stripped buffer; no substrings are
//! allocated while recursing. Every sub-span is strictly shorter than the span
//! it came from, so parsing always terminates. `after` is consumed in a loop
//! rather than by recursion, which keeps long runs of sibling structures off
//! the stack.

use super::braces::locate_first_substructure;
use super::errors::ParseError;
use super::names::resolve_name;
use crate::layout::{canonicalize, StructureNode};
use log::trace;
use std::ops::Range;

/// The three sub-spans around a span's first substructure
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Partition {
    pub before: Range<usize>,
    pub inside: Range<usize>,
    pub after: Range<usize>,
    pub name: String,
}

/// Parse a declaration body into an ordered list of nodes
pub fn parse(text: &str) -> Result<Vec<StructureNode>, ParseError> {
    let mut nodes = Vec::new();
    parse_span(text, 0..text.len(), &mut nodes)?;
    Ok(nodes)
}

/// Parse `span` into `nodes`.
///
/// Only `before` and `inside` recurse; sibling structures after the first are
/// handled by the loop, so stack depth follows nesting depth alone.
fn parse_span(
    source: &str,
    span: Range<usize>,
    nodes: &mut Vec<StructureNode>,
) -> Result<(), ParseError> {
    let mut span = trim_span(source, span);

    while !span.is_empty() {
        let Some(partition) = partition(source, span.clone())? else {
            return parse_fields(&source[span], nodes);
        };

        debug_assert!(partition.before.len() < span.len());
        debug_assert!(partition.inside.len() < span.len());
        debug_assert!(partition.after.len() < span.len());

        parse_span(source, partition.before, nodes)?;

        let mut children = Vec::new();
        parse_span(source, partition.inside, &mut children)?;
        nodes.push(StructureNode::composite(partition.name, children));

        span = trim_span(source, partition.after);
    }

    Ok(())
}

/// Split `span` around its first substructure; `None` for a flat field list
pub(crate) fn partition(source: &str, span: Range<usize>) -> Result<Option<Partition>, ParseError> {
    let text = &source[span.clone()];
    let Some((start, end)) = locate_first_substructure(text)? else {
        return Ok(None);
    };
    let resolved = resolve_name(text, start, end)?;

    let base = span.start;
    let before_end = resolved.prev_semicolon.map_or(base, |prev| base + prev + 1);
    let partition = Partition {
        before: base..before_end,
        inside: base + start + 1..base + end,
        after: base + resolved.next..span.end,
        name: resolved.name,
    };

    trace!(
        "partition {:?}: before {:?}, '{}' {:?}, after {:?}",
        span,
        partition.before,
        partition.name,
        partition.inside,
        partition.after
    );

    Ok(Some(partition))
}

/// Each `;`-terminated clause becomes exactly one leaf; text after the last
/// `;` is ignored.
fn parse_fields(text: &str, nodes: &mut Vec<StructureNode>) -> Result<(), ParseError> {
    let mut clauses: Vec<&str> = text.split(';').collect();
    clauses.pop();

    for clause in clauses.into_iter().filter(|c| !c.trim().is_empty()) {
        let (_, fields) = canonicalize(clause)?;
        nodes.extend(fields.into_iter().map(StructureNode::Field));
    }

    Ok(())
}

fn trim_span(source: &str, span: Range<usize>) -> Range<usize> {
    let text = &source[span.clone()];
    let leading = text.len() - text.trim_start().len();
    let trailing = text.len() - text.trim_end().len();
    if leading == text.len() {
        return span.start..span.start;
    }
    span.start + leading..span.end - trailing
}

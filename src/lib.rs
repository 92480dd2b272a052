//! # Introduction
//!
//! structview reads a C `struct`/`union` declaration, turns it into a tree of
//! fixed-width integer fields, and binds a stream of hex-encoded bytes to it
//! so each field's value can be inspected. Results are shown either as a
//! plain text tree or in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Declaration → Strip → Parser → Structure tree ─┐
//!                                                ├→ Binder → View / TUI
//! Hex words → Hex converter → Byte stream ───────┘
//! ```
//!
//! 1. [`parser`]: strips comments, qualifiers and attributes, then splits the
//!    text recursively at brace boundaries into a [`layout::StructureNode`]
//!    tree.
//! 2. [`layout`]: the node types and the canonical integer type table.
//! 3. [`hex`]: converts hex words to bytes in big- or little-endian order.
//! 4. [`binder`]: walks the tree depth-first and assigns consumed bytes to
//!    each field.
//! 5. [`view`]: the pipeline in one call plus a plain text renderer.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported declarations
//!
//! Fixed-width integers under their usual C spellings (`char` through
//! `unsigned long long int`, the `<stdint.h>` names and `s8`..`u64`), nested
//! and anonymous `struct`/`union` members. Each `;`-terminated clause is one
//! field, so `int x,y;` is a single field named `x,y`, and union members are
//! laid out one after another like struct members.

pub mod binder;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod hex;
pub mod layout;
pub mod parser;
pub mod ui;
pub mod view;

pub use error::Error;

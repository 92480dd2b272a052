//! The whole pipeline in one place: declaration text and hex words in, a
//! bound layout out.

use crate::binder::{bind_values, BindError};
use crate::config::ViewerConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Error;
use crate::hex::ByteStream;
use crate::layout::{flatten, layout_size, LayoutRow, RowKind, StructureNode};
use crate::parser::{parse_declaration, strip};
use std::fmt::Write as _;

/// A parsed declaration with a byte stream bound to it
#[derive(Debug)]
pub struct BoundLayout {
    /// Declaration text after stripping
    pub source: String,
    pub nodes: Vec<StructureNode>,
    pub stream: ByteStream,
    /// Bytes consumed by the binder
    pub consumed: usize,
    /// Set when the stream was too short; the fields before it are still bound
    pub bind_error: Option<BindError>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BoundLayout {
    /// Parse, convert and bind.
    ///
    /// Parse and hex errors are returned; a short stream is not, it is kept in
    /// [`BoundLayout::bind_error`] so the partial result can still be shown.
    pub fn build<S: AsRef<str>>(
        declaration: &str,
        hex_words: &[S],
        config: &ViewerConfig,
    ) -> Result<Self, Error> {
        let mut nodes = parse_declaration(declaration)?;
        let source = declaration.replace("\r\n", "\n").replace('\r', "\n");

        let mut diagnostics = Diagnostics::new(config.diagnostics);
        let stream = if hex_words.is_empty() {
            ByteStream::empty()
        } else {
            ByteStream::from_words(hex_words, config.endian, &mut diagnostics)?
        };

        let (consumed, bind_error) = match bind_values(&mut nodes, stream.bytes()) {
            Ok(consumed) => (consumed, None),
            Err(err) => {
                let BindError::StreamExhausted { offset, .. } = &err;
                (*offset, Some(err))
            }
        };

        Ok(BoundLayout {
            source: strip(&source).trim().to_string(),
            nodes,
            stream,
            consumed,
            bind_error,
            diagnostics: diagnostics.entries().to_vec(),
        })
    }

    pub fn rows(&self) -> Vec<LayoutRow> {
        flatten(&self.nodes)
    }

    /// Bytes the layout needs
    pub fn size(&self) -> usize {
        layout_size(&self.nodes)
    }

    /// Same as [`BoundLayout::build`], but a short stream is an error too
    pub fn build_strict<S: AsRef<str>>(
        declaration: &str,
        hex_words: &[S],
        config: &ViewerConfig,
    ) -> Result<Self, Error> {
        let layout = Self::build(declaration, hex_words, config)?;
        match layout.bind_error {
            Some(err) => Err(Error::Bind(err)),
            None => Ok(layout),
        }
    }
}

/// Render rows as an indented text tree, one line per row
pub fn render_plain(rows: &[LayoutRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let indent = "    ".repeat(row.depth);
        match &row.kind {
            RowKind::Group => {
                let name = if row.name.is_empty() {
                    "<anonymous>"
                } else {
                    row.name.as_str()
                };
                let _ = writeln!(out, "{}{} ({} bytes @ {})", indent, name, row.size, row.offset);
            }
            RowKind::Field(field) => {
                let digits = field.byte_width() * 2;
                let _ = writeln!(
                    out,
                    "{}{}: {} = 0x{:0digits$x} {} 0b{:0bits$b}",
                    indent,
                    field,
                    row.offset,
                    field.value(),
                    field.signed_value(),
                    field.value(),
                    digits = digits,
                    bits = field.bit_width() as usize,
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticConfig;

    const ABC: &str = "struct ABC { struct XYZ { int b; char y; } myXYZ; int l; } myABC;";

    fn quiet() -> ViewerConfig {
        ViewerConfig {
            diagnostics: DiagnosticConfig { echo: false },
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn test_build_binds_values() {
        let layout = BoundLayout::build(ABC, &["00000001", "0000007f", "00000002"], &quiet()).unwrap();
        assert_eq!(layout.size(), 9);
        assert_eq!(layout.consumed, 9);
        assert!(layout.bind_error.is_none());

        let values: Vec<(String, i64)> = layout
            .rows()
            .into_iter()
            .filter_map(|r| match r.kind {
                RowKind::Field(f) => Some((f.name().to_string(), f.signed_value())),
                RowKind::Group => None,
            })
            .collect();
        assert_eq!(
            values,
            vec![
                ("b".to_string(), 1),
                ("y".to_string(), 127),
                ("l".to_string(), 0x0200_0000),
            ]
        );
    }

    #[test]
    fn test_short_stream_is_kept_partial() {
        let layout = BoundLayout::build(ABC, &["00000001"], &quiet()).unwrap();
        assert!(matches!(
            layout.bind_error,
            Some(BindError::StreamExhausted { ref field, .. }) if field == "y"
        ));
        assert_eq!(layout.consumed, 4);

        let err = BoundLayout::build_strict(ABC, &["00000001"], &quiet()).unwrap_err();
        assert!(matches!(err, Error::Bind(_)));
    }

    #[test]
    fn test_errors_are_distinct() {
        let err = BoundLayout::build("struct { int a; ", &["00"], &quiet()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let err = BoundLayout::build("int a;", &["00", "0000"], &quiet()).unwrap_err();
        assert!(matches!(err, Error::Hex(_)));
    }

    #[test]
    fn test_bad_digits_are_collected() {
        let layout = BoundLayout::build("u16 a;", &["zz01"], &quiet()).unwrap();
        assert_eq!(layout.diagnostics.len(), 1);
        assert_eq!(layout.nodes[0].as_field().unwrap().value(), 0x0001);
    }

    #[test]
    fn test_source_is_stripped() {
        let layout = BoundLayout::build("/* hdr */\r\nconst u8 a; // x\r\n", &["01"], &quiet()).unwrap();
        assert_eq!(layout.source, "u8 a;");
    }

    #[test]
    fn test_render_plain() {
        let layout = BoundLayout::build("struct s { u8 a; s16 b; } v;", &["ff", "01", "80"], &quiet()).unwrap();
        assert_eq!(
            render_plain(&layout.rows()),
            "struct s v (3 bytes @ 0)\n    <'a' - u8: 8>: 0 = 0xff 255 0b11111111\n    <'b' - s16: 16>: 1 = 0x8001 -32767 0b1000000000000001\n"
        );
    }
}

//! Shared helpers for value formatting and pane chrome

use crate::layout::FieldDeclaration;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};
use std::fmt;

/// How field values are printed in the layout pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Radix {
    #[default]
    Hex,
    Dec,
    Bin,
}

impl Radix {
    pub fn next(self) -> Self {
        match self {
            Radix::Hex => Radix::Dec,
            Radix::Dec => Radix::Bin,
            Radix::Bin => Radix::Hex,
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Radix::Hex => "HEX",
            Radix::Dec => "DEC",
            Radix::Bin => "BIN",
        };
        write!(f, "{}", label)
    }
}

/// Format a bound value, zero-padded to the field width for hex and binary.
/// Decimal honours signedness.
pub(crate) fn format_value(field: &FieldDeclaration, radix: Radix) -> String {
    match radix {
        Radix::Hex => format!("0x{:0width$x}", field.value(), width = field.byte_width() * 2),
        Radix::Dec if field.canonical_type().is_signed() => field.signed_value().to_string(),
        Radix::Dec => field.value().to_string(),
        Radix::Bin => format!(
            "0b{:0width$b}",
            field.value(),
            width = field.bit_width() as usize
        ),
    }
}

pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Clamp `offset` so the window of `visible` rows stays inside `total`
pub(crate) fn clamp_scroll(offset: usize, total: usize, visible: usize) -> usize {
    if total > visible {
        offset.min(total - visible)
    } else {
        0
    }
}

/// Scroll just enough to bring `index` into a window of `visible` rows
pub(crate) fn scroll_to(offset: usize, index: usize, visible: usize) -> usize {
    if index < offset {
        index
    } else if index >= offset + visible {
        index + 1 - visible
    } else {
        offset
    }
}

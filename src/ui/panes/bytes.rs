//! Byte pane: hex dump of the converted stream
//!
//! Bytes are grouped by the configured word width. The bytes backing the
//! selected layout row are highlighted and bytes the layout never reached are
//! dimmed.

use super::utils::{border_style, clamp_scroll};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use std::ops::Range;

/// Width of the `0000: ` offset column
const OFFSET_COLUMN: usize = 6;

/// Data needed to render the byte pane
pub struct BytesRenderData<'a> {
    pub bytes: &'a [u8],
    /// Bytes per display group
    pub group: usize,
    /// Bytes backing the selected row
    pub selection: Option<Range<usize>>,
    /// Bytes the binder consumed
    pub consumed: usize,
}

/// Whole groups that fit on one line of `width` columns, at least one
pub(crate) fn bytes_per_line(width: usize, group: usize) -> usize {
    let group = group.max(1);
    // "xx " per byte plus one separating space per group
    let group_width = group * 3 + 1;
    let groups = width.saturating_sub(OFFSET_COLUMN) / group_width;
    groups.max(1) * group
}

fn dump_line(start: usize, chunk: &[u8], data: &BytesRenderData) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{:04x}: ", start),
        Style::default().fg(DEFAULT_THEME.comment),
    )];

    for (i, byte) in chunk.iter().enumerate() {
        let index = start + i;
        let selected = data
            .selection
            .as_ref()
            .is_some_and(|range| range.contains(&index));
        let style = if selected {
            Style::default()
                .bg(DEFAULT_THEME.selection_bg)
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD)
        } else if index < data.consumed {
            Style::default().fg(DEFAULT_THEME.fg)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };
        spans.push(Span::styled(format!("{:02x}", byte), style));

        let separator = if (i + 1) % data.group == 0 { "  " } else { " " };
        spans.push(Span::raw(separator));
    }

    Line::from(spans)
}

/// Render the byte pane. `scroll` is in lines and is clamped in place; when
/// the selection moves out of view the pane follows it.
pub fn render_bytes_pane(
    frame: &mut Frame,
    area: Rect,
    data: BytesRenderData,
    is_focused: bool,
    scroll: &mut usize,
) {
    let title = format!(" Bytes ({}) ", data.bytes.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if data.bytes.is_empty() {
        let item = ListItem::new("(no data)").style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(List::new(vec![item]).block(block), area);
        return;
    }

    let content_width = area.width.saturating_sub(2) as usize; // borders
    let per_line = bytes_per_line(content_width, data.group);
    let total_lines = data.bytes.len().div_ceil(per_line);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if !is_focused {
        if let Some(range) = &data.selection {
            let line = range.start / per_line;
            if line < *scroll || line >= *scroll + visible_height {
                *scroll = line;
            }
        }
    }
    *scroll = clamp_scroll(*scroll, total_lines, visible_height);

    let items: Vec<ListItem> = data
        .bytes
        .chunks(per_line)
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(line, chunk)| ListItem::new(dump_line(line * per_line, chunk, &data)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

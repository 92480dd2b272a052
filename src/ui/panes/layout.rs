//! Layout pane: one row per group or field, with offsets and bound values

use super::utils::{border_style, format_value, scroll_to, Radix};
use crate::layout::{LayoutRow, RowKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Data needed to render the layout pane
pub struct LayoutRenderData<'a> {
    pub rows: &'a [LayoutRow],
    pub selected: usize,
    pub radix: Radix,
    /// Bytes the binder consumed; fields past this have no value
    pub consumed: usize,
}

fn row_line(row: &LayoutRow, radix: Radix, consumed: usize) -> Line<'_> {
    let mut spans = vec![
        Span::styled(
            format!("{:04x} ", row.offset),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::raw("  ".repeat(row.depth)),
    ];

    match &row.kind {
        RowKind::Group => {
            let name = if row.name.is_empty() {
                "<anonymous>"
            } else {
                row.name.as_str()
            };
            spans.push(Span::styled(
                name,
                Style::default()
                    .fg(DEFAULT_THEME.keyword)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" ({} bytes)", row.size),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
        }
        RowKind::Field(field) => {
            spans.push(Span::styled(
                field.name(),
                Style::default().fg(DEFAULT_THEME.fg),
            ));
            spans.push(Span::styled(
                format!(": {}", field.canonical_type()),
                Style::default().fg(DEFAULT_THEME.type_name),
            ));
            spans.push(Span::raw(" = "));
            if row.offset + row.size <= consumed {
                spans.push(Span::styled(
                    format_value(field, radix),
                    Style::default().fg(DEFAULT_THEME.number),
                ));
            } else {
                spans.push(Span::styled(
                    "(no data)",
                    Style::default().fg(DEFAULT_THEME.error),
                ));
            }
        }
    }

    Line::from(spans)
}

/// Render the layout pane, scrolling to keep the selected row visible
pub fn render_layout_pane(
    frame: &mut Frame,
    area: Rect,
    data: LayoutRenderData,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Layout [{}] ", data.radix))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if data.rows.is_empty() {
        let item = ListItem::new("(no fields)").style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(List::new(vec![item]).block(block), area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    *scroll = scroll_to(*scroll, data.selected, visible_height);

    let items: Vec<ListItem> = data
        .rows
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, row)| {
            let item = ListItem::new(row_line(row, data.radix, data.consumed));
            if idx == data.selected {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

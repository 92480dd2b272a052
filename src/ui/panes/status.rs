//! Status bar rendering with keybindings and binding state

use super::utils::Radix;
use crate::hex::Endian;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    /// Bytes the layout needs
    pub needed: usize,
    /// Bytes supplied
    pub available: usize,
    pub endian: Endian,
    /// Hex characters per word, 0 when no words were given
    pub word_size: usize,
    pub diagnostics: usize,
    pub bind_failed: bool,
    pub radix: Radix,
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);

    let mut left_spans = vec![
        Span::styled(
            format!(" {}/{} bytes ", data.needed.min(data.available), data.needed),
            Style::default()
                .bg(if data.bind_failed {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", bar.fg(DEFAULT_THEME.comment)),
    ];
    if data.word_size > 0 {
        left_spans.push(Span::styled(
            format!("{} × {}-digit ", data.endian, data.word_size),
            bar.fg(DEFAULT_THEME.comment),
        ));
    }
    if data.diagnostics > 0 {
        left_spans.push(Span::styled(
            format!(" {} bad digit(s) ", data.diagnostics),
            Style::default()
                .bg(DEFAULT_THEME.secondary)
                .fg(Color::Black),
        ));
    }
    left_spans.push(Span::styled(
        format!(" {} ", data.message),
        bar.fg(if data.bind_failed {
            DEFAULT_THEME.error
        } else {
            DEFAULT_THEME.fg
        }),
    ));

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar.fg(DEFAULT_THEME.fg);
    let sep_style = bar.fg(DEFAULT_THEME.comment);

    let right_spans = vec![
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" select ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⇥ ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" r ", key_style),
        Span::styled(" radix ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(
            format!(" {} ", data.radix),
            Style::default()
                .bg(DEFAULT_THEME.success)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}

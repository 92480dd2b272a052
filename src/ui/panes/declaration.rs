//! Declaration pane: the struct text as read from disk, with light highlighting
//!
//! Words that spell a known integer type are coloured as types, `struct`,
//! `union` and the qualifiers the parser drops as keywords. Comments are
//! dimmed; the tokenizer works a line at a time, so only `//` and
//! single-line `/* */` comments are recognised.

use super::utils::{border_style, clamp_scroll};
use crate::layout::types;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn highlight_declaration(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut word_start = None;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_alphanumeric() || c == '_' {
            word_start.get_or_insert(i);
            continue;
        }

        if let Some(start) = word_start.take() {
            spans.push(Span::styled(&line[start..i], word_style(&line[start..i])));
        }

        if c == '/' && matches!(chars.peek(), Some((_, '/'))) {
            spans.push(Span::styled(
                &line[i..],
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }
        if c == '/' && matches!(chars.peek(), Some((_, '*'))) {
            let end = line[i + 2..]
                .find("*/")
                .map_or(line.len(), |rel| i + 2 + rel + 2);
            spans.push(Span::styled(
                &line[i..end],
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            while chars.peek().is_some_and(|&(j, _)| j < end) {
                chars.next();
            }
            continue;
        }

        let style = match c {
            '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(&line[i..i + c.len_utf8()], style));
    }

    if let Some(start) = word_start {
        spans.push(Span::styled(&line[start..], word_style(&line[start..])));
    }

    Line::from(spans)
}

fn word_style(word: &str) -> Style {
    match word {
        "struct" | "union" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "const" | "volatile" | "static" | "extern" | "register" | "__attribute__" => {
            Style::default().fg(DEFAULT_THEME.keyword)
        }
        _ if types::lookup(word).is_some() => Style::default().fg(DEFAULT_THEME.type_name),
        _ if word.starts_with(|c: char| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the declaration pane. `scroll` is clamped in place.
pub fn render_declaration_pane(
    frame: &mut Frame,
    area: Rect,
    declaration: &str,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(" Declaration ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines: Vec<&str> = declaration.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    *scroll = clamp_scroll(*scroll, lines.len(), visible_height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, line)| {
            let mut spans = vec![Span::styled(
                format!("{:4} ", idx + 1),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            spans.extend(highlight_declaration(line).spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlight_keeps_text() {
        let src = "struct ABC { unsigned int a; /* x */ char b; } v; // tail";
        assert_eq!(text(&highlight_declaration(src)), src);
    }

    #[test]
    fn test_highlight_styles() {
        let line = highlight_declaration("struct s { u16 x; } // c");
        let style_of = |word: &str| {
            line.spans
                .iter()
                .find(|s| s.content == word)
                .and_then(|s| s.style.fg)
        };
        assert_eq!(style_of("struct"), Some(DEFAULT_THEME.keyword));
        assert_eq!(style_of("u16"), Some(DEFAULT_THEME.type_name));
        assert_eq!(style_of("x"), Some(DEFAULT_THEME.fg));
        assert_eq!(style_of("// c"), Some(DEFAULT_THEME.comment));
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end_of_line() {
        let line = highlight_declaration("int a; /* open");
        let last = line.spans.last().unwrap();
        assert_eq!(last.content, "/* open");
    }
}

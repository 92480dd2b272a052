//! Main TUI application state and logic

use super::panes::{
    render_bytes_pane, render_declaration_pane, render_layout_pane, render_status_bar,
    BytesRenderData, LayoutRenderData, Radix, StatusRenderData,
};
use crate::config::ViewerConfig;
use crate::layout::LayoutRow;
use crate::view::BoundLayout;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::ops::Range;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Declaration,
    Layout,
    Bytes,
}

impl FocusedPane {
    /// Move focus to the next pane (declaration -> layout -> bytes)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Declaration => FocusedPane::Layout,
            FocusedPane::Layout => FocusedPane::Bytes,
            FocusedPane::Bytes => FocusedPane::Declaration,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Declaration => FocusedPane::Bytes,
            FocusedPane::Layout => FocusedPane::Declaration,
            FocusedPane::Bytes => FocusedPane::Layout,
        }
    }
}

/// The main application state
pub struct App {
    pub layout: BoundLayout,
    rows: Vec<LayoutRow>,

    /// The declaration as read from disk
    pub declaration: String,

    pub config: ViewerConfig,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into the flattened layout rows
    pub selected: usize,

    /// Per-pane scroll offsets
    pub declaration_scroll: usize,
    pub layout_scroll: usize,
    pub bytes_scroll: usize,

    pub radix: Radix,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(layout: BoundLayout, declaration: String, config: ViewerConfig) -> Self {
        let status_message = match &layout.bind_error {
            _ if layout.stream.is_empty() => "No data supplied".to_string(),
            Some(err) => err.to_string(),
            None => format!(
                "Bound {} of {} byte(s)",
                layout.consumed,
                layout.stream.len()
            ),
        };

        App {
            rows: layout.rows(),
            layout,
            declaration,
            config,
            focused_pane: FocusedPane::Layout,
            selected: 0,
            declaration_scroll: 0,
            layout_scroll: 0,
            bytes_scroll: 0,
            radix: Radix::default(),
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Byte range of the selected row in the stream
    pub fn selection(&self) -> Option<Range<usize>> {
        self.rows
            .get(self.selected)
            .map(|row| row.offset..row.offset + row.size)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left column: Declaration | right column: Layout (top), Bytes (bottom)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        render_declaration_pane(
            frame,
            columns[0],
            &self.declaration,
            self.focused_pane == FocusedPane::Declaration,
            &mut self.declaration_scroll,
        );

        render_layout_pane(
            frame,
            right_rows[0],
            LayoutRenderData {
                rows: &self.rows,
                selected: self.selected,
                radix: self.radix,
                consumed: self.layout.consumed,
            },
            self.focused_pane == FocusedPane::Layout,
            &mut self.layout_scroll,
        );

        render_bytes_pane(
            frame,
            right_rows[1],
            BytesRenderData {
                bytes: self.layout.stream.bytes(),
                group: self.config.group_bytes(),
                selection: self.selection(),
                consumed: self.layout.consumed,
            },
            self.focused_pane == FocusedPane::Bytes,
            &mut self.bytes_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                needed: self.layout.size(),
                available: self.layout.stream.len(),
                endian: self.config.endian,
                word_size: self.layout.stream.word_size(),
                diagnostics: self.layout.diagnostics.len(),
                bind_failed: self.layout.bind_error.is_some(),
                radix: self.radix,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.radix = self.radix.next();
                self.status_message = format!("Showing values in {}", self.radix);
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Layout => self.select(self.selected.saturating_sub(1)),
                FocusedPane::Declaration => {
                    self.declaration_scroll = self.declaration_scroll.saturating_sub(1);
                }
                FocusedPane::Bytes => {
                    self.bytes_scroll = self.bytes_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Layout => self.select(self.selected.saturating_add(1)),
                FocusedPane::Declaration => {
                    self.declaration_scroll = self.declaration_scroll.saturating_add(1);
                }
                FocusedPane::Bytes => {
                    self.bytes_scroll = self.bytes_scroll.saturating_add(1);
                }
            },
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(self.rows.len().saturating_sub(1)),
            _ => {}
        }
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(self.rows.len().saturating_sub(1));
        if let Some(row) = self.rows.get(self.selected) {
            self.status_message = format!(
                "{} @ {} ({} byte{})",
                if row.name.is_empty() {
                    "<anonymous>"
                } else {
                    row.name.as_str()
                },
                row.offset,
                row.size,
                if row.size == 1 { "" } else { "s" }
            );
        }
    }
}

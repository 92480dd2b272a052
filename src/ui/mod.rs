//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: viewer state, keyboard event loop, pane focus and row selection
//! - **[`panes`]**: render functions for each visible pane (declaration,
//!   layout, bytes, status bar)
//! - **[`theme`]**: color palette shared by all panes
//!
//! Construct an [`App`] from a [`BoundLayout`] and call [`App::run`].
//!
//! [`BoundLayout`]: crate::view::BoundLayout
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;

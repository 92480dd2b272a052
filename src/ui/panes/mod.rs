//! TUI pane rendering modules
//!
//! - [`declaration`]: the declaration as written, with light highlighting
//! - [`layout`]: flattened layout rows with offsets and bound values
//! - [`bytes`]: hex dump of the byte stream with the selection highlighted
//! - [`status`]: status bar with keybindings and binding state
//! - `utils`: value formatting and scroll helpers shared by the panes
//!
//! Each pane module exports a `render_*` function; panes with more than a
//! couple of inputs take a `*RenderData` struct.

mod utils;

pub mod bytes;
pub mod declaration;
pub mod layout;
pub mod status;

pub use bytes::{render_bytes_pane, BytesRenderData};
pub use declaration::render_declaration_pane;
pub use layout::{render_layout_pane, LayoutRenderData};
pub use status::{render_status_bar, StatusRenderData};
pub use utils::Radix;

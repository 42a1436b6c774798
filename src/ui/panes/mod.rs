//! TUI pane rendering modules
//!
//! Each pane is a stateless render function over the displayed snapshot:
//!
//! - [`tape`]: the store laid out one block per row
//! - [`output`]: the terms written up to the displayed round
//! - [`status`]: status bar with keybindings and playback state

pub mod output;
pub mod status;
pub mod tape;

pub use output::render_output_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use tape::render_tape_pane;

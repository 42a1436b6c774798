//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, and the
//!   snapshot history the user steps through
//! - **[`panes`]**: stateless render functions for each visible pane (tape,
//!   output, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a seeded
//! [`Machine`] and call [`App::run`] to start the event loop. Stepping past
//! the newest snapshot runs one more round of the machine.
//!
//! [`Machine`]: crate::engine::Machine
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;

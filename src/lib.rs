//! Pull-to-refresh and load-more pagination for a scrollable feed.
//!
//! - [`core`]: scroll surface model, pagination coordinator, feed data.
//! - [`app`]: terminal host state, events, input handling, fetch runtime.
//! - [`ui`]: Ratatui widgets.
//! - [`config`]: key bindings and settings persistence.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;

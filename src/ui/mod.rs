//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! Widgets read the surface and the feed store; no fetching happens here.

pub mod feed_widget;
pub mod layout;
pub mod smooth_scroll;
pub mod spinner;
pub mod status;
pub mod theme;

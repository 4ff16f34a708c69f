//! Application orchestration — state, events, input handling and the feed
//! delegate runtime.

pub mod event;
pub mod feed_runtime;
pub mod handler;
pub mod state;

//! Core logic — scroll surface model, pagination state machine, feed data.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Everything here is single-threaded (`Rc`/`RefCell`) and lives on the
//! UI event loop.

pub mod error;
pub mod feed;
pub mod pagination;
pub mod surface;

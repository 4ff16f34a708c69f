//! Central application state.
//!
//! The surface and the feed store are shared (`Rc`) with the coordinator
//! and the feed delegate; everything else is owned here and mutated by the
//! input handler.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::core::{
    feed::FeedStore,
    pagination::PaginationCoordinator,
    surface::SurfaceHandle,
};
use crate::ui::smooth_scroll::SmoothScroll;

/// Momentum friction per tick.
const MOMENTUM_FRICTION: f64 = 0.35;

/// Top-level application state.
pub struct AppState {
    /// Scroll surface the feed is drawn on.
    pub surface: SurfaceHandle,
    /// Pull-to-refresh / load-more driver for `surface`.
    pub coordinator: PaginationCoordinator,
    /// Items loaded so far.  Written by the feed delegate.
    pub store: Rc<RefCell<FeedStore>>,
    /// Mouse-wheel momentum; the surface decelerates while it runs.
    pub momentum: SmoothScroll,
    pub config: AppConfig,
    /// Where setting changes are persisted; `None` keeps them in memory.
    pub config_path: Option<PathBuf>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Frame counter driving the spinners.
    pub tick: u64,
}

impl AppState {
    pub fn new(
        surface: SurfaceHandle,
        coordinator: PaginationCoordinator,
        store: Rc<RefCell<FeedStore>>,
        config: AppConfig,
    ) -> Self {
        Self {
            surface,
            coordinator,
            store,
            momentum: SmoothScroll::new(MOMENTUM_FRICTION),
            config,
            config_path: None,
            should_quit: false,
            status_message: None,
            tick: 0,
        }
    }
}

//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Feed pane above a one-line status bar.
pub struct AppLayout {
    pub feed_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        Self {
            feed_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Rows of feed content visible inside the bordered pane.
    pub fn viewport_rows(&self) -> usize {
        self.feed_area.height.saturating_sub(2) as usize
    }
}

//! Loading affordances — the refresh badge drawn on the feed border and
//! the loading row drawn where the bottom indicator sits.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

/// What the top-of-list refresh affordance currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshBadge {
    Hidden,
    /// Overscroll in progress: `pulled` of `threshold` rows.
    Pulling { pulled: usize, threshold: usize },
    Refreshing,
}

/// Refresh badge rendered on the top border, right-aligned.
pub struct RefreshIndicator {
    pub badge: RefreshBadge,
    pub tick: u64,
}

impl Widget for RefreshIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = match self.badge {
            RefreshBadge::Hidden => return,
            RefreshBadge::Pulling { pulled, threshold } => {
                format!(" ↓ pull to refresh {pulled}/{threshold} ")
            }
            RefreshBadge::Refreshing => format!(" {} refreshing ", spinner_frame(self.tick)),
        };
        let label_width = label.chars().count() as u16;
        if area.height == 0 || area.width < label_width + 4 {
            return;
        }
        // Top-right, leaving one column for the border corner.
        let x = area.x + area.width.saturating_sub(label_width + 2);
        let line = Line::from(Span::styled(label, Theme::spinner_style()));
        buf.set_line(x, area.y, &line, label_width);
    }
}

/// Single row shown while the next page is loading.
pub struct LoadingRow {
    pub tick: u64,
}

impl Widget for LoadingRow {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let label = format!("{} loading more", spinner_frame(self.tick));
        let width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(width) / 2;
        let line = Line::from(Span::styled(label, Theme::spinner_style()));
        buf.set_line(x, area.y, &line, width.min(area.width));
    }
}

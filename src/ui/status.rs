//! Bottom status bar — item count, pagination state, last refresh, errors.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::core::{
    error::FetchError,
    pagination::{CoordinatorState, FetchKind},
};

use super::theme::Theme;

pub struct StatusBar<'a> {
    pub items: usize,
    pub state: CoordinatorState,
    pub has_more: bool,
    pub pull_to_refresh: bool,
    pub last_refreshed_at: Option<DateTime<Local>>,
    pub last_error: Option<&'a FetchError>,
    /// One-off message (e.g. after toggling a setting); replaces the hint.
    pub message: Option<&'a str>,
    pub hint: &'a str,
}

impl StatusBar<'_> {
    fn state_label(&self) -> &'static str {
        match self.state {
            CoordinatorState::Loading(FetchKind::Refresh) => "refreshing",
            CoordinatorState::Loading(FetchKind::LoadMore) => "loading",
            CoordinatorState::Idle if self.has_more => "idle",
            CoordinatorState::Idle => "complete",
        }
    }

    pub fn line(&self) -> Line<'_> {
        let mut spans = vec![Span::raw(format!(" {} items | {}", self.items, self.state_label()))];
        if let Some(at) = self.last_refreshed_at {
            spans.push(Span::raw(format!(" | updated {}", at.format("%H:%M:%S"))));
        }
        if !self.pull_to_refresh {
            spans.push(Span::raw(" | pull off"));
        }
        if let Some(err) = self.last_error {
            spans.push(Span::styled(format!(" | {err}"), Theme::error_style()));
        }
        let tail = self.message.unwrap_or(self.hint);
        spans.push(Span::raw(format!(" | {tail}")));
        Line::from(spans)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line())
            .style(Theme::status_bar_style())
            .render(area, buf);
    }
}

//! Custom Ratatui widget that renders the loaded feed from the surface's
//! offset, plus the bottom indicator row when it is inserted.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::core::{
    feed::{human_age, FeedItem},
    surface::IndicatorFrame,
};

use super::spinner::LoadingRow;
use super::theme::Theme;

// ───────────────────────────────────────── row model ─────────

/// One rendered row of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedRow {
    /// Index into the item slice.
    Item(usize),
    /// First row of the bottom indicator.
    Loading,
    /// Shown once the last page has been loaded.
    EndOfFeed,
    Blank,
}

// ───────────────────────────────────────── widget ────────────

/// The feed widget itself — created fresh each frame.
pub struct FeedWidget<'a> {
    items: &'a [FeedItem],
    offset: usize,
    indicator: Option<IndicatorFrame>,
    end_of_feed: bool,
    block: Option<Block<'a>>,
    tick: u64,
    now: DateTime<Local>,
}

impl<'a> FeedWidget<'a> {
    pub fn new(items: &'a [FeedItem], offset: usize) -> Self {
        Self {
            items,
            offset,
            indicator: None,
            end_of_feed: false,
            block: None,
            tick: 0,
            now: Local::now(),
        }
    }

    /// Indicator subview currently inserted in the surface.
    pub fn indicator(mut self, frame: Option<IndicatorFrame>) -> Self {
        self.indicator = frame;
        self
    }

    pub fn end_of_feed(mut self, end: bool) -> Self {
        self.end_of_feed = end;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    /// Rows for a viewport of `height` rows starting at the offset.
    pub fn build_rows(&self, height: usize) -> Vec<FeedRow> {
        (self.offset..self.offset + height)
            .map(|row| {
                if row < self.items.len() {
                    FeedRow::Item(row)
                } else if self.indicator.is_some_and(|f| row == f.origin) {
                    FeedRow::Loading
                } else if self.end_of_feed && row == self.items.len() {
                    FeedRow::EndOfFeed
                } else {
                    FeedRow::Blank
                }
            })
            .collect()
    }

    fn item_line(&self, item: &FeedItem, width: u16) -> Line<'static> {
        let id = format!("{:>5}  ", item.id + 1);
        let age = format!(" {}", human_age(item.published, self.now));
        let room = (width as usize).saturating_sub(id.chars().count() + age.chars().count());
        let title: String = item.title.chars().take(room).collect();
        let pad = " ".repeat(room.saturating_sub(title.chars().count()));
        Line::from(vec![
            Span::styled(id, Theme::item_id_style()),
            Span::styled(title, Theme::item_style()),
            Span::raw(pad),
            Span::styled(age, Theme::age_style()),
        ])
    }
}

impl Widget for FeedWidget<'_> {
    fn render(mut self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block.take() {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let rows = self.build_rows(inner.height as usize);
        for (i, row) in rows.into_iter().enumerate() {
            let y = inner.y + i as u16;
            let row_area = Rect::new(inner.x, y, inner.width, 1);
            match row {
                FeedRow::Item(idx) => {
                    let line = self.item_line(&self.items[idx], inner.width);
                    buf.set_line(inner.x, y, &line, inner.width);
                }
                FeedRow::Loading => LoadingRow { tick: self.tick }.render(row_area, buf),
                FeedRow::EndOfFeed => {
                    let line = Line::from(Span::styled("— end of feed —", Theme::end_of_feed_style()))
                        .centered();
                    line.render(row_area, buf);
                }
                FeedRow::Blank => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feed::FeedSource;
    use pretty_assertions::assert_eq;

    fn items(n: usize) -> Vec<FeedItem> {
        FeedSource::new(n, 1).page(0).unwrap()
    }

    #[test]
    fn rows_follow_offset() {
        let items = items(10);
        let widget = FeedWidget::new(&items, 7);
        assert_eq!(
            widget.build_rows(4),
            vec![FeedRow::Item(7), FeedRow::Item(8), FeedRow::Item(9), FeedRow::Blank]
        );
    }

    #[test]
    fn indicator_row_sits_below_content() {
        let items = items(3);
        let widget = FeedWidget::new(&items, 1).indicator(Some(IndicatorFrame {
            origin: 3,
            height: 1,
        }));
        assert_eq!(
            widget.build_rows(3),
            vec![FeedRow::Item(1), FeedRow::Item(2), FeedRow::Loading]
        );
    }

    #[test]
    fn end_marker_after_last_page() {
        let items = items(2);
        let widget = FeedWidget::new(&items, 0).end_of_feed(true);
        assert_eq!(
            widget.build_rows(4),
            vec![FeedRow::Item(0), FeedRow::Item(1), FeedRow::EndOfFeed, FeedRow::Blank]
        );
    }

    #[test]
    fn renders_titles_inside_block() {
        let items = items(2);
        let area = Rect::new(0, 0, 50, 4);
        let mut buf = Buffer::empty(area);
        FeedWidget::new(&items, 0)
            .block(Block::bordered())
            .render(area, &mut buf);

        let row: String = (0..area.width).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("release notes #1"), "{row:?}");
        assert!(row.trim_end().ends_with("now│"), "{row:?}");
    }
}

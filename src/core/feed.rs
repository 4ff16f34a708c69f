//! Synthetic paged feed — the data behind the list.
//!
//! [`FeedSource`] produces deterministic pages so the UI (and the tests)
//! can exercise refresh, load-more and failure paths without a network.
//! [`FeedStore`] holds what has been loaded so far.

use chrono::{DateTime, Duration, Local};

use super::error::FetchError;

/// One row of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: usize,
    pub title: String,
    /// Age shown next to the title.
    pub published: DateTime<Local>,
}

/// Deterministic page generator.
#[derive(Debug, Clone)]
pub struct FeedSource {
    pub page_size: usize,
    pub total_pages: usize,
    /// Fail every n-th request (0 = never).
    pub fail_every: usize,
    requests: usize,
    /// Bumped on every refresh so reloaded pages look fresh.
    revision: usize,
}

const TOPICS: &[&str] = &[
    "release notes",
    "build report",
    "incident review",
    "design sketch",
    "changelog digest",
    "benchmark run",
    "dependency bump",
];

impl FeedSource {
    pub fn new(page_size: usize, total_pages: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            total_pages: total_pages.max(1),
            fail_every: 0,
            requests: 0,
            revision: 0,
        }
    }

    pub fn with_fail_every(mut self, n: usize) -> Self {
        self.fail_every = n;
        self
    }

    /// Number of requests served so far, failures included.
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Produce page `index` (0-based).
    pub fn page(&mut self, index: usize) -> Result<Vec<FeedItem>, FetchError> {
        self.requests += 1;
        if self.fail_every > 0 && self.requests % self.fail_every == 0 {
            return Err(FetchError::Unavailable { page: index });
        }
        if index == 0 {
            self.revision += 1;
        }
        if index >= self.total_pages {
            return Ok(Vec::new());
        }

        let now = Local::now();
        let first = index * self.page_size;
        let items = (first..first + self.page_size)
            .map(|id| FeedItem {
                id,
                title: format!(
                    "{} #{} (rev {})",
                    TOPICS[id % TOPICS.len()],
                    id + 1,
                    self.revision
                ),
                published: now - Duration::minutes(id as i64 * 7),
            })
            .collect();
        Ok(items)
    }

    /// Whether another page exists after `index`.
    pub fn has_more_after(&self, index: usize) -> bool {
        index + 1 < self.total_pages
    }
}

/// Items loaded so far plus the index of the next page to request.
#[derive(Debug, Default)]
pub struct FeedStore {
    pub items: Vec<FeedItem>,
    pub next_page: usize,
}

impl FeedStore {
    /// Result of a refresh: page 0 replaces everything.
    pub fn replace(&mut self, first_page: Vec<FeedItem>) {
        self.items = first_page;
        self.next_page = 1;
    }

    /// Result of a load-more.
    pub fn append(&mut self, page: Vec<FeedItem>) {
        self.items.extend(page);
        self.next_page += 1;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Compact relative age, e.g. `"7m"`, `"2h"`, `"3d"`.
pub fn human_age(published: DateTime<Local>, now: DateTime<Local>) -> String {
    let minutes = (now - published).num_minutes().max(0);
    match minutes {
        0 => "now".into(),
        m if m < 60 => format!("{m}m"),
        m if m < 60 * 24 => format!("{}h", m / 60),
        m => format!("{}d", m / (60 * 24)),
    }
}

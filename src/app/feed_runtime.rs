//! Feed delegate — fulfils refresh / load-more requests as local tasks.
//!
//! Each request runs on the UI thread's `LocalSet`: it waits out the
//! simulated latency, pulls a page from the [`FeedSource`], applies it to
//! the shared [`FeedStore`], resizes the surface content and only then
//! completes the coordinator.  A wake-up is sent so the loop redraws.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::app::event::AppEvent;
use crate::core::{
    feed::{FeedSource, FeedStore},
    pagination::{Completion, FetchKind, FetchOutcome, PaginationDelegate},
    surface::{SurfaceHandle, WeakSurface},
};

pub struct FeedDelegate {
    source: Rc<RefCell<FeedSource>>,
    store: Rc<RefCell<FeedStore>>,
    surface: WeakSurface,
    latency: Duration,
    wake: Option<mpsc::UnboundedSender<AppEvent>>,
}

impl FeedDelegate {
    pub fn new(
        source: FeedSource,
        store: Rc<RefCell<FeedStore>>,
        surface: &SurfaceHandle,
        latency: Duration,
    ) -> Self {
        Self {
            source: Rc::new(RefCell::new(source)),
            store,
            surface: surface.downgrade(),
            latency,
            wake: None,
        }
    }

    /// Send [`AppEvent::FetchSettled`] on this channel after each request.
    pub fn with_waker(mut self, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        self.wake = Some(tx);
        self
    }

    fn spawn(&self, done: Completion) {
        let source = Rc::clone(&self.source);
        let store = Rc::clone(&self.store);
        let surface = self.surface.clone();
        let latency = self.latency;
        let wake = self.wake.clone();

        tokio::task::spawn_local(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let outcome = fetch_and_apply(done.kind(), &source, &store, &surface);
            done.complete(outcome);
            if let Some(tx) = wake {
                let _ = tx.send(AppEvent::FetchSettled);
            }
        });
    }
}

impl PaginationDelegate for FeedDelegate {
    fn refresh_all(&self, done: Completion) {
        self.spawn(done);
    }

    fn load_more(&self, done: Completion) {
        self.spawn(done);
    }
}

fn fetch_and_apply(
    kind: FetchKind,
    source: &RefCell<FeedSource>,
    store: &RefCell<FeedStore>,
    surface: &WeakSurface,
) -> FetchOutcome {
    let index = match kind {
        FetchKind::Refresh => 0,
        FetchKind::LoadMore => store.borrow().next_page,
    };
    let page = source.borrow_mut().page(index)?;
    debug!(?kind, page = index, items = page.len(), "page fetched");

    let len = {
        let mut store = store.borrow_mut();
        match kind {
            FetchKind::Refresh => store.replace(page),
            FetchKind::LoadMore => store.append(page),
        }
        store.len()
    };
    // One row per item.
    if let Some(surface) = surface.upgrade() {
        surface.set_content_extent(len);
    }
    Ok(source.borrow().has_more_after(index))
}

//! Pull-to-refresh at the top and automatic "load more" near the bottom
//! of a [`SurfaceHandle`].
//!
//! The coordinator is a two-state machine (`Idle`, `Loading`).  It never
//! fetches anything itself: a [`PaginationDelegate`] performs the two
//! requests and reports back through a single-shot [`Completion`].
//!
//! Ownership:
//! - the host owns the surface; the coordinator keeps a [`WeakSurface`];
//! - the coordinator owns its state; every callback it hands out (position
//!   listener, refresh handler, completions) holds a `Weak` to that state
//!   and becomes a no-op once the coordinator is dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Local};
use tracing::{debug, trace, warn};

use super::error::FetchError;
use super::surface::{IndicatorFrame, Position, SubscriptionId, SurfaceHandle, WeakSurface};

/// Result of a fetch: `Ok(has_more_data)` or the failure.
pub type FetchOutcome = Result<bool, FetchError>;

/// Default height of the bottom loading indicator, in rows.
pub const DEFAULT_INDICATOR_ROWS: usize = 1;

/// Data source driven by the coordinator.
///
/// Each method must eventually call [`Completion::complete`] exactly once,
/// either synchronously inside the call or later from the event loop.
pub trait PaginationDelegate {
    /// Reload everything from the first page.
    fn refresh_all(&self, done: Completion);
    /// Append the next page.
    fn load_more(&self, done: Completion);
}

/// Which request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Refresh,
    LoadMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Idle,
    Loading(FetchKind),
}

type LoadCallback = Box<dyn FnOnce(&FetchOutcome)>;

/// Single-shot completion handed to the delegate.
///
/// Dropping it without calling [`Completion::complete`] reports
/// [`FetchError::Abandoned`], so the coordinator never stays `Loading`.
pub struct Completion {
    owner: Option<Weak<RefCell<Inner>>>,
    kind: FetchKind,
    on_complete: Option<LoadCallback>,
}

impl Completion {
    fn new(owner: Weak<RefCell<Inner>>, kind: FetchKind, on_complete: Option<LoadCallback>) -> Self {
        Self {
            owner: Some(owner),
            kind,
            on_complete,
        }
    }

    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    /// Deliver the outcome.  Does nothing if the coordinator is gone.
    pub fn complete(mut self, outcome: FetchOutcome) {
        self.deliver(outcome);
    }

    fn deliver(&mut self, outcome: FetchOutcome) {
        let Some(owner) = self.owner.take() else {
            return;
        };
        let Some(inner) = owner.upgrade() else {
            debug!(kind = ?self.kind, "fetch completed after coordinator teardown");
            return;
        };
        match self.kind {
            FetchKind::Refresh => finish_refresh(&inner, &outcome),
            FetchKind::LoadMore => finish_load_more(&inner, &outcome),
        }
        if let Some(callback) = self.on_complete.take() {
            callback(&outcome);
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.owner.is_some() {
            warn!(kind = ?self.kind, "fetch completion dropped without a result");
            self.deliver(Err(FetchError::Abandoned));
        }
    }
}

/// Loading spinner placed below the last row of content.
struct BottomIndicator {
    frame: IndicatorFrame,
    shown: bool,
}

struct Inner {
    surface: WeakSurface,
    delegate: Option<Rc<dyn PaginationDelegate>>,
    in_flight: Option<FetchKind>,
    has_more_data: bool,
    pull_to_refresh: bool,
    subscription: Option<SubscriptionId>,
    bottom_indicator: Option<BottomIndicator>,
    indicator_rows: usize,
    last_refreshed_at: Option<DateTime<Local>>,
    last_error: Option<FetchError>,
}

impl Inner {
    fn start_observing(&mut self, this: Weak<RefCell<Inner>>) {
        if self.subscription.is_some() {
            return;
        }
        let Some(surface) = self.surface.upgrade() else {
            return;
        };
        let id = surface.view_mut().subscribe(move |position| {
            if let Some(inner) = this.upgrade() {
                on_position_changed(&inner, position);
            }
        });
        trace!(subscription = id, "observing scroll position");
        self.subscription = Some(id);
    }

    fn stop_observing(&mut self) {
        let Some(id) = self.subscription.take() else {
            return;
        };
        if let Some(surface) = self.surface.upgrade() {
            surface.view_mut().unsubscribe(id);
        }
        trace!(subscription = id, "stopped observing scroll position");
    }

    /// Create the indicator and reserve room for it below the content.
    fn prepare_indicator(&mut self) {
        let Some(surface) = self.surface.upgrade() else {
            return;
        };
        let mut view = surface.view_mut();
        let frame = IndicatorFrame {
            origin: view.content_extent(),
            height: self.indicator_rows,
        };
        if self.bottom_indicator.as_ref().is_some_and(|i| i.shown) {
            view.remove_indicator();
        }
        self.bottom_indicator = Some(BottomIndicator { frame, shown: false });
        view.set_bottom_inset(frame.height);
    }

    fn show_indicator(&mut self) {
        let Some(indicator) = self.bottom_indicator.as_mut() else {
            return;
        };
        if let Some(surface) = self.surface.upgrade() {
            surface.view_mut().insert_indicator(indicator.frame);
            indicator.shown = true;
        }
    }

    fn hide_indicator(&mut self) {
        let Some(indicator) = self.bottom_indicator.as_mut() else {
            return;
        };
        if indicator.shown {
            if let Some(surface) = self.surface.upgrade() {
                surface.view_mut().remove_indicator();
            }
            indicator.shown = false;
        }
    }

    /// Hide the indicator for good and give back its inset.
    fn remove_indicator(&mut self) {
        self.hide_indicator();
        if self.bottom_indicator.take().is_some() {
            if let Some(surface) = self.surface.upgrade() {
                surface.view_mut().set_bottom_inset(0);
            }
        }
    }

    fn reanchor_indicator(&mut self, content_extent: usize) {
        let Some(indicator) = self.bottom_indicator.as_mut() else {
            return;
        };
        indicator.frame.origin = content_extent;
        if indicator.shown {
            if let Some(surface) = self.surface.upgrade() {
                surface.view_mut().insert_indicator(indicator.frame);
            }
        }
    }

    fn end_refreshing(&self) {
        if let Some(surface) = self.surface.upgrade() {
            surface.view_mut().end_refreshing();
        }
    }
}

/// Drives pull-to-refresh and load-more for one scroll surface.
pub struct PaginationCoordinator {
    inner: Rc<RefCell<Inner>>,
}

impl PaginationCoordinator {
    pub fn new(surface: &SurfaceHandle, pull_to_refresh: bool) -> Self {
        let coordinator = Self {
            inner: Rc::new(RefCell::new(Inner {
                surface: surface.downgrade(),
                delegate: None,
                in_flight: None,
                has_more_data: true,
                pull_to_refresh,
                subscription: None,
                bottom_indicator: None,
                indicator_rows: DEFAULT_INDICATOR_ROWS,
                last_refreshed_at: None,
                last_error: None,
            })),
        };
        coordinator.setup_pull_to_refresh();
        coordinator
    }

    /// Replace the data source.  Dropping the previous one may abandon its
    /// outstanding completion, so it is released outside the borrow.
    pub fn set_delegate(&self, delegate: Rc<dyn PaginationDelegate>) {
        let previous = self.inner.borrow_mut().delegate.replace(delegate);
        drop(previous);
    }

    /// Height of the bottom indicator prepared by the next refresh.
    pub fn set_indicator_rows(&self, rows: usize) {
        self.inner.borrow_mut().indicator_rows = rows.max(1);
    }

    /// Programmatic refresh.  `on_complete` runs after the coordinator
    /// state has been updated.  Ignored (and never called back) while a
    /// fetch is in flight.
    pub fn load(&self, on_complete: impl FnOnce(&FetchOutcome) + 'static) {
        request_refresh(&self.inner, Some(Box::new(on_complete)));
    }

    /// Add or remove the refresh control.  Safe to call repeatedly.
    pub fn set_pull_to_refresh(&self, enabled: bool) {
        self.inner.borrow_mut().pull_to_refresh = enabled;
        self.setup_pull_to_refresh();
    }

    pub fn pull_to_refresh_enabled(&self) -> bool {
        self.inner.borrow().pull_to_refresh
    }

    pub fn is_loading(&self) -> bool {
        self.inner.borrow().in_flight.is_some()
    }

    pub fn has_more_data(&self) -> bool {
        self.inner.borrow().has_more_data
    }

    pub fn is_observing_position(&self) -> bool {
        self.inner.borrow().subscription.is_some()
    }

    /// `true` once a refresh has prepared the bottom indicator and until
    /// the last page has been loaded.
    pub fn has_bottom_indicator(&self) -> bool {
        self.inner.borrow().bottom_indicator.is_some()
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Local>> {
        self.inner.borrow().last_refreshed_at
    }

    pub fn last_error(&self) -> Option<FetchError> {
        self.inner.borrow().last_error.clone()
    }

    pub fn state(&self) -> CoordinatorState {
        match self.inner.borrow().in_flight {
            Some(kind) => CoordinatorState::Loading(kind),
            None => CoordinatorState::Idle,
        }
    }

    fn setup_pull_to_refresh(&self) {
        let state = self.inner.borrow();
        let Some(surface) = state.surface.upgrade() else {
            return;
        };
        if state.pull_to_refresh {
            let this = Rc::downgrade(&self.inner);
            let attached = surface.view_mut().attach_refresh_control(move || {
                if let Some(inner) = this.upgrade() {
                    request_refresh(&inner, None);
                }
            });
            if attached {
                debug!("pull-to-refresh enabled");
            }
        } else if surface.view_mut().detach_refresh_control() {
            debug!("pull-to-refresh disabled");
        }
    }
}

impl Drop for PaginationCoordinator {
    fn drop(&mut self) {
        let mut state = self.inner.borrow_mut();
        state.stop_observing();
        state.remove_indicator();
        if state.pull_to_refresh {
            if let Some(surface) = state.surface.upgrade() {
                surface.view_mut().detach_refresh_control();
            }
        }
    }
}

fn request_refresh(inner: &Rc<RefCell<Inner>>, on_complete: Option<LoadCallback>) {
    let delegate = {
        let mut state = inner.borrow_mut();
        if state.in_flight.is_some() {
            trace!("refresh ignored, fetch already in flight");
            state.end_refreshing();
            return;
        }
        let Some(delegate) = state.delegate.clone() else {
            warn!("refresh requested without a delegate");
            state.end_refreshing();
            return;
        };
        state.in_flight = Some(FetchKind::Refresh);
        delegate
    };
    debug!("refresh started");
    delegate.refresh_all(Completion::new(
        Rc::downgrade(inner),
        FetchKind::Refresh,
        on_complete,
    ));
}

fn finish_refresh(inner: &Rc<RefCell<Inner>>, outcome: &FetchOutcome) {
    let mut state = inner.borrow_mut();
    state.in_flight = None;
    match outcome {
        Ok(has_more) => {
            debug!(has_more, "refresh finished");
            state.has_more_data = *has_more;
            state.last_error = None;
            state.last_refreshed_at = Some(Local::now());
            if *has_more {
                state.start_observing(Rc::downgrade(inner));
                state.prepare_indicator();
            } else {
                state.remove_indicator();
                state.stop_observing();
            }
        }
        Err(err) => {
            warn!(error = %err, "refresh failed");
            state.last_error = Some(err.clone());
        }
    }
    state.end_refreshing();
}

fn on_position_changed(inner: &Rc<RefCell<Inner>>, position: Position) {
    let delegate = {
        let mut state = inner.borrow_mut();
        state.reanchor_indicator(position.content_extent);

        if !position.phase.is_user_driven() {
            return;
        }
        if state.in_flight.is_some() || !state.has_more_data {
            return;
        }
        if !position.is_near_bottom() {
            return;
        }
        let Some(delegate) = state.delegate.clone() else {
            return;
        };
        state.in_flight = Some(FetchKind::LoadMore);
        state.show_indicator();
        delegate
    };
    debug!(offset = position.offset, "load more started");
    delegate.load_more(Completion::new(
        Rc::downgrade(inner),
        FetchKind::LoadMore,
        None,
    ));
}

fn finish_load_more(inner: &Rc<RefCell<Inner>>, outcome: &FetchOutcome) {
    let mut state = inner.borrow_mut();
    state.hide_indicator();
    state.in_flight = None;
    match outcome {
        Ok(has_more) => {
            debug!(has_more, "load more finished");
            state.has_more_data = *has_more;
            state.last_error = None;
            if !*has_more {
                state.remove_indicator();
                state.stop_observing();
            }
        }
        Err(err) => {
            warn!(error = %err, "load more failed");
            state.last_error = Some(err.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::ScrollPhase;
    use std::cell::Cell;

    /// Keeps every completion so the test decides when requests finish.
    #[derive(Default)]
    struct RecordingDelegate {
        refresh_calls: Cell<usize>,
        load_more_calls: Cell<usize>,
        pending: RefCell<Vec<Completion>>,
    }

    impl RecordingDelegate {
        fn finish(&self, outcome: FetchOutcome) {
            let done = self.pending.borrow_mut().pop().expect("no pending request");
            done.complete(outcome);
        }
    }

    impl PaginationDelegate for RecordingDelegate {
        fn refresh_all(&self, done: Completion) {
            self.refresh_calls.set(self.refresh_calls.get() + 1);
            self.pending.borrow_mut().push(done);
        }

        fn load_more(&self, done: Completion) {
            self.load_more_calls.set(self.load_more_calls.get() + 1);
            self.pending.borrow_mut().push(done);
        }
    }

    /// Completes inside the call.
    struct ImmediateDelegate {
        has_more: bool,
        calls: Cell<usize>,
    }

    impl PaginationDelegate for ImmediateDelegate {
        fn refresh_all(&self, done: Completion) {
            self.calls.set(self.calls.get() + 1);
            done.complete(Ok(self.has_more));
        }

        fn load_more(&self, done: Completion) {
            self.calls.set(self.calls.get() + 1);
            done.complete(Ok(self.has_more));
        }
    }

    fn setup(pull: bool) -> (SurfaceHandle, PaginationCoordinator, Rc<RecordingDelegate>) {
        let surface = SurfaceHandle::new(10);
        surface.set_content_extent(30);
        let coordinator = PaginationCoordinator::new(&surface, pull);
        let delegate = Rc::new(RecordingDelegate::default());
        coordinator.set_delegate(delegate.clone());
        (surface, coordinator, delegate)
    }

    /// Refresh that reports more data, leaving the coordinator observing.
    fn refreshed(pull: bool) -> (SurfaceHandle, PaginationCoordinator, Rc<RecordingDelegate>) {
        let (surface, coordinator, delegate) = setup(pull);
        coordinator.load(|_| {});
        delegate.finish(Ok(true));
        (surface, coordinator, delegate)
    }

    #[test]
    fn new_coordinator_is_idle_with_more_data() {
        let (surface, coordinator, _) = setup(true);
        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        assert!(coordinator.has_more_data());
        assert!(!coordinator.is_observing_position());
        assert!(surface.view().has_refresh_control());
    }

    #[test]
    fn loading_only_between_request_and_completion() {
        let (_surface, coordinator, delegate) = setup(true);
        let coordinator = Rc::new(coordinator);
        let seen_loading = Rc::new(Cell::new(None));

        let weak = Rc::downgrade(&coordinator);
        let seen = Rc::clone(&seen_loading);
        coordinator.load(move |outcome| {
            assert_eq!(outcome, &Ok(true));
            seen.set(weak.upgrade().map(|c| c.is_loading()));
        });
        assert_eq!(coordinator.state(), CoordinatorState::Loading(FetchKind::Refresh));

        delegate.finish(Ok(true));
        assert_eq!(seen_loading.get(), Some(false));
        assert!(!coordinator.is_loading());
    }

    #[test]
    fn double_load_issues_one_refresh() {
        let (_surface, coordinator, delegate) = setup(true);
        let callbacks = Rc::new(Cell::new(0));
        for _ in 0..2 {
            let c = Rc::clone(&callbacks);
            coordinator.load(move |_| c.set(c.get() + 1));
        }
        assert_eq!(delegate.refresh_calls.get(), 1);

        delegate.finish(Ok(true));
        assert_eq!(callbacks.get(), 1);
        assert!(delegate.pending.borrow().is_empty());
    }

    #[test]
    fn refresh_with_more_data_observes_and_reserves_indicator() {
        let (surface, coordinator, _) = refreshed(true);
        assert!(coordinator.is_observing_position());
        assert!(coordinator.has_bottom_indicator());
        assert!(coordinator.last_refreshed_at().is_some());
        assert_eq!(surface.view().bottom_inset(), DEFAULT_INDICATOR_ROWS);
        assert_eq!(surface.view().listener_count(), 1);
        assert_eq!(surface.view().indicator(), None);
    }

    #[test]
    fn refresh_without_more_data_leaves_no_indicator_or_observer() {
        let (surface, coordinator, delegate) = refreshed(true);
        coordinator.load(|_| {});
        delegate.finish(Ok(false));

        assert!(!coordinator.has_more_data());
        assert!(!coordinator.has_bottom_indicator());
        assert!(!coordinator.is_observing_position());
        assert_eq!(surface.view().listener_count(), 0);
        assert_eq!(surface.view().bottom_inset(), 0);
    }

    #[test]
    fn scrolling_to_bottom_loads_more_exactly_once() {
        let (surface, coordinator, delegate) = refreshed(true);

        surface.scroll_to(25, ScrollPhase::Dragging);
        surface.scroll_by(1, ScrollPhase::Dragging);
        surface.scroll_by(1, ScrollPhase::Decelerating);

        assert_eq!(delegate.load_more_calls.get(), 1);
        assert_eq!(coordinator.state(), CoordinatorState::Loading(FetchKind::LoadMore));
        let frame = surface.view().indicator().expect("indicator shown while loading");
        assert_eq!(frame.origin, 30);

        surface.set_content_extent(40);
        assert_eq!(surface.view().indicator().map(|f| f.origin), Some(40));

        delegate.finish(Ok(true));
        assert!(!coordinator.is_loading());
        assert_eq!(surface.view().indicator(), None);
        assert_eq!(surface.view().bottom_inset(), DEFAULT_INDICATOR_ROWS);
        assert!(coordinator.is_observing_position());
    }

    #[test]
    fn scroll_above_threshold_does_not_load() {
        let (surface, _coordinator, delegate) = refreshed(true);
        surface.scroll_to(19, ScrollPhase::Dragging);
        assert_eq!(delegate.load_more_calls.get(), 0);
        surface.scroll_to(20, ScrollPhase::Dragging);
        assert_eq!(delegate.load_more_calls.get(), 1);
    }

    #[test]
    fn programmatic_scroll_never_loads_more() {
        let (surface, _coordinator, delegate) = refreshed(true);
        surface.scroll_to(30, ScrollPhase::Idle);
        surface.set_content_extent(5);
        assert_eq!(delegate.load_more_calls.get(), 0);
    }

    #[test]
    fn last_page_stops_further_load_more() {
        let (surface, coordinator, delegate) = refreshed(true);
        surface.scroll_to(30, ScrollPhase::Dragging);
        delegate.finish(Ok(false));

        assert!(!coordinator.is_observing_position());
        assert!(!coordinator.has_bottom_indicator());
        assert_eq!(surface.view().bottom_inset(), 0);

        for _ in 0..5 {
            surface.scroll_to(0, ScrollPhase::Dragging);
            surface.scroll_to(30, ScrollPhase::Decelerating);
        }
        assert_eq!(delegate.load_more_calls.get(), 1);
    }

    #[test]
    fn refresh_gesture_during_load_more_only_ends_refreshing() {
        let (surface, coordinator, delegate) = refreshed(true);
        surface.scroll_to(30, ScrollPhase::Dragging);
        assert!(coordinator.is_loading());

        assert!(surface.pull_to_refresh());
        assert_eq!(delegate.refresh_calls.get(), 1);
        assert!(!surface.view().is_refreshing());
        assert_eq!(coordinator.state(), CoordinatorState::Loading(FetchKind::LoadMore));
    }

    #[test]
    fn pull_gesture_refreshes_and_ends_affordance() {
        let (surface, coordinator, delegate) = setup(true);
        assert!(surface.pull_to_refresh());
        assert!(surface.view().is_refreshing());
        assert_eq!(coordinator.state(), CoordinatorState::Loading(FetchKind::Refresh));

        delegate.finish(Ok(true));
        assert!(!surface.view().is_refreshing());
        assert!(coordinator.is_observing_position());
    }

    #[test]
    fn toggling_pull_to_refresh_keeps_a_single_handler() {
        let (surface, coordinator, delegate) = setup(true);
        for _ in 0..2 {
            coordinator.set_pull_to_refresh(false);
            assert!(!surface.view().has_refresh_control());
            coordinator.set_pull_to_refresh(true);
            coordinator.set_pull_to_refresh(true);
        }
        assert!(coordinator.pull_to_refresh_enabled());

        surface.pull_to_refresh();
        assert_eq!(delegate.refresh_calls.get(), 1);
    }

    #[test]
    fn disabled_pull_to_refresh_ignores_gesture() {
        let (surface, coordinator, delegate) = setup(false);
        assert!(!surface.pull_to_refresh());
        assert!(!surface.overscroll(10, 1));
        assert_eq!(delegate.refresh_calls.get(), 0);
        assert!(!coordinator.is_loading());
    }

    #[test]
    fn failed_refresh_keeps_more_data_and_can_retry() {
        let (surface, coordinator, delegate) = setup(true);
        let reported = Rc::new(RefCell::new(None));
        let r = Rc::clone(&reported);
        coordinator.load(move |outcome| *r.borrow_mut() = Some(outcome.clone()));
        delegate.finish(Err(FetchError::Unavailable { page: 0 }));

        assert_eq!(
            *reported.borrow(),
            Some(Err(FetchError::Unavailable { page: 0 }))
        );
        assert_eq!(coordinator.state(), CoordinatorState::Idle);
        assert!(coordinator.has_more_data());
        assert_eq!(coordinator.last_error(), Some(FetchError::Unavailable { page: 0 }));
        assert!(!surface.view().is_refreshing());

        coordinator.load(|_| {});
        delegate.finish(Ok(true));
        assert_eq!(delegate.refresh_calls.get(), 2);
        assert_eq!(coordinator.last_error(), None);
    }

    #[test]
    fn failed_load_more_hides_indicator_and_allows_retry() {
        let (surface, coordinator, delegate) = refreshed(true);
        surface.scroll_to(30, ScrollPhase::Dragging);
        delegate.finish(Err(FetchError::Source("boom".into())));

        assert!(coordinator.has_more_data());
        assert!(coordinator.has_bottom_indicator());
        assert!(coordinator.is_observing_position());
        assert_eq!(surface.view().indicator(), None);

        surface.scroll_by(1, ScrollPhase::Dragging);
        assert_eq!(delegate.load_more_calls.get(), 2);
    }

    #[test]
    fn dropped_completion_reports_abandoned() {
        let (_surface, coordinator, delegate) = setup(true);
        coordinator.load(|_| {});
        drop(delegate.pending.borrow_mut().pop());

        assert!(!coordinator.is_loading());
        assert_eq!(coordinator.last_error(), Some(FetchError::Abandoned));
    }

    #[test]
    fn replacing_delegate_mid_fetch_abandons_its_request() {
        let surface = SurfaceHandle::new(10);
        surface.set_content_extent(30);
        let coordinator = PaginationCoordinator::new(&surface, true);
        // The coordinator holds the only reference, so replacing it drops
        // the pending completion.
        coordinator.set_delegate(Rc::new(RecordingDelegate::default()));
        coordinator.load(|_| {});
        assert!(coordinator.is_loading());

        let next = Rc::new(RecordingDelegate::default());
        coordinator.set_delegate(next.clone());

        assert!(!coordinator.is_loading());
        assert_eq!(coordinator.last_error(), Some(FetchError::Abandoned));
        assert!(!surface.view().is_refreshing());

        coordinator.load(|_| {});
        assert_eq!(next.refresh_calls.get(), 1);
    }

    #[test]
    fn completion_after_teardown_is_ignored() {
        let (surface, coordinator, delegate) = refreshed(true);
        surface.scroll_to(30, ScrollPhase::Dragging);
        drop(coordinator);

        assert_eq!(surface.view().listener_count(), 0);
        assert!(!surface.view().has_refresh_control());
        assert_eq!(surface.view().indicator(), None);

        delegate.finish(Ok(false));
        surface.scroll_to(0, ScrollPhase::Dragging);
        assert_eq!(delegate.load_more_calls.get(), 1);
    }

    #[test]
    fn coordinator_survives_surface_teardown() {
        let (surface, coordinator, delegate) = setup(true);
        coordinator.load(|_| {});
        drop(surface);
        delegate.finish(Ok(true));
        assert!(!coordinator.is_loading());
        assert!(!coordinator.is_observing_position());
    }

    #[test]
    fn synchronous_delegate_completes_inside_the_call() {
        let surface = SurfaceHandle::new(10);
        surface.set_content_extent(30);
        let coordinator = PaginationCoordinator::new(&surface, true);
        let delegate = Rc::new(ImmediateDelegate {
            has_more: true,
            calls: Cell::new(0),
        });
        coordinator.set_delegate(delegate.clone());

        coordinator.load(|_| {});
        surface.scroll_to(30, ScrollPhase::Dragging);

        assert_eq!(delegate.calls.get(), 2);
        assert!(!coordinator.is_loading());
        assert!(coordinator.is_observing_position());
    }

    #[test]
    fn requests_without_delegate_stay_idle() {
        let surface = SurfaceHandle::new(10);
        let coordinator = PaginationCoordinator::new(&surface, true);
        let called = Rc::new(Cell::new(false));
        let c = Rc::clone(&called);
        coordinator.load(move |_| c.set(true));
        assert!(surface.pull_to_refresh());

        assert!(!called.get());
        assert!(!coordinator.is_loading());
        assert!(!surface.view().is_refreshing());
    }

    #[test]
    fn indicator_height_sets_inset() {
        let (surface, coordinator, delegate) = setup(true);
        coordinator.set_indicator_rows(3);
        coordinator.load(|_| {});
        delegate.finish(Ok(true));
        assert_eq!(surface.view().bottom_inset(), 3);
        assert_eq!(surface.view().max_offset(), 23);
    }
}

//! The scrollable area the pagination logic observes.
//!
//! A [`ScrollView`] tracks geometry (offset, content and viewport extents,
//! bottom inset), the current gesture phase, an optional refresh control,
//! one inserted indicator subview and a list of position listeners.
//!
//! The view is shared through a [`SurfaceHandle`] (`Rc<RefCell<_>>`).  All
//! operations that notify listeners live on the handle so the internal
//! borrow is released before any listener runs; listeners are free to
//! mutate the surface again.
//!
//! Geometry is measured in terminal rows.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

/// What is currently moving the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    /// Programmatic changes, or no gesture in progress.
    #[default]
    Idle,
    /// The user is actively scrolling (keys, drag).
    Dragging,
    /// Momentum left over from a user gesture is playing out.
    Decelerating,
}

impl ScrollPhase {
    /// `true` for phases caused by the user rather than by the program.
    pub fn is_user_driven(self) -> bool {
        matches!(self, ScrollPhase::Dragging | ScrollPhase::Decelerating)
    }
}

/// Snapshot delivered to position listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub content_extent: usize,
    pub viewport_extent: usize,
    pub phase: ScrollPhase,
}

impl Position {
    /// The last viewport's worth of content is on screen.
    pub fn is_near_bottom(&self) -> bool {
        self.offset >= self.content_extent.saturating_sub(self.viewport_extent)
    }
}

/// Frame of a subview inserted below the content (e.g. a loading spinner).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorFrame {
    /// First row of the frame, in content coordinates.
    pub origin: usize,
    pub height: usize,
}

pub type SubscriptionId = u64;

type Listener = Rc<dyn Fn(Position)>;
type RefreshHandler = Rc<dyn Fn()>;

struct RefreshControl {
    handler: RefreshHandler,
    refreshing: bool,
}

/// Plain state of a scrollable area.
pub struct ScrollView {
    offset: usize,
    content_extent: usize,
    viewport_extent: usize,
    bottom_inset: usize,
    phase: ScrollPhase,
    /// Upward overscroll accumulated while resting at offset 0.
    pull_distance: usize,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
    refresh_control: Option<RefreshControl>,
    indicator: Option<IndicatorFrame>,
}

impl ScrollView {
    pub fn new(viewport_extent: usize) -> Self {
        Self {
            offset: 0,
            content_extent: 0,
            viewport_extent,
            bottom_inset: 0,
            phase: ScrollPhase::Idle,
            pull_distance: 0,
            listeners: Vec::new(),
            next_subscription: 1,
            refresh_control: None,
            indicator: None,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn content_extent(&self) -> usize {
        self.content_extent
    }

    pub fn viewport_extent(&self) -> usize {
        self.viewport_extent
    }

    pub fn bottom_inset(&self) -> usize {
        self.bottom_inset
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn pull_distance(&self) -> usize {
        self.pull_distance
    }

    /// Largest reachable offset; the bottom inset extends the scrollable range.
    pub fn max_offset(&self) -> usize {
        (self.content_extent + self.bottom_inset).saturating_sub(self.viewport_extent)
    }

    pub fn position(&self) -> Position {
        Position {
            offset: self.offset,
            content_extent: self.content_extent,
            viewport_extent: self.viewport_extent,
            phase: self.phase,
        }
    }

    /// Finish the current gesture.  Does not notify listeners.
    pub fn end_gesture(&mut self) {
        self.phase = ScrollPhase::Idle;
    }

    pub fn set_bottom_inset(&mut self, inset: usize) {
        self.bottom_inset = inset;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Register a position listener.  It runs after every offset or extent
    /// change until unsubscribed.
    pub fn subscribe(&mut self, listener: impl Fn(Position) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener.  Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Install the pull-to-refresh control with its value-changed handler.
    /// Returns `false` and leaves the existing control alone if one is
    /// already attached.
    pub fn attach_refresh_control(&mut self, handler: impl Fn() + 'static) -> bool {
        if self.refresh_control.is_some() {
            return false;
        }
        self.refresh_control = Some(RefreshControl {
            handler: Rc::new(handler),
            refreshing: false,
        });
        true
    }

    /// Remove the refresh control together with its handler.
    pub fn detach_refresh_control(&mut self) -> bool {
        self.pull_distance = 0;
        self.refresh_control.take().is_some()
    }

    pub fn has_refresh_control(&self) -> bool {
        self.refresh_control.is_some()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_control.as_ref().is_some_and(|c| c.refreshing)
    }

    /// Dismiss the refresh affordance.  No-op without a control.
    pub fn end_refreshing(&mut self) {
        if let Some(control) = self.refresh_control.as_mut() {
            control.refreshing = false;
        }
    }

    pub fn insert_indicator(&mut self, frame: IndicatorFrame) {
        self.indicator = Some(frame);
    }

    pub fn remove_indicator(&mut self) -> Option<IndicatorFrame> {
        self.indicator.take()
    }

    pub fn indicator(&self) -> Option<IndicatorFrame> {
        self.indicator
    }

    fn snapshot_listeners(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
    }
}

/// Owning, cloneable handle to a [`ScrollView`] held by the host UI.
#[derive(Clone)]
pub struct SurfaceHandle {
    inner: Rc<RefCell<ScrollView>>,
}

/// Non-owning reference to a surface; see [`SurfaceHandle::downgrade`].
#[derive(Clone)]
pub struct WeakSurface {
    inner: Weak<RefCell<ScrollView>>,
}

impl WeakSurface {
    pub fn upgrade(&self) -> Option<SurfaceHandle> {
        self.inner.upgrade().map(|inner| SurfaceHandle { inner })
    }
}

impl SurfaceHandle {
    pub fn new(viewport_extent: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ScrollView::new(viewport_extent))),
        }
    }

    pub fn downgrade(&self) -> WeakSurface {
        WeakSurface {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Borrow the view.  Do not hold the guard across calls that notify.
    pub fn view(&self) -> Ref<'_, ScrollView> {
        self.inner.borrow()
    }

    pub fn view_mut(&self) -> RefMut<'_, ScrollView> {
        self.inner.borrow_mut()
    }

    /// Move to `offset` (clamped) and notify listeners, even when the
    /// clamped offset did not change.
    pub fn scroll_to(&self, offset: usize, phase: ScrollPhase) {
        {
            let mut view = self.inner.borrow_mut();
            view.phase = phase;
            view.offset = offset.min(view.max_offset());
            if view.offset > 0 {
                view.pull_distance = 0;
            }
        }
        self.notify();
    }

    /// Relative scroll; negative deltas move towards the top.
    pub fn scroll_by(&self, delta: isize, phase: ScrollPhase) {
        let current = self.inner.borrow().offset;
        self.scroll_to(current.saturating_add_signed(delta), phase);
    }

    /// Programmatic content change (new page, reload).
    pub fn set_content_extent(&self, extent: usize) {
        {
            let mut view = self.inner.borrow_mut();
            view.content_extent = extent;
            view.phase = ScrollPhase::Idle;
            view.offset = view.offset.min(view.max_offset());
        }
        self.notify();
    }

    /// The host area was resized.
    pub fn set_viewport_extent(&self, extent: usize) {
        {
            let mut view = self.inner.borrow_mut();
            if view.viewport_extent == extent {
                return;
            }
            view.viewport_extent = extent;
            view.phase = ScrollPhase::Idle;
            view.offset = view.offset.min(view.max_offset());
        }
        self.notify();
    }

    /// User pull gesture on the refresh control.  Fires the handler once
    /// and marks the control refreshing; returns whether it fired.
    pub fn pull_to_refresh(&self) -> bool {
        let handler = {
            let mut view = self.inner.borrow_mut();
            view.pull_distance = 0;
            match view.refresh_control.as_mut() {
                Some(control) if !control.refreshing => {
                    control.refreshing = true;
                    Rc::clone(&control.handler)
                }
                _ => return false,
            }
        };
        handler();
        true
    }

    /// Upward overscroll of `rows` past the top.  Only counts while the
    /// surface rests at offset 0 with a refresh control attached; crossing
    /// `threshold` turns into [`Self::pull_to_refresh`].
    pub fn overscroll(&self, rows: usize, threshold: usize) -> bool {
        {
            let mut view = self.inner.borrow_mut();
            if view.offset > 0 || view.refresh_control.is_none() || view.is_refreshing() {
                view.pull_distance = 0;
                return false;
            }
            view.pull_distance += rows;
            if view.pull_distance < threshold.max(1) {
                return false;
            }
        }
        self.pull_to_refresh()
    }

    fn notify(&self) {
        let (position, listeners) = {
            let view = self.inner.borrow();
            (view.position(), view.snapshot_listeners())
        };
        for listener in listeners {
            listener(position);
        }
    }
}

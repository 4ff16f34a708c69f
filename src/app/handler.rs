//! Input handling — maps key/mouse events to gestures on the surface.
//!
//! Key presses are discrete drags: the surface is `Dragging` for the one
//! scroll step and back to `Idle` afterwards.  Wheel events feed the
//! momentum animator and [`on_tick`] plays it out as `Decelerating`
//! scroll steps.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use tracing::{debug, warn};

use crate::config::Action;
use crate::core::surface::ScrollPhase;

use super::state::AppState;

/// Rows of velocity injected per wheel notch.
const WHEEL_ROWS: f64 = 2.0;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollDown => drag(state, 1),
        Action::ScrollUp => drag(state, -1),
        Action::PageDown => {
            let page = state.surface.view().viewport_extent().max(1) as isize;
            drag(state, page);
        }
        Action::PageUp => {
            let page = state.surface.view().viewport_extent().max(1) as isize;
            drag(state, -page);
        }
        Action::JumpTop => {
            state.momentum.stop();
            state.surface.scroll_to(0, ScrollPhase::Dragging);
            state.surface.view_mut().end_gesture();
        }
        Action::Refresh => refresh(state),
        Action::TogglePullToRefresh => toggle_pull_to_refresh(state),
    }
}

/// Process a mouse event.  Only the wheel is used.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => state.momentum.fling(WHEEL_ROWS),
        MouseEventKind::ScrollUp => {
            if state.surface.view().offset() == 0 {
                state.momentum.stop();
                state.surface.overscroll(1, state.config.pull_threshold);
            } else {
                state.momentum.fling(-WHEEL_ROWS);
            }
        }
        _ => {}
    }
}

/// Advance one frame: spinners and momentum.
pub fn on_tick(state: &mut AppState) {
    state.tick = state.tick.wrapping_add(1);

    let rows = state.momentum.tick();
    if rows != 0 {
        let before = state.surface.view().offset();
        state.surface.scroll_by(rows, ScrollPhase::Decelerating);
        if state.surface.view().offset() == before {
            // Hit an edge.
            state.momentum.stop();
        }
    }
    if !state.momentum.is_animating() && state.surface.view().phase() == ScrollPhase::Decelerating {
        state.surface.view_mut().end_gesture();
    }
}

fn drag(state: &mut AppState, rows: isize) {
    state.momentum.stop();
    state.status_message = None;
    if rows < 0 && state.surface.view().offset() == 0 {
        state
            .surface
            .overscroll(rows.unsigned_abs(), state.config.pull_threshold);
        return;
    }
    state.surface.scroll_by(rows, ScrollPhase::Dragging);
    state.surface.view_mut().end_gesture();
}

/// With pull-to-refresh on, act like a completed pull so the refresh
/// badge shows; otherwise refresh programmatically.
fn refresh(state: &mut AppState) {
    if state.coordinator.pull_to_refresh_enabled() {
        state.surface.pull_to_refresh();
    } else {
        state
            .coordinator
            .load(|outcome| debug!(?outcome, "manual refresh finished"));
    }
}

fn toggle_pull_to_refresh(state: &mut AppState) {
    let enabled = !state.coordinator.pull_to_refresh_enabled();
    state.coordinator.set_pull_to_refresh(enabled);
    state.config.pull_to_refresh = enabled;
    if let Some(path) = &state.config_path {
        if let Err(err) = state.config.save_to(path) {
            warn!(error = %err, "could not save config");
        }
    }
    state.status_message = Some(format!(
        "Pull-to-refresh {}",
        if enabled { "on" } else { "off" }
    ));
}

//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  The
//! same channel carries wake-ups from finished fetches.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
    /// A refresh or load-more request has completed.
    FetchSettled,
}

/// Spawns a blocking reader that polls the terminal and forwards events.
///
/// Returns a sender for other producers (fetch tasks) alongside the
/// receiver.
pub fn spawn_event_reader(
    tick_rate: Duration,
) -> (mpsc::UnboundedSender<AppEvent>, mpsc::UnboundedReceiver<AppEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let reader_tx = tx.clone();

    tokio::task::spawn_blocking(move || loop {
        // Poll with the tick rate so Tick events keep flowing while idle;
        // momentum scrolling advances on them.
        let has_event = event::poll(tick_rate).unwrap_or(false);
        let app_event = if has_event {
            match event::read() {
                Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                _ => continue,
            }
        } else {
            AppEvent::Tick
        };
        if reader_tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    (tx, rx)
}

//! A scrollable feed TUI with pull-to-refresh and automatic load-more.
//!
//! Run the binary to browse a synthetic paged feed.  Scroll up past the top
//! (or press the refresh key) to reload; scroll to the bottom to fetch the
//! next page.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders},
    Terminal,
};
use tracing::{info, warn};

use feed_pager::app::{
    event::{spawn_event_reader, AppEvent},
    feed_runtime::FeedDelegate,
    handler,
    state::AppState,
};
use feed_pager::config;
use feed_pager::core::{
    feed::{FeedSource, FeedStore},
    pagination::PaginationCoordinator,
    surface::SurfaceHandle,
};
use feed_pager::ui::{
    feed_widget::FeedWidget,
    layout::AppLayout,
    spinner::{RefreshBadge, RefreshIndicator},
    status::StatusBar,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Paged feed with pull-to-refresh")]
struct Cli {
    /// Items per page.
    #[arg(long, default_value_t = 25)]
    page_size: usize,

    /// Number of pages before the feed runs out.
    #[arg(long, default_value_t = 6)]
    pages: usize,

    /// Simulated fetch latency (overrides the config file).
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Fail every n-th fetch (0 = never).
    #[arg(long, default_value_t = 0)]
    fail_every: usize,

    /// Start with pull-to-refresh disabled.
    #[arg(long)]
    no_pull_to_refresh: bool,

    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Frame / momentum tick.
const TICK_RATE: Duration = Duration::from_millis(60);

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to a file when asked.  Stderr is the TUI backend, so it only
    // gets a subscriber when RUST_LOG is set explicitly.
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match &cli.log_file {
        Some(path) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(path)?))
            .init(),
        None if log_to_stderr(std::env::var_os("RUST_LOG")) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init(),
        None => {}
    }

    // Fetch tasks hold `Rc` state, so everything runs on this thread.
    let local = tokio::task::LocalSet::new();
    local.run_until(run(cli)).await
}

/// An unset or empty `RUST_LOG` keeps stderr free for the TUI.
fn log_to_stderr(rust_log: Option<OsString>) -> bool {
    rust_log.is_some_and(|value| !value.is_empty())
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = config::default_path();
    let mut user_config = config::AppConfig::load_from(&config_path);
    if let Some(ms) = cli.latency_ms {
        user_config.latency_ms = ms;
    }
    if cli.no_pull_to_refresh {
        user_config.pull_to_refresh = false;
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── surface, feed and coordinator ─────────────────────────
    let (events_tx, mut events) = spawn_event_reader(TICK_RATE);

    let size = terminal.size()?;
    let layout = AppLayout::from_area(ratatui::layout::Rect::new(0, 0, size.width, size.height));
    let surface = SurfaceHandle::new(layout.viewport_rows());
    let store = Rc::new(RefCell::new(FeedStore::default()));

    let coordinator = PaginationCoordinator::new(&surface, user_config.pull_to_refresh);
    coordinator.set_indicator_rows(user_config.indicator_rows);
    let source = FeedSource::new(cli.page_size, cli.pages).with_fail_every(cli.fail_every);
    let delegate = FeedDelegate::new(
        source,
        Rc::clone(&store),
        &surface,
        Duration::from_millis(user_config.latency_ms),
    )
    .with_waker(events_tx);
    coordinator.set_delegate(Rc::new(delegate));

    let mut state = AppState::new(surface, coordinator, store, user_config);
    state.config_path = Some(config_path);

    state.coordinator.load(|outcome| match outcome {
        Ok(has_more) => info!(has_more, "initial load finished"),
        Err(err) => warn!(error = %err, "initial load failed"),
    });

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());
            // May clamp the offset; listeners see it as a programmatic change.
            state.surface.set_viewport_extent(layout.viewport_rows());

            let store = state.store.borrow();
            let view = state.surface.view();

            let block = Block::default()
                .title(format!(" {} ", env!("CARGO_PKG_NAME")))
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());

            let feed = FeedWidget::new(&store.items, view.offset())
                .indicator(view.indicator())
                .end_of_feed(!state.coordinator.has_more_data())
                .tick(state.tick)
                .block(block);
            frame.render_widget(feed, layout.feed_area);

            let badge = if view.is_refreshing() {
                RefreshBadge::Refreshing
            } else if view.pull_distance() > 0 {
                RefreshBadge::Pulling {
                    pulled: view.pull_distance(),
                    threshold: state.config.pull_threshold,
                }
            } else {
                RefreshBadge::Hidden
            };
            frame.render_widget(
                RefreshIndicator {
                    badge,
                    tick: state.tick,
                },
                layout.feed_area,
            );

            let last_error = state.coordinator.last_error();
            let hint = state.config.status_bar_hint();
            let status = StatusBar {
                items: store.len(),
                state: state.coordinator.state(),
                has_more: state.coordinator.has_more_data(),
                pull_to_refresh: state.coordinator.pull_to_refresh_enabled(),
                last_refreshed_at: state.coordinator.last_refreshed_at(),
                last_error: last_error.as_ref(),
                message: state.status_message.as_deref(),
                hint: &hint,
            };
            frame.render_widget(status, layout.status_area);
        })?;

        let Some(event) = events.recv().await else {
            break;
        };
        match event {
            AppEvent::Key(k) => handler::handle_key(&mut state, k),
            AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
            AppEvent::Tick => handler::on_tick(&mut state),
            AppEvent::Resize(_, _) | AppEvent::FetchSettled => {}
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}

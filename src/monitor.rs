//! Page-change monitor.
//!
//! [`start`] spawns one tokio task that re-checks the page on a polling
//! interval and after scrolling settles. A check compares the page's URL
//! with the last one seen; only a change produces a fresh [`PageContext`]
//! for the callback. Scrolling alone never does.
//!
//! ```text
//!   start() ──▶ ACTIVE ──stop() / drop──▶ INACTIVE
//!                 │
//!      tick ──────┤
//!      scroll ─▶ debounce ─▶ check(url changed?) ─▶ extract ─▶ callback
//! ```
//!
//! Ticks and debounced checks are serialised by a single `select!` loop,
//! so the last-seen URL is owned by the task and checks never overlap.
//! The callback runs under the handle's state lock, so once
//! [`MonitorHandle::stop`] returns no callback is running or will run.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use page_context_core::compose::ContextExtractor;
use page_context_core::models::PageContext;
use page_context_core::source::PageSource;
use tokio::sync::{mpsc, Notify};
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::MonitorConfig;

/// Shortest polling interval; a zero interval is raised to this.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Timing for a monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorOptions {
    /// Polling interval. The first check happens one interval after start.
    /// Clamped to at least 1 ms.
    pub interval: Duration,
    /// Quiet period after the last scroll before checking.
    pub scroll_debounce: Duration,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(5000),
            scroll_debounce: Duration::from_millis(1000),
        }
    }
}

impl From<&MonitorConfig> for MonitorOptions {
    fn from(cfg: &MonitorConfig) -> Self {
        Self {
            interval: cfg.interval(),
            scroll_debounce: cfg.scroll_debounce(),
        }
    }
}

/// Handle to a running monitor. Dropping it stops the monitor.
pub struct MonitorHandle {
    active: Arc<Mutex<bool>>,
    shutdown: Arc<Notify>,
    scroll_tx: mpsc::UnboundedSender<()>,
}

impl MonitorHandle {
    /// Dispatch a scroll event. No-op once stopped.
    pub fn notify_scroll(&self) {
        if self.is_active() {
            let _ = self.scroll_tx.send(());
        }
    }

    pub fn is_active(&self) -> bool {
        *lock(&self.active)
    }

    /// Unregister the timer and scroll listener. Safe to call repeatedly.
    ///
    /// Waits for a callback already in progress. Must not be called from
    /// inside the callback.
    pub fn stop(&self) {
        let mut active = lock(&self.active);
        if *active {
            *active = false;
            self.shutdown.notify_one();
            tracing::debug!("page monitor stopped");
        }
    }
}

fn lock(state: &Mutex<bool>) -> MutexGuard<'_, bool> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start monitoring `page`. Must be called within a tokio runtime.
///
/// The URL at the time of the call is the baseline, so the callback first
/// fires on the first navigation after `start`.
pub fn start<F>(
    page: Arc<dyn PageSource>,
    extractor: Arc<ContextExtractor>,
    options: MonitorOptions,
    mut callback: F,
) -> MonitorHandle
where
    F: FnMut(PageContext) + Send + 'static,
{
    let active = Arc::new(Mutex::new(true));
    let shutdown = Arc::new(Notify::new());
    let (scroll_tx, mut scroll_rx) = mpsc::unbounded_channel::<()>();

    let task_active = active.clone();
    let task_shutdown = shutdown.clone();
    let mut last_url = page.url();
    let interval = options.interval.max(MIN_INTERVAL);
    tracing::debug!(url = %last_url, ?interval, "page monitor started");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let debounce = tokio::time::sleep(options.scroll_debounce);
        tokio::pin!(debounce);
        let mut debounce_armed = false;

        loop {
            let should_check = tokio::select! {
                _ = task_shutdown.notified() => break,
                _ = ticker.tick() => true,
                Some(()) = scroll_rx.recv() => {
                    debounce.as_mut().reset(Instant::now() + options.scroll_debounce);
                    debounce_armed = true;
                    false
                }
                () = &mut debounce, if debounce_armed => {
                    debounce_armed = false;
                    true
                }
            };

            if !should_check || !*lock(&task_active) {
                continue;
            }

            let url = page.url();
            if url == last_url {
                continue;
            }
            tracing::debug!(from = %last_url, to = %url, "page URL changed");
            last_url = url;
            let context = extractor.extract(page.as_ref());
            let delivered = {
                let active = lock(&task_active);
                if *active {
                    callback(context);
                }
                *active
            };
            if !delivered {
                break;
            }
        }
    });

    MonitorHandle {
        active,
        shutdown,
        scroll_tx,
    }
}

//! Search limits and cancellation.
//!
//! A [`SearchControl`] is a cheap clonable stop flag with an optional time
//! budget. Whoever started a search keeps a clone and may call
//! [`SearchControl::stop`] to make it return with the best line found so far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Search limits that control when the engine should stop searching.
///
/// The depth bound is always honoured; the time limit and stop flag end the
/// search early with the best result found so far.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum search depth in plies (half-moves)
    pub depth: u8,
    /// Shared stop flag and clock
    pub control: SearchControl,
}

impl SearchLimits {
    /// Create limits with only a depth constraint (no time limit).
    pub fn depth(depth: u8) -> Self {
        Self {
            depth,
            control: SearchControl::new(None),
        }
    }

    /// Create limits with both depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth,
            control: SearchControl::new(Some(move_time)),
        }
    }

    /// Depth limit driven by an externally owned control.
    pub fn with_control(depth: u8, control: SearchControl) -> Self {
        Self { depth, control }
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.control.is_stopped()
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Thread-safe stop flag plus optional time budget.
#[derive(Debug, Clone)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start_time: Arc<Mutex<Option<Instant>>>,
    time_limit: Option<Duration>,
    /// How often to look at the clock, in nodes.
    check_interval: u64,
}

impl SearchControl {
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            stopped: Arc::new(AtomicBool::new(false)),
            start_time: Arc::new(Mutex::new(None)),
            time_limit,
            check_interval: 1024,
        }
    }

    /// Start the clock. A control that was already stopped stays stopped, so
    /// a cancellation issued before the search began is not lost.
    pub fn start(&self) {
        if let Ok(mut start) = self.start_time.lock() {
            *start = Some(Instant::now());
        }
    }

    /// Force stop the search immediately.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Check the clock and latch the stop flag once time is up.
    pub fn check_time(&self) -> bool {
        if self.is_stopped() {
            return true;
        }
        if let Some(limit) = self.time_limit {
            if self.elapsed() >= limit {
                self.stop();
                return true;
            }
        }
        false
    }

    /// True every `check_interval` nodes.
    #[inline]
    pub fn should_check_time(&self, nodes: u64) -> bool {
        nodes % self.check_interval == 0
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time
            .lock()
            .ok()
            .and_then(|start| start.as_ref().map(Instant::elapsed))
            .unwrap_or(Duration::ZERO)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

impl Default for SearchControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "limits_tests.rs"]
mod limits_tests;

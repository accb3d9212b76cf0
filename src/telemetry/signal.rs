//! Edge signal relay — interrupt context to task context.
//!
//! A paddle press fires a GPIO interrupt. The handler must be O(1) and
//! non-blocking, so all it does is one lock-free [`EdgeSignal::raise`];
//! the paddle task consumes the signal with a bounded polling wait and
//! handles debouncing itself. The signal carries no payload beyond
//! "occurred" and is not queued: repeated raises before consumption
//! collapse into one.

use core::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Granularity of the timed wait loop.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Binary, non-queued notification raised from ISR context.
pub struct EdgeSignal {
    raised: AtomicBool,
}

impl EdgeSignal {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// Raise the signal. Safe in interrupt context: a single atomic store,
    /// no locks, no allocation, returns immediately.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Consume a pending raise, if any.
    pub fn clear(&self) {
        self.raised.store(false, Ordering::Release);
    }

    /// Consume the signal if raised, without waiting.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::Acquire)
    }

    /// Wait up to `timeout` for a raise, consuming it.
    /// Timeout is the normal idle condition, not an error to escalate.
    pub fn wait(&self, timeout: Duration) -> Result<()> {
        match Self::wait_any(&[self], timeout) {
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Wait up to `timeout` on a set of signals, waking on the first raise.
    /// Returns the index of the signal that fired, consuming only that one.
    ///
    /// Waiting on the set in one call (rather than each signal for its
    /// full timeout in turn) keeps worst-case detection latency at the
    /// poll interval instead of the whole timeout.
    pub fn wait_any(signals: &[&EdgeSignal], timeout: Duration) -> Result<usize> {
        let deadline = Instant::now() + timeout;
        loop {
            for (index, signal) in signals.iter().enumerate() {
                if signal.take() {
                    return Ok(index);
                }
            }
            if Instant::now() >= deadline {
                return Err(Error::SignalTimeout);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

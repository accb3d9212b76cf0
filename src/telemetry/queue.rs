//! Event multiplexing queue.
//!
//! A bounded `embassy-sync` channel carrying [`SensorEvent`]s from every
//! producer task to the single frame-writer task. Capacity is small on
//! purpose: backpressure, not buffering, is the intended behaviour under
//! overload — a full queue drops the submitting producer's sample and the
//! next sampling cycle supersedes it (most-recent-value semantics).
//!
//! The queue is an explicitly constructed object passed by reference into
//! each task's entry point; there are no process-wide mutable handles.
//! Timed operations poll the channel's lock-free `try_send`/`try_receive`
//! at millisecond granularity, each miss yielding to the scheduler via a
//! timed sleep.

use std::thread;
use std::time::{Duration, Instant};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};

use crate::error::{Error, Result};
use crate::telemetry::event::SensorEvent;

/// Queue capacity in events. Small by design; see module docs.
pub const QUEUE_DEPTH: usize = 4;

/// Granularity of the timed-operation poll loop.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Bounded MPSC hand-off between producers and the frame writer.
pub struct EventQueue {
    inner: Channel<CriticalSectionRawMutex, SensorEvent, QUEUE_DEPTH>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            inner: Channel::new(),
        }
    }

    /// Attempt to enqueue `event`, waiting up to `timeout` for a free slot.
    ///
    /// On [`Error::QueueFull`] the caller must treat the event as dropped:
    /// no retry, no escalation. A zero timeout makes this a single
    /// non-blocking attempt.
    pub fn submit(&self, event: SensorEvent, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let mut event = event;
        loop {
            match self.inner.try_send(event) {
                Ok(()) => return Ok(()),
                Err(TrySendError::Full(rejected)) => event = rejected,
            }
            if Instant::now() >= deadline {
                return Err(Error::QueueFull);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Dequeue the oldest pending event, waiting up to `timeout`.
    ///
    /// FIFO across all producers: events from one producer keep their
    /// emission order; events from different producers interleave in
    /// arrival order. [`Error::ReceiveTimeout`] is the normal idle case.
    pub fn receive(&self, timeout: Duration) -> Result<SensorEvent> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(event) = self.inner.try_receive() {
                return Ok(event);
            }
            if Instant::now() >= deadline {
                return Err(Error::ReceiveTimeout);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

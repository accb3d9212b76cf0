//! Paddle shift producer — edge-driven, software debounced.
//!
//! The GPIO ISRs raise one [`EdgeSignal`] per paddle; this task waits on
//! both signals at once (wake on first) with a bounded timeout, emits a
//! button pulse for the paddle that fired, then sleeps a short dead time
//! and clears that paddle's signal. Contact bounce re-raises the signal
//! during the dead time; the clear absorbs it, so one mechanical press
//! yields one event. The opposite paddle's signal is left untouched and
//! picked up on the next loop iteration.

use std::thread;
use std::time::Duration;

use log::debug;

use crate::telemetry::event::{Channel, SensorEvent};
use crate::telemetry::queue::EventQueue;
use crate::telemetry::signal::EdgeSignal;

pub struct PaddleProducer {
    wait_timeout: Duration,
    dead_time: Duration,
    submit_timeout: Duration,
}

impl PaddleProducer {
    pub fn new(wait_timeout: Duration, dead_time: Duration, submit_timeout: Duration) -> Self {
        Self {
            wait_timeout,
            dead_time,
            submit_timeout,
        }
    }

    /// Wait one bounded round on both paddles. Returns the event for the
    /// paddle that fired together with its signal (for debouncing), or
    /// `None` on the idle timeout.
    pub fn poll<'s>(
        &self,
        upshift: &'s EdgeSignal,
        downshift: &'s EdgeSignal,
    ) -> Option<(SensorEvent, &'s EdgeSignal)> {
        match EdgeSignal::wait_any(&[upshift, downshift], self.wait_timeout) {
            Ok(0) => Some((SensorEvent::button_pulse(Channel::Upshift), upshift)),
            Ok(_) => Some((SensorEvent::button_pulse(Channel::Downshift), downshift)),
            Err(_) => None, // Idle; re-arm.
        }
    }

    /// Dead-time debounce: sleep, then swallow any bounce edges that
    /// re-raised the signal in the meantime.
    pub fn debounce(&self, fired: &EdgeSignal) {
        thread::sleep(self.dead_time);
        fired.clear();
    }

    /// Task entry point: wait, report, debounce, forever.
    pub fn run(self, upshift: &EdgeSignal, downshift: &EdgeSignal, queue: &EventQueue) -> ! {
        loop {
            let Some((event, fired)) = self.poll(upshift, downshift) else {
                continue;
            };
            if queue.submit(event, self.submit_timeout).is_err() {
                debug!("paddle: queue full, dropping {:?}", event.channel);
            }
            self.debounce(fired);
        }
    }
}

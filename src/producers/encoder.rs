//! Steering encoder producer — exact-change filter.
//!
//! Reports whenever the position or its first difference from the previous
//! sample differs from the last *reported* pair, preserving single-count
//! resolution for both position and velocity tracking. Anything coarser
//! would visibly quantise steering input.

use std::thread;
use std::time::Duration;

use log::debug;

use crate::ports::EncoderPort;
use crate::telemetry::event::{Channel, SensorEvent};
use crate::telemetry::queue::EventQueue;

pub struct EncoderProducer {
    period: Duration,
    submit_timeout: Duration,
    /// Previous raw sample, for the first difference. Starts at zero like
    /// the hardware counter.
    prev_position: i32,
    /// Last `(position, delta)` pair actually reported. `None` until the
    /// first sample so that cold start always reports.
    reported: Option<(i32, i32)>,
}

impl EncoderProducer {
    pub fn new(period: Duration, submit_timeout: Duration) -> Self {
        Self {
            period,
            submit_timeout,
            prev_position: 0,
            reported: None,
        }
    }

    /// One sampling cycle: read, filter, maybe produce an event.
    pub fn poll(&mut self, port: &mut impl EncoderPort) -> Option<SensorEvent> {
        let position = port.position();
        let delta = position - self.prev_position;
        self.prev_position = position;

        if self.reported == Some((position, delta)) {
            return None;
        }
        self.reported = Some((position, delta));

        // The wire value is i16; a wheel's usable range is a few thousand
        // counts, so clamping only guards against a runaway counter.
        let value = position.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
        Some(SensorEvent::new(Channel::Encoder, value))
    }

    /// Task entry point: sample forever at the configured period.
    pub fn run(mut self, mut port: impl EncoderPort, queue: &EventQueue) -> ! {
        loop {
            thread::sleep(self.period);
            if let Some(event) = self.poll(&mut port) {
                if queue.submit(event, self.submit_timeout).is_err() {
                    debug!("encoder: queue full, dropping sample");
                }
            }
        }
    }
}

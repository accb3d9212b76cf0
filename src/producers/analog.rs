//! Pedal potentiometer producer — tolerance-band filter.
//!
//! Each cycle averages a fixed number of consecutive raw ADC samples into
//! one debounced reading (knocks down high-frequency ADC noise), then
//! reports only when the reading moves more than the tolerance away from
//! the last reported value. The tolerance is a handful of counts out of
//! the 12-bit range: enough to silence wiper jitter, far below any
//! intentional pedal travel.

use std::thread;
use std::time::Duration;

use log::debug;

use crate::ports::AnalogPort;
use crate::telemetry::event::{AnalogInput, Channel, SensorEvent};
use crate::telemetry::queue::EventQueue;

pub struct AnalogProducer {
    input: AnalogInput,
    period: Duration,
    submit_timeout: Duration,
    avg_samples: u8,
    tolerance: u16,
    /// Last reported debounced reading. `None` until the first cycle so
    /// that cold start always reports.
    reported: Option<u16>,
}

impl AnalogProducer {
    pub fn new(
        input: AnalogInput,
        period: Duration,
        submit_timeout: Duration,
        avg_samples: u8,
        tolerance: u16,
    ) -> Self {
        Self {
            input,
            period,
            submit_timeout,
            avg_samples: avg_samples.max(1),
            tolerance,
            reported: None,
        }
    }

    /// Average `avg_samples` consecutive raw samples.
    fn debounced_read(&self, port: &mut impl AnalogPort) -> u16 {
        let mut sum: u32 = 0;
        for _ in 0..self.avg_samples {
            sum += u32::from(port.sample(self.input));
        }
        (sum / u32::from(self.avg_samples)) as u16
    }

    /// One sampling cycle: read, filter, maybe produce an event.
    pub fn poll(&mut self, port: &mut impl AnalogPort) -> Option<SensorEvent> {
        let reading = self.debounced_read(port);

        if let Some(last) = self.reported {
            if reading.abs_diff(last) <= self.tolerance {
                return None;
            }
        }
        self.reported = Some(reading);

        // Raw ADC range is 0..=4095, always positive in the signed field.
        Some(SensorEvent::new(Channel::Analog(self.input), reading as i16))
    }

    /// Task entry point: sample forever at the configured period.
    pub fn run(mut self, mut port: impl AnalogPort, queue: &EventQueue) -> ! {
        loop {
            thread::sleep(self.period);
            if let Some(event) = self.poll(&mut port) {
                if queue.submit(event, self.submit_timeout).is_err() {
                    debug!("{}: queue full, dropping sample", self.input.name());
                }
            }
        }
    }
}

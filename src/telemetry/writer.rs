//! Frame writer — the sole queue consumer.
//!
//! Drains the event queue one event at a time, serialises each into its
//! 4-byte frame, and writes it byte-by-byte to the serial capability.
//! Writes are unbuffered and blocking at the byte level; the underlying
//! UART may backpressure on a full transmit FIFO and that is accepted.
//! One queue event yields exactly one frame, written immediately upon
//! dequeue. No batching, no acknowledgment, no retransmission.

use std::time::Duration;

use log::trace;

use crate::ports::SerialPort;
use crate::telemetry::frame;
use crate::telemetry::queue::EventQueue;

pub struct FrameWriter<S: SerialPort> {
    serial: S,
    receive_timeout: Duration,
}

impl<S: SerialPort> FrameWriter<S> {
    pub fn new(serial: S, receive_timeout: Duration) -> Self {
        Self {
            serial,
            receive_timeout,
        }
    }

    /// One drain attempt: timed receive, then one frame on success.
    /// Returns whether a frame was written. A receive timeout just means
    /// no new data this cycle.
    pub fn pump(&mut self, queue: &EventQueue) -> bool {
        let Ok(event) = queue.receive(self.receive_timeout) else {
            return false;
        };
        trace!("frame: {:?} = {}", event.channel, event.value);
        for byte in frame::encode(&event) {
            self.serial.write_byte(byte);
        }
        true
    }

    /// Consume the queue forever. Runs on the main task after startup.
    pub fn run(mut self, queue: &EventQueue) -> ! {
        loop {
            self.pump(queue);
        }
    }
}

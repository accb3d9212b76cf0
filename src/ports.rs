//! Port traits — the boundary between the telemetry pipeline and hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Producer / FrameWriter (pipeline)
//! ```
//!
//! Driven adapters (PCNT encoder, ADC pedals, UART link) implement these
//! traits. The producers consume them via generics, so the pipeline never
//! touches a peripheral register directly and runs unmodified against mock
//! ports on the host.

use crate::telemetry::event::AnalogInput;

/// Cumulative position from the quadrature decode peripheral.
pub trait EncoderPort {
    fn position(&mut self) -> i32;
}

/// One raw ADC reading in `0..=4095`.
pub trait AnalogPort {
    fn sample(&mut self, input: AnalogInput) -> u16;
}

/// Blocking single-byte transmit on the host link.
///
/// May block on a full hardware transmit buffer; the frame writer accepts
/// that backpressure. There is no error return — the link is
/// fire-and-forget.
pub trait SerialPort {
    fn write_byte(&mut self, byte: u8);
}

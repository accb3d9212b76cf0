//! Sampling producers.
//!
//! Each producer runs as its own task: poll one sensor at a fixed cadence,
//! decide whether the reading is a reportable change, and submit a
//! [`SensorEvent`](crate::telemetry::event::SensorEvent) on change. Filter
//! state is exclusively owned by the producer's task — never shared, never
//! locked.
//!
//! Two filter policies:
//! - exact-change (encoder) — single-count fidelity for position and
//!   velocity, see [`EncoderProducer`];
//! - tolerance-band (pedals) — averaged reading plus minimum-change
//!   threshold, see [`AnalogProducer`].
//!
//! The paddle producer is edge-driven rather than periodic, consuming
//! [`EdgeSignal`](crate::telemetry::signal::EdgeSignal)s raised by the
//! GPIO ISRs; see [`PaddleProducer`].
//!
//! Submission is best-effort: a full queue drops the cycle's event and the
//! next cycle's reading supersedes it.

mod analog;
mod encoder;
mod paddle;

pub use analog::AnalogProducer;
pub use encoder::EncoderProducer;
pub use paddle::PaddleProducer;

//! The sensor-to-host telemetry pipeline.
//!
//! Producers (see [`crate::producers`]) push confirmed state changes into
//! the bounded [`EventQueue`](queue::EventQueue); the single
//! [`FrameWriter`](writer::FrameWriter) drains it and serialises each
//! event into a fixed 4-byte frame on the serial link.
//!
//! ```text
//! ┌───────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Producers │────▶│  EventQueue  │────▶│ FrameWriter  │──▶ UART
//! │ (tasks ×N)│     │ (bounded, 4) │     │ (sole reader)│
//! └───────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! The queue and the paddle [`EdgeSignal`](signal::EdgeSignal)s are the
//! only state shared between tasks. Both are constructed explicitly at
//! startup and passed by reference into each task's entry point.

pub mod event;
pub mod frame;
pub mod queue;
pub mod signal;
pub mod writer;

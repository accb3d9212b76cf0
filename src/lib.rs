//! SimWheel firmware library.
//!
//! Exposes the pure-logic telemetry pipeline for integration testing and
//! external inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.
//!
//! ```text
//! encoder ──▶ EncoderProducer ──┐
//! pots    ──▶ AnalogProducer ──▶│ EventQueue  ──▶ FrameWriter ──▶ UART
//! paddles ──▶ PaddleProducer ──┘  (bounded MPSC)
//!    ▲
//!    └─ GPIO ISR → EdgeSignal
//! ```

#![deny(unused_must_use)]

pub mod config;
pub mod pins;
pub mod ports;
pub mod producers;
pub mod telemetry;

mod error;

pub use error::{Error, Result};

// Re-export the ESP-IDF-only modules so the crate compiles on host; the
// actual implementations are guarded by cfg attributes inside.
pub mod adapters;
pub mod drivers;

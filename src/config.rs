//! System configuration parameters.
//!
//! All tunable parameters of the telemetry pipeline. Sampling cadences are
//! themselves noise-filtering parameters, so they are static configuration
//! rather than anything adaptive. There is no persistence — the firmware
//! always boots with [`SystemConfig::default`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Sampling cadence ---
    /// Encoder sampling period (milliseconds).
    pub encoder_period_ms: u32,
    /// Analog (pedal) sampling period (milliseconds).
    pub analog_period_ms: u32,

    // --- Analog filtering ---
    /// Consecutive ADC samples averaged into one debounced reading.
    pub analog_avg_samples: u8,
    /// Minimum change (raw counts out of 4095) before an analog reading
    /// is reported. Suppresses pot jitter, preserves pedal motion.
    pub analog_tolerance: u16,

    // --- Paddle shifters ---
    /// Bounded wait on the paddle edge signals (milliseconds).
    pub paddle_wait_ms: u32,
    /// Dead time after a reported press; edges raised within this window
    /// are absorbed as contact bounce (milliseconds).
    pub paddle_dead_time_ms: u32,

    // --- Queue timeouts ---
    /// Producer-side submit timeout (milliseconds). Short by design:
    /// on expiry the sample is dropped, not retried.
    pub submit_timeout_ms: u32,
    /// Frame-writer receive timeout (milliseconds).
    pub receive_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Sampling
            encoder_period_ms: 20,
            analog_period_ms: 30,

            // Analog filtering
            analog_avg_samples: 4,
            analog_tolerance: 5,

            // Paddles
            paddle_wait_ms: 500,
            paddle_dead_time_ms: 50,

            // Queue
            submit_timeout_ms: 5,
            receive_timeout_ms: 100,
        }
    }
}

impl SystemConfig {
    /// Reject values that would stall or spin the pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.encoder_period_ms == 0 || self.analog_period_ms == 0 {
            return Err(Error::Config("sampling period must be non-zero"));
        }
        if self.analog_avg_samples == 0 {
            return Err(Error::Config("analog averaging depth must be non-zero"));
        }
        if self.analog_tolerance >= 4096 {
            return Err(Error::Config("analog tolerance exceeds ADC range"));
        }
        if self.paddle_wait_ms == 0 {
            return Err(Error::Config("paddle wait timeout must be non-zero"));
        }
        Ok(())
    }

    pub fn encoder_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.encoder_period_ms))
    }

    pub fn analog_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.analog_period_ms))
    }

    pub fn paddle_wait(&self) -> Duration {
        Duration::from_millis(u64::from(self.paddle_wait_ms))
    }

    pub fn paddle_dead_time(&self) -> Duration {
        Duration::from_millis(u64::from(self.paddle_dead_time_ms))
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.submit_timeout_ms))
    }

    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.receive_timeout_ms))
    }
}

//! Hardware adapters implementing the port traits.
//!
//! ## Dual-target design
//!
//! On ESP-IDF each adapter is a thin shim over `hw_init`'s capability
//! functions. On host/test targets the encoder and ADC adapters read
//! injectable atomics (`sim_set_*`) so integration tests can drive the
//! real adapter types, and the UART adapter logs instead of transmitting.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI32, AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::ports::{AnalogPort, EncoderPort, SerialPort};
use crate::telemetry::event::AnalogInput;

#[cfg(not(target_os = "espidf"))]
static SIM_ENCODER_COUNT: AtomicI32 = AtomicI32::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_THROTTLE_ADC: AtomicU16 = AtomicU16::new(0);
#[cfg(not(target_os = "espidf"))]
static SIM_BRAKE_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_encoder_count(count: i32) {
    SIM_ENCODER_COUNT.store(count, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_analog(input: AnalogInput, raw: u16) {
    match input {
        AnalogInput::Throttle => SIM_THROTTLE_ADC.store(raw, Ordering::Relaxed),
        AnalogInput::Brake => SIM_BRAKE_ADC.store(raw, Ordering::Relaxed),
    }
}

// ── Encoder ───────────────────────────────────────────────────

/// Steering encoder via the PCNT quadrature decoder.
pub struct PcntEncoder;

impl PcntEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl EncoderPort for PcntEncoder {
    #[cfg(target_os = "espidf")]
    fn position(&mut self) -> i32 {
        hw_init::encoder_count()
    }

    #[cfg(not(target_os = "espidf"))]
    fn position(&mut self) -> i32 {
        SIM_ENCODER_COUNT.load(Ordering::Relaxed)
    }
}

// ── Pedals ────────────────────────────────────────────────────

/// Throttle/brake potentiometers via ADC1 oneshot reads.
pub struct AdcPedals;

impl AdcPedals {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "espidf")]
    fn channel(input: AnalogInput) -> u32 {
        match input {
            AnalogInput::Throttle => hw_init::ADC1_CH_THROTTLE,
            AnalogInput::Brake => hw_init::ADC1_CH_BRAKE,
        }
    }
}

impl AnalogPort for AdcPedals {
    #[cfg(target_os = "espidf")]
    fn sample(&mut self, input: AnalogInput) -> u16 {
        hw_init::adc1_read(Self::channel(input))
    }

    #[cfg(not(target_os = "espidf"))]
    fn sample(&mut self, input: AnalogInput) -> u16 {
        match input {
            AnalogInput::Throttle => SIM_THROTTLE_ADC.load(Ordering::Relaxed),
            AnalogInput::Brake => SIM_BRAKE_ADC.load(Ordering::Relaxed),
        }
    }
}

// ── Host link ─────────────────────────────────────────────────

/// UART1 frame output.
pub struct UartLink;

impl UartLink {
    pub fn new() -> Self {
        Self
    }
}

impl SerialPort for UartLink {
    #[cfg(target_os = "espidf")]
    fn write_byte(&mut self, byte: u8) {
        hw_init::uart_write_byte(byte);
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_byte(&mut self, byte: u8) {
        log::trace!("uart(sim): 0x{byte:02X}");
    }
}

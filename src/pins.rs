//! GPIO / peripheral pin assignments for the SimWheel controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Steering encoder (quadrature, decoded by the PCNT peripheral)
// ---------------------------------------------------------------------------

/// Encoder phase A.
pub const ENCODER_A_GPIO: i32 = 4;
/// Encoder phase B.
pub const ENCODER_B_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Pedals — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Throttle potentiometer wiper. ADC1 channel 5 (GPIO 6 on ESP32-S3).
pub const THROTTLE_ADC_GPIO: i32 = 6;
/// Brake potentiometer wiper. ADC1 channel 6 (GPIO 7 on ESP32-S3).
pub const BRAKE_ADC_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Paddle shifters (active-low momentary switches with pull-ups)
// ---------------------------------------------------------------------------

/// Right paddle — upshift. Falling edge on press.
pub const UPSHIFT_GPIO: i32 = 15;
/// Left paddle — downshift. Falling edge on press.
pub const DOWNSHIFT_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Host serial link (UART1)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
/// Host link baud rate. Must match the receiver.
pub const UART_BAUD: u32 = 115_200;

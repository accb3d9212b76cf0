//! Host-link frame codec.
//!
//! Wire format (4 bytes, host-facing, defines compatibility):
//! ```text
//! ┌──────────┬─────────────┬──────────┬───────────┐
//! │ 0xFF     │ channel tag │ value lo │ value hi  │
//! │ sentinel │ (0–4)       │ LE two's-complement  │
//! └──────────┴─────────────┴──────────┴───────────┘
//! ```
//!
//! No length prefix, checksum, or escaping. Frame boundaries rely on the
//! fixed 4-byte stride; after a dropped byte the receiver resynchronises
//! on the sentinel, which no channel tag collides with.

use core::fmt;

use super::event::{Channel, SensorEvent};

/// Frame-start sentinel.
pub const SENTINEL: u8 = 0xFF;

/// Fixed frame length.
pub const FRAME_LEN: usize = 4;

/// Decode failures. Encoding is infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// First byte was not the sentinel.
    BadSentinel(u8),
    /// Channel tag byte has no known channel.
    UnknownChannel(u8),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadSentinel(b) => write!(f, "bad frame sentinel 0x{b:02X}"),
            Self::UnknownChannel(t) => write!(f, "unknown channel tag {t}"),
        }
    }
}

/// Serialise one event into its wire frame.
pub fn encode(event: &SensorEvent) -> [u8; FRAME_LEN] {
    let value = event.value.to_le_bytes();
    [SENTINEL, event.channel.tag(), value[0], value[1]]
}

/// Reconstruct an event from one wire frame.
pub fn decode(bytes: &[u8; FRAME_LEN]) -> Result<SensorEvent, FrameError> {
    if bytes[0] != SENTINEL {
        return Err(FrameError::BadSentinel(bytes[0]));
    }
    let channel = Channel::from_tag(bytes[1]).ok_or(FrameError::UnknownChannel(bytes[1]))?;
    let value = i16::from_le_bytes([bytes[2], bytes[3]]);
    Ok(SensorEvent::new(channel, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::event::AnalogInput;

    #[test]
    fn throttle_minus_five_reference_vector() {
        let event = SensorEvent::new(Channel::Analog(AnalogInput::Throttle), -5);
        assert_eq!(encode(&event), [0xFF, 0x01, 0xFB, 0xFF]);
        assert_eq!(decode(&[0xFF, 0x01, 0xFB, 0xFF]), Ok(event));
    }

    #[test]
    fn encoder_frame_is_signed_little_endian() {
        let event = SensorEvent::new(Channel::Encoder, -600);
        let frame = encode(&event);
        assert_eq!(frame[0], SENTINEL);
        assert_eq!(frame[1], 0);
        assert_eq!(i16::from_le_bytes([frame[2], frame[3]]), -600);
    }

    #[test]
    fn bad_sentinel_rejected() {
        assert_eq!(
            decode(&[0x00, 0x01, 0x00, 0x00]),
            Err(FrameError::BadSentinel(0x00))
        );
    }

    #[test]
    fn unknown_tag_rejected() {
        assert_eq!(
            decode(&[0xFF, 0x09, 0x00, 0x00]),
            Err(FrameError::UnknownChannel(9))
        );
    }
}

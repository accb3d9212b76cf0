//! Typed telemetry events.
//!
//! [`SensorEvent`] is the unit of data flowing through the pipeline: built
//! by a producer the moment a change is confirmed, immutable once
//! enqueued, consumed and discarded by the frame writer. The channel is a
//! proper sum type so the frame writer gets compile-time exhaustiveness
//! over channel kinds instead of magic integer codes.

/// Analog input channels, in wire-tag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogInput {
    Throttle,
    Brake,
}

impl AnalogInput {
    /// All analog inputs, one producer each.
    pub const ALL: [AnalogInput; 2] = [AnalogInput::Throttle, AnalogInput::Brake];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Throttle => "throttle",
            Self::Brake => "brake",
        }
    }
}

/// Event source. The wire tag is the single byte the host dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Steering encoder — signed cumulative position.
    Encoder,
    /// Pedal potentiometer — raw debounced ADC reading.
    Analog(AnalogInput),
    /// Right paddle press pulse.
    Upshift,
    /// Left paddle press pulse.
    Downshift,
}

impl Channel {
    /// Wire tag. New channels extend from 5 upward; `0xFF` is reserved as
    /// the frame-start sentinel and must never become a tag.
    pub const fn tag(self) -> u8 {
        match self {
            Self::Encoder => 0,
            Self::Analog(AnalogInput::Throttle) => 1,
            Self::Analog(AnalogInput::Brake) => 2,
            Self::Upshift => 3,
            Self::Downshift => 4,
        }
    }

    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Encoder),
            1 => Some(Self::Analog(AnalogInput::Throttle)),
            2 => Some(Self::Analog(AnalogInput::Brake)),
            3 => Some(Self::Upshift),
            4 => Some(Self::Downshift),
            _ => None,
        }
    }
}

/// Value carried by button pulse events.
pub const BUTTON_PULSE: i16 = 1;

/// A confirmed state change on one input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorEvent {
    pub channel: Channel,
    pub value: i16,
}

impl SensorEvent {
    pub const fn new(channel: Channel, value: i16) -> Self {
        Self { channel, value }
    }

    /// Pulse event for a paddle press.
    pub const fn button_pulse(channel: Channel) -> Self {
        Self::new(channel, BUTTON_PULSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for tag in 0..=4 {
            let channel = Channel::from_tag(tag).unwrap();
            assert_eq!(channel.tag(), tag);
        }
    }

    #[test]
    fn unknown_tags_rejected() {
        assert_eq!(Channel::from_tag(5), None);
        assert_eq!(Channel::from_tag(0xFF), None);
    }

    #[test]
    fn no_tag_collides_with_sentinel() {
        let all = [
            Channel::Encoder,
            Channel::Analog(AnalogInput::Throttle),
            Channel::Analog(AnalogInput::Brake),
            Channel::Upshift,
            Channel::Downshift,
        ];
        for ch in all {
            assert_ne!(ch.tag(), 0xFF);
        }
    }

    #[test]
    fn button_pulse_value() {
        assert_eq!(SensorEvent::button_pulse(Channel::Upshift).value, 1);
    }
}

//! Property-based tests for the frame codec, the change filters and the
//! event queue. Host-only.

#![cfg(not(target_os = "espidf"))]

use std::time::Duration;

use proptest::prelude::*;

use simwheel::ports::{AnalogPort, EncoderPort};
use simwheel::producers::{AnalogProducer, EncoderProducer};
use simwheel::telemetry::event::{AnalogInput, Channel, SensorEvent};
use simwheel::telemetry::frame::{self, SENTINEL};
use simwheel::telemetry::queue::{EventQueue, QUEUE_DEPTH};

fn any_channel() -> impl Strategy<Value = Channel> {
    prop_oneof![
        Just(Channel::Encoder),
        Just(Channel::Analog(AnalogInput::Throttle)),
        Just(Channel::Analog(AnalogInput::Brake)),
        Just(Channel::Upshift),
        Just(Channel::Downshift),
    ]
}

struct ReplayEncoder(Vec<i32>, usize);

impl EncoderPort for ReplayEncoder {
    fn position(&mut self) -> i32 {
        let v = self.0[self.1];
        self.1 += 1;
        v
    }
}

struct ReplayAdc(Vec<u16>, usize);

impl AnalogPort for ReplayAdc {
    fn sample(&mut self, _input: AnalogInput) -> u16 {
        let v = self.0[self.1];
        self.1 += 1;
        v
    }
}

proptest! {
    // ── Frame codec ───────────────────────────────────────────

    #[test]
    fn frame_roundtrip_is_identity(channel in any_channel(), value in any::<i16>()) {
        let event = SensorEvent::new(channel, value);
        let bytes = frame::encode(&event);
        prop_assert_eq!(bytes[0], SENTINEL);
        prop_assert_eq!(frame::decode(&bytes).unwrap(), event);
    }

    #[test]
    fn decode_rejects_bad_sentinel(lead in 0u8..SENTINEL, rest in any::<[u8; 3]>()) {
        let bytes = [lead, rest[0], rest[1], rest[2]];
        prop_assert!(frame::decode(&bytes).is_err());
    }

    #[test]
    fn decode_rejects_unknown_tags(tag in 5u8.., value in any::<i16>()) {
        let value = value.to_le_bytes();
        prop_assert!(frame::decode(&[SENTINEL, tag, value[0], value[1]]).is_err());
    }

    // ── Exact-change filter ───────────────────────────────────

    // The producer must emit exactly when the (position, delta) pair
    // differs from the last emitted pair, with the first sample always
    // emitted.
    #[test]
    fn encoder_reports_match_pair_change_model(counts in prop::collection::vec(-500i32..500, 1..32)) {
        let mut producer = EncoderProducer::new(Duration::from_millis(20), Duration::ZERO);
        let mut port = ReplayEncoder(counts.clone(), 0);

        let mut prev = 0i32;
        let mut last_reported: Option<(i32, i32)> = None;
        for &count in &counts {
            let delta = count - prev;
            prev = count;
            let expect_report = last_reported != Some((count, delta));
            if expect_report {
                last_reported = Some((count, delta));
            }

            let got = producer.poll(&mut port);
            prop_assert_eq!(got.is_some(), expect_report);
            if let Some(event) = got {
                prop_assert_eq!(event.channel, Channel::Encoder);
                prop_assert_eq!(i32::from(event.value), count);
            }
        }
    }

    // ── Tolerance-band filter ─────────────────────────────────

    // After the always-reported first reading, a second reading goes out
    // iff its distance from the first is strictly greater than the
    // tolerance.
    #[test]
    fn analog_band_boundary_is_strict(
        first in 0u16..4096,
        second in 0u16..4096,
        tolerance in 0u16..64,
    ) {
        let mut producer = AnalogProducer::new(
            AnalogInput::Throttle,
            Duration::from_millis(30),
            Duration::ZERO,
            1,
            tolerance,
        );
        let mut port = ReplayAdc(vec![first, second], 0);

        prop_assert_eq!(producer.poll(&mut port).unwrap().value, first as i16);
        let got = producer.poll(&mut port);
        prop_assert_eq!(got.is_some(), second.abs_diff(first) > tolerance);
    }

    // ── Event queue ───────────────────────────────────────────

    #[test]
    fn queue_is_fifo_up_to_capacity(values in prop::collection::vec(any::<i16>(), 0..=QUEUE_DEPTH)) {
        let queue = EventQueue::new();
        for &v in &values {
            queue.submit(SensorEvent::new(Channel::Encoder, v), Duration::ZERO).unwrap();
        }
        for &v in &values {
            prop_assert_eq!(queue.receive(Duration::ZERO).unwrap().value, v);
        }
        prop_assert!(queue.receive(Duration::ZERO).is_err());
    }

    #[test]
    fn full_queue_rejects_without_corruption(extra in any::<i16>()) {
        let queue = EventQueue::new();
        for v in 0..QUEUE_DEPTH as i16 {
            queue.submit(SensorEvent::new(Channel::Encoder, v), Duration::ZERO).unwrap();
        }
        prop_assert!(queue.submit(SensorEvent::new(Channel::Encoder, extra), Duration::ZERO).is_err());
        for v in 0..QUEUE_DEPTH as i16 {
            prop_assert_eq!(queue.receive(Duration::ZERO).unwrap().value, v);
        }
    }
}

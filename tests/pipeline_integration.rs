//! Integration tests: producers → event queue → frame writer.
//!
//! Drives the pipeline end-to-end on the host, with scripted ports for
//! deterministic filter checks and real threads for the concurrency
//! contract.

#![cfg(not(target_os = "espidf"))]

use std::time::Duration;

use simwheel::adapters::hardware::{sim_set_encoder_count, PcntEncoder};
use simwheel::ports::{AnalogPort, EncoderPort, SerialPort};
use simwheel::producers::{AnalogProducer, EncoderProducer};
use simwheel::telemetry::event::{AnalogInput, Channel, SensorEvent};
use simwheel::telemetry::frame;
use simwheel::telemetry::queue::EventQueue;
use simwheel::telemetry::writer::FrameWriter;

// ── Mock implementations ──────────────────────────────────────

struct ScriptedEncoder(Vec<i32>, usize);

impl EncoderPort for ScriptedEncoder {
    fn position(&mut self) -> i32 {
        let v = self.0[self.1];
        self.1 += 1;
        v
    }
}

struct ScriptedAdc(Vec<u16>, usize);

impl AnalogPort for ScriptedAdc {
    fn sample(&mut self, _input: AnalogInput) -> u16 {
        let v = self.0[self.1];
        self.1 += 1;
        v
    }
}

#[derive(Default)]
struct CaptureSerial(Vec<u8>);

impl SerialPort for &mut CaptureSerial {
    fn write_byte(&mut self, byte: u8) {
        self.0.push(byte);
    }
}

fn decode_all(bytes: &[u8]) -> Vec<SensorEvent> {
    assert_eq!(bytes.len() % frame::FRAME_LEN, 0, "partial frame on wire");
    bytes
        .chunks_exact(frame::FRAME_LEN)
        .map(|c| frame::decode(c.try_into().unwrap()).expect("valid frame"))
        .collect()
}

// ── Encoder path ──────────────────────────────────────────────

#[test]
fn encoder_changes_stream_as_frames() {
    let queue = EventQueue::new();
    let mut port = ScriptedEncoder(vec![0, 0, 3, 3, 3], 0);
    let mut producer = EncoderProducer::new(Duration::from_millis(20), Duration::ZERO);

    for _ in 0..5 {
        if let Some(event) = producer.poll(&mut port) {
            queue.submit(event, Duration::ZERO).unwrap();
        }
    }

    let mut serial = CaptureSerial::default();
    let mut writer = FrameWriter::new(&mut serial, Duration::ZERO);
    while writer.pump(&queue) {}
    drop(writer);

    // Reported pairs: (0,0) cold start, (3,3) move, (3,0) stop.
    let events = decode_all(&serial.0);
    assert_eq!(
        events,
        vec![
            SensorEvent::new(Channel::Encoder, 0),
            SensorEvent::new(Channel::Encoder, 3),
            SensorEvent::new(Channel::Encoder, 3),
        ]
    );
}

#[test]
fn encoder_cold_start_through_sim_adapter() {
    sim_set_encoder_count(0);
    let mut producer = EncoderProducer::new(Duration::from_millis(20), Duration::ZERO);
    let event = producer
        .poll(&mut PcntEncoder::new())
        .expect("first sample always reported");
    assert_eq!(event, SensorEvent::new(Channel::Encoder, 0));
}

// ── Analog path ───────────────────────────────────────────────

#[test]
fn pedal_jitter_stays_off_the_wire() {
    let queue = EventQueue::new();
    // Four cycles of two averaged samples each: 2000, then jitter within
    // the band, then a real press to 2400.
    let mut port = ScriptedAdc(vec![2000, 2000, 2002, 2001, 1999, 2000, 2400, 2400], 0);
    let mut producer = AnalogProducer::new(
        AnalogInput::Brake,
        Duration::from_millis(30),
        Duration::ZERO,
        2,
        5,
    );

    for _ in 0..4 {
        if let Some(event) = producer.poll(&mut port) {
            queue.submit(event, Duration::ZERO).unwrap();
        }
    }

    let mut serial = CaptureSerial::default();
    let mut writer = FrameWriter::new(&mut serial, Duration::ZERO);
    while writer.pump(&queue) {}
    drop(writer);

    let events = decode_all(&serial.0);
    assert_eq!(
        events,
        vec![
            SensorEvent::new(Channel::Analog(AnalogInput::Brake), 2000),
            SensorEvent::new(Channel::Analog(AnalogInput::Brake), 2400),
        ]
    );
}

// ── Concurrency contract ──────────────────────────────────────

#[test]
fn per_producer_order_survives_interleaving() {
    let queue = EventQueue::new();
    const EVENTS_PER_PRODUCER: i16 = 10;

    std::thread::scope(|s| {
        s.spawn(|| {
            for v in 0..EVENTS_PER_PRODUCER {
                queue
                    .submit(
                        SensorEvent::new(Channel::Encoder, v),
                        Duration::from_secs(1),
                    )
                    .expect("consumer is draining");
                std::thread::sleep(Duration::from_millis(1));
            }
        });
        s.spawn(|| {
            for v in 0..EVENTS_PER_PRODUCER {
                queue
                    .submit(
                        SensorEvent::new(Channel::Analog(AnalogInput::Throttle), 100 + v),
                        Duration::from_secs(1),
                    )
                    .expect("consumer is draining");
                std::thread::sleep(Duration::from_millis(1));
            }
        });

        let mut serial = CaptureSerial::default();
        let mut writer = FrameWriter::new(&mut serial, Duration::from_millis(50));
        let mut frames = 0;
        while frames < 2 * EVENTS_PER_PRODUCER as usize {
            if writer.pump(&queue) {
                frames += 1;
            }
        }
        drop(writer);

        let events = decode_all(&serial.0);
        let encoder_values: Vec<i16> = events
            .iter()
            .filter(|e| e.channel == Channel::Encoder)
            .map(|e| e.value)
            .collect();
        let throttle_values: Vec<i16> = events
            .iter()
            .filter(|e| e.channel == Channel::Analog(AnalogInput::Throttle))
            .map(|e| e.value)
            .collect();

        // FIFO per producer, regardless of interleaving.
        assert_eq!(encoder_values, (0..EVENTS_PER_PRODUCER).collect::<Vec<_>>());
        assert_eq!(
            throttle_values,
            (100..100 + EVENTS_PER_PRODUCER).collect::<Vec<_>>()
        );
    });
}

#[test]
fn overload_drops_instead_of_blocking() {
    let queue = EventQueue::new();
    let mut accepted = 0;
    let mut dropped = 0;

    // Burst of 20 submissions with no consumer: the first QUEUE_DEPTH
    // land, the rest drop. Nothing blocks, nothing panics.
    for v in 0..20 {
        match queue.submit(SensorEvent::new(Channel::Encoder, v), Duration::ZERO) {
            Ok(()) => accepted += 1,
            Err(simwheel::Error::QueueFull) => dropped += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(accepted, simwheel::telemetry::queue::QUEUE_DEPTH);
    assert_eq!(dropped, 20 - simwheel::telemetry::queue::QUEUE_DEPTH);
}

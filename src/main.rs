//! SimWheel Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  ISR: paddle edges → EdgeSignal (atomic raise, O(1))       │
//! │                                                            │
//! │  encoder task ──┐                                          │
//! │  throttle task ─┤                                          │
//! │  brake task ────┼──▶ EventQueue ──▶ FrameWriter ──▶ UART1  │
//! │  paddle task ───┘    (bounded 4)    (main task)            │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The queue and both edge signals are constructed here and handed to
//! each task by reference — no process-wide mutable handles. All tasks
//! run at equal priority on the APP core; the frame writer stays on the
//! main task.
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use simwheel::adapters::hardware::{AdcPedals, PcntEncoder, UartLink};
use simwheel::config::SystemConfig;
use simwheel::drivers::hw_init;
use simwheel::drivers::task_pin::{Core, TaskSpec};
use simwheel::producers::{AnalogProducer, EncoderProducer, PaddleProducer};
use simwheel::telemetry::event::AnalogInput;
use simwheel::telemetry::queue::EventQueue;
use simwheel::telemetry::signal::EdgeSignal;
use simwheel::telemetry::writer::FrameWriter;

/// Producer task priority. Equal by design: ordering between producers
/// is arrival order at the queue, nothing more.
const PRODUCER_PRIORITY: u8 = 5;
const PRODUCER_STACK_KB: usize = 4;

const fn producer_task(name: &'static str) -> TaskSpec {
    TaskSpec::new(name, Core::App, PRODUCER_PRIORITY, PRODUCER_STACK_KB)
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("SimWheel v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();
    config.validate()?;

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Shared pipeline objects ────────────────────────────
    // Leaked once at boot so every task can borrow them for 'static.
    let queue: &'static EventQueue = Box::leak(Box::new(EventQueue::new()));
    let upshift: &'static EdgeSignal = Box::leak(Box::new(EdgeSignal::new()));
    let downshift: &'static EdgeSignal = Box::leak(Box::new(EdgeSignal::new()));

    if let Err(e) = hw_init::init_isr_service(upshift, downshift) {
        log::error!("ISR service init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Producer tasks ─────────────────────────────────────
    let encoder = EncoderProducer::new(config.encoder_period(), config.submit_timeout());
    let _ = producer_task("encoder\0").spawn(move || {
        encoder.run(PcntEncoder::new(), queue);
    });

    for input in AnalogInput::ALL {
        let producer = AnalogProducer::new(
            input,
            config.analog_period(),
            config.submit_timeout(),
            config.analog_avg_samples,
            config.analog_tolerance,
        );
        let spec = producer_task(match input {
            AnalogInput::Throttle => "throttle\0",
            AnalogInput::Brake => "brake\0",
        });
        let _ = spec.spawn(move || {
            producer.run(AdcPedals::new(), queue);
        });
    }

    let paddles = PaddleProducer::new(
        config.paddle_wait(),
        config.paddle_dead_time(),
        config.submit_timeout(),
    );
    let _ = producer_task("paddles\0").spawn(move || {
        paddles.run(upshift, downshift, queue);
    });

    // ── 5. Frame writer on the main task ──────────────────────
    info!("Pipeline ready. Streaming frames.");
    let writer = FrameWriter::new(UartLink::new(), config.receive_timeout());
    writer.run(queue)
}

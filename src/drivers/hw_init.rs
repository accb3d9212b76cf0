//! One-shot hardware peripheral initialization.
//!
//! Configures the PCNT quadrature decoder, ADC1 oneshot channels, the
//! UART1 host link, and the paddle GPIO interrupts using raw ESP-IDF sys
//! calls. Called once from `main()` before any task starts. Failure here
//! is the only fatal path in the firmware — logged and halted, never
//! retried.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;
use crate::telemetry::signal::EdgeSignal;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    PcntInitFailed(i32),
    AdcInitFailed(i32),
    UartInitFailed(i32),
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PcntInitFailed(rc) => write!(f, "PCNT init failed (rc={})", rc),
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::UartInitFailed(rc) => write!(f, "UART1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before any task spawns; single-threaded.
    unsafe {
        init_pcnt()?;
        init_adc()?;
        init_uart()?;
        init_gpio_inputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── PCNT quadrature decoder ───────────────────────────────────

#[cfg(target_os = "espidf")]
static mut PCNT_UNIT: pcnt_unit_handle_t = core::ptr::null_mut();

/// SAFETY: PCNT_UNIT is written once in init_pcnt() before any task
/// spawns and only read afterwards.
#[cfg(target_os = "espidf")]
unsafe fn pcnt_unit() -> pcnt_unit_handle_t {
    unsafe { PCNT_UNIT }
}

#[cfg(target_os = "espidf")]
unsafe fn init_pcnt() -> Result<(), HwInitError> {
    let unit_cfg = pcnt_unit_config_t {
        low_limit: i32::from(i16::MIN),
        high_limit: i32::from(i16::MAX),
        ..Default::default()
    };
    let ret = unsafe { pcnt_new_unit(&unit_cfg, &raw mut PCNT_UNIT) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::PcntInitFailed(ret));
    }

    // 4x quadrature decode: each channel counts edges on one phase,
    // direction qualified by the level of the other phase.
    let chan_a_cfg = pcnt_chan_config_t {
        edge_gpio_num: pins::ENCODER_A_GPIO,
        level_gpio_num: pins::ENCODER_B_GPIO,
        ..Default::default()
    };
    let chan_b_cfg = pcnt_chan_config_t {
        edge_gpio_num: pins::ENCODER_B_GPIO,
        level_gpio_num: pins::ENCODER_A_GPIO,
        ..Default::default()
    };

    let mut chan_a: pcnt_channel_handle_t = core::ptr::null_mut();
    let mut chan_b: pcnt_channel_handle_t = core::ptr::null_mut();
    unsafe {
        let ret = pcnt_new_channel(pcnt_unit(), &chan_a_cfg, &mut chan_a);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::PcntInitFailed(ret));
        }
        let ret = pcnt_new_channel(pcnt_unit(), &chan_b_cfg, &mut chan_b);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::PcntInitFailed(ret));
        }

        pcnt_channel_set_edge_action(
            chan_a,
            pcnt_channel_edge_action_t_PCNT_CHANNEL_EDGE_ACTION_DECREASE,
            pcnt_channel_edge_action_t_PCNT_CHANNEL_EDGE_ACTION_INCREASE,
        );
        pcnt_channel_set_level_action(
            chan_a,
            pcnt_channel_level_action_t_PCNT_CHANNEL_LEVEL_ACTION_KEEP,
            pcnt_channel_level_action_t_PCNT_CHANNEL_LEVEL_ACTION_INVERSE,
        );
        pcnt_channel_set_edge_action(
            chan_b,
            pcnt_channel_edge_action_t_PCNT_CHANNEL_EDGE_ACTION_INCREASE,
            pcnt_channel_edge_action_t_PCNT_CHANNEL_EDGE_ACTION_DECREASE,
        );
        pcnt_channel_set_level_action(
            chan_b,
            pcnt_channel_level_action_t_PCNT_CHANNEL_LEVEL_ACTION_KEEP,
            pcnt_channel_level_action_t_PCNT_CHANNEL_LEVEL_ACTION_INVERSE,
        );

        // ~1 µs glitch filter keeps slot-disc chatter out of the count.
        let filter_cfg = pcnt_glitch_filter_config_t { max_glitch_ns: 1000 };
        pcnt_unit_set_glitch_filter(pcnt_unit(), &filter_cfg);

        pcnt_unit_enable(pcnt_unit());
        pcnt_unit_clear_count(pcnt_unit());
        pcnt_unit_start(pcnt_unit());
    }

    info!(
        "hw_init: PCNT quadrature decoder on GPIO{}/{}",
        pins::ENCODER_A_GPIO,
        pins::ENCODER_B_GPIO
    );
    Ok(())
}

/// Current cumulative encoder count.
#[cfg(target_os = "espidf")]
pub fn encoder_count() -> i32 {
    let mut count: i32 = 0;
    // SAFETY: PCNT_UNIT is written once during init_pcnt(); the encoder
    // producer task is the only reader of the count register.
    let ret = unsafe { pcnt_unit_get_count(pcnt_unit(), &mut count) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    count
}

#[cfg(not(target_os = "espidf"))]
pub fn encoder_count() -> i32 {
    0
}

// ── ADC (oneshot) ─────────────────────────────────────────────

pub const ADC1_CH_THROTTLE: u32 = 5;
pub const ADC1_CH_BRAKE: u32 = 6;

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: ADC1_HANDLE is written once in init_adc() before any task
/// spawns; the analog producer tasks only read it afterwards.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [ADC1_CH_THROTTLE, ADC1_CH_BRAKE] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!("hw_init: ADC1 configured (CH5=throttle, CH6=brake)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: ADC1_HANDLE is written once during init_adc(); each analog
    // producer reads its own channel only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.clamp(0, 4095) as u16
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> u16 {
    0
}

// ── UART host link ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const UART_PORT: uart_port_t = 1; // UART1; UART0 stays on the debug console.

#[cfg(target_os = "espidf")]
unsafe fn init_uart() -> Result<(), HwInitError> {
    let cfg = uart_config_t {
        baud_rate: pins::UART_BAUD as i32,
        data_bits: uart_word_length_t_UART_DATA_8_BITS,
        parity: uart_parity_t_UART_PARITY_DISABLE,
        stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
        flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
        ..Default::default()
    };

    unsafe {
        let ret = uart_param_config(UART_PORT, &cfg);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
        let ret = uart_set_pin(
            UART_PORT,
            pins::UART_TX_GPIO,
            pins::UART_RX_GPIO,
            -1, // RTS unused
            -1, // CTS unused
        );
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
        // TX buffer 0 = uart_write_bytes blocks until the FIFO accepts
        // every byte, which is exactly the backpressure the frame writer
        // is specified to absorb.
        let ret = uart_driver_install(UART_PORT, 256, 0, 0, core::ptr::null_mut(), 0);
        if ret != ESP_OK as i32 {
            return Err(HwInitError::UartInitFailed(ret));
        }
    }

    info!(
        "hw_init: UART1 host link at {} baud (TX=GPIO{})",
        pins::UART_BAUD,
        pins::UART_TX_GPIO
    );
    Ok(())
}

/// Blocking single-byte transmit on the host link.
#[cfg(target_os = "espidf")]
pub fn uart_write_byte(byte: u8) {
    // SAFETY: uart_driver_install() completed in init_uart(); the frame
    // writer is the only caller, so writes are never interleaved.
    unsafe {
        uart_write_bytes(UART_PORT, (&raw const byte).cast(), 1);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_write_byte(_byte: u8) {}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // Paddles are active-low momentary switches with internal pull-ups;
    // a press is a falling edge.
    for &pin in &[pins::UPSHIFT_GPIO, pins::DOWNSHIFT_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: paddle GPIO inputs configured");
    Ok(())
}

// ── GPIO ISR Service ──────────────────────────────────────────

/// Shared ISR body for both paddles: one lock-free signal raise, nothing
/// else. The handler argument carries the paddle's EdgeSignal.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn paddle_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: arg was registered in init_isr_service() as an &'static
    // EdgeSignal; raise() is a single atomic store, safe in ISR context.
    let signal = unsafe { &*arg.cast::<EdgeSignal>() };
    signal.raise();
}

/// Install the per-pin GPIO ISR service and register the paddle handlers.
/// Call after init_peripherals() and before spawning tasks.
#[cfg(target_os = "espidf")]
pub fn init_isr_service(
    upshift: &'static EdgeSignal,
    downshift: &'static EdgeSignal,
) -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The registered handler
    // only performs an atomic store on the signal it was given.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        for (pin, signal) in [
            (pins::UPSHIFT_GPIO, upshift),
            (pins::DOWNSHIFT_GPIO, downshift),
        ] {
            gpio_set_intr_type(pin, gpio_int_type_t_GPIO_INTR_NEGEDGE);
            gpio_isr_handler_add(
                pin,
                Some(paddle_gpio_isr),
                core::ptr::from_ref(signal).cast_mut().cast(),
            );
            gpio_intr_enable(pin);
        }

        info!("hw_init: ISR service installed (upshift, downshift)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service(
    _upshift: &'static EdgeSignal,
    _downshift: &'static EdgeSignal,
) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}

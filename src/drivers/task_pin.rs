//! Core-pinned producer task spawning for the ESP32-S3 dual-core.
//!
//! ESP-IDF implements `std::thread` via pthreads, thin wrappers around
//! FreeRTOS tasks. `esp_pthread_set_cfg()` sets thread-local config that
//! applies to the *next* `pthread_create()` from the calling thread, so
//! every task is spawned from `main()` before the writer loop starts and
//! the config→spawn pair never interleaves with other thread creation.
//!
//! On non-ESP targets a [`TaskSpec`] spawns a plain named thread so the
//! pipeline runs unmodified in host tests.

/// CPU core identifiers for the ESP32-S3 Xtensa LX7 dual-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 0 (PRO_CPU) — USB/console plumbing and the frame writer.
    Pro = 0,
    /// Core 1 (APP_CPU) — sampling producers.
    App = 1,
}

/// Spawn parameters for one firmware task.
pub struct TaskSpec {
    /// Task name, null-terminated for FreeRTOS (e.g. `"encoder\0"`).
    pub name: &'static str,
    pub core: Core,
    pub priority: u8,
    pub stack_kb: usize,
}

impl TaskSpec {
    pub const fn new(name: &'static str, core: Core, priority: u8, stack_kb: usize) -> Self {
        Self {
            name,
            core,
            priority,
            stack_kb,
        }
    }

    fn display_name(&self) -> &'static str {
        self.name.trim_end_matches('\0')
    }

    /// Spawn the task pinned to its core with its priority and stack.
    #[cfg(target_os = "espidf")]
    pub fn spawn(self, f: impl FnOnce() + Send + 'static) -> std::thread::JoinHandle<()> {
        unsafe {
            let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
            cfg.pin_to_core = self.core as i32;
            cfg.prio = self.priority as i32;
            cfg.stack_size = (self.stack_kb * 1024) as i32;
            cfg.thread_name = self.name.as_ptr() as *const _;
            let ret = esp_idf_sys::esp_pthread_set_cfg(&cfg);
            assert!(
                ret == esp_idf_sys::ESP_OK as i32,
                "esp_pthread_set_cfg failed: {ret}"
            );
        }

        log::info!(
            "Spawning '{}' on {:?} (pri={}, stack={}KB)",
            self.display_name(),
            self.core,
            self.priority,
            self.stack_kb
        );

        std::thread::Builder::new()
            .name(self.display_name().into())
            .spawn(f)
            .expect("task spawn failed")
    }

    /// Host fallback — core affinity and priority have no equivalent.
    #[cfg(not(target_os = "espidf"))]
    pub fn spawn(self, f: impl FnOnce() + Send + 'static) -> std::thread::JoinHandle<()> {
        log::info!(
            "Spawning '{}' (sim, no core pinning, stack={}KB)",
            self.display_name(),
            self.stack_kb
        );

        std::thread::Builder::new()
            .name(self.display_name().into())
            .stack_size(self.stack_kb * 1024)
            .spawn(f)
            .expect("task spawn failed")
    }
}

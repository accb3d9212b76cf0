//! Peripheral bring-up and task plumbing (ESP-IDF side).

pub mod hw_init;
pub mod task_pin;

fn main() {
    // Emits the ESP-IDF link/cfg environment when building for the chip.
    // On host builds (no ESP-IDF toolchain on PATH) this emits nothing.
    embuild::espidf::sysenv::output();
}

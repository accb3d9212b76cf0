//! Port implementations over the hardware capabilities.

pub mod hardware;

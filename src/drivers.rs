//! Peripheral Drivers
//!
//! Drivers for the parts hanging off the shared data bus: the DDS
//! synthesizer, the 4x4 keypad matrix and the character display.
//! These provide domain-specific abstractions over the HAL layer.

pub mod dds;
pub mod keypad;
pub mod lcd;

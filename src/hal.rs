//! Hardware Abstraction Layer
//!
//! Trait seams between the generator logic and the board, plus their
//! STM32G474 implementations (behind the `embedded` feature). Every seam
//! is infallible: the DDS, display and PWM are driven open-loop.

pub mod bus;
pub mod gpio;
pub mod pwm;
pub mod timer;
pub mod watchdog;

//! DDS Signal Generator Firmware Library
//!
//! Core of a benchtop RF signal generator: a 125 MHz-clocked DDS chip
//! produces the carrier, a 4x4 keypad takes numeric commands and a 2x16
//! character display shows status.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Command Interpreter  │  Modulation (AM/FM)  │  Sweep        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      DSP LAYER                               │
//! │  Tuning words  │  Modulation tables  │  Sweep ramp           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  Shared bus  │  DDS  │  Keypad  │  LCD  │  PWM  │  Watchdog  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │        embassy-rs (tick wake-up, blocking engines)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **One owner per resource**: the multiplexed data bus is lent out to
//!   one peripheral protocol at a time through borrowed lanes
//! - **Explicit context**: all hardware lives in [`board::Hardware`],
//!   owned by the control loop and passed down, no globals
//! - **Scoped timing sections**: interrupt-free sample loops are closures,
//!   so interrupts come back on every exit path
//! - **Functional core, imperative shell**: tuning, tables and ramps are
//!   pure and tested on the host
//!
//! Host tests use the default `std` feature. Target builds use
//! `--no-default-features --features embedded`.

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Must stay first so the logging macros are visible to every module
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Trait seams for the shared bus, control lines, keypad rows, PWM and
/// watchdog, plus their STM32G474 implementations.
pub mod hal;

/// Peripheral Drivers
///
/// DDS write protocol, keypad matrix scanner, character LCD.
pub mod drivers;

/// Digital Signal Processing
///
/// Tuning-word arithmetic, modulation tables and the sweep ramp.
pub mod dsp;

/// Generator Control Logic
///
/// Carrier state, modulation and sweep engines, command interpreter.
pub mod generator;

/// Board aggregate owning every peripheral
pub mod board;

/// Status text shown on the display
pub mod ui;

/// Shared types used across modules
pub mod types;

/// Error kinds reported to the operator
pub mod error;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::board::{Board, Hardware};
    pub use crate::config::*;
    pub use crate::error::GeneratorError;
    pub use crate::generator::command::{CommandInterpreter, Outcome};
    pub use crate::types::*;

    // Common traits
    pub use embedded_hal::delay::DelayNs;
    pub use embedded_hal::digital::OutputPin;

    #[cfg(feature = "embedded")]
    pub use embassy_time::{Duration, Instant, Ticker, Timer};

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}

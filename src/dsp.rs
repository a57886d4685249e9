//! Digital Signal Processing
//!
//! Pure arithmetic behind the generator, testable on the host:
//! - Tuning-word computation with the alias fold
//! - AM/FM modulation tables
//! - Fixed-point sweep ramp

pub mod tuning;
pub mod tables;
pub mod ramp;

//! Operator-facing error kinds
//!
//! Both errors are acknowledged modally on the display; they never
//! propagate past the command interpreter.

use core::fmt;

/// Rejected command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorError {
    /// Committed value outside 0..=124 999 900 Hz
    OutOfRange,
    /// FM requested on a carrier below 75 kHz
    CarrierTooLow,
}

impl GeneratorError {
    /// Text shown on the display while waiting for acknowledgment
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::OutOfRange => "Unable, must be\r\n0..124999900",
            Self::CarrierTooLow => "Unable <75KHz",
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange => f.write_str("frequency out of range"),
            Self::CarrierTooLow => f.write_str("carrier too low for FM"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for GeneratorError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::OutOfRange => defmt::write!(f, "OutOfRange"),
            Self::CarrierTooLow => defmt::write!(f, "CarrierTooLow"),
        }
    }
}

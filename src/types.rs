//! Shared types used across the generator firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::config::MAX_FREQUENCY_HZ;
use crate::dsp::tuning::tuning_word_for;
use crate::error::GeneratorError;

/// Frequency in Hertz with validation
///
/// Represents a frequency that may be committed to FA or FB.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Minimum committable frequency
    pub const MIN_HZ: u32 = 0;

    /// Maximum committable frequency
    pub const MAX_HZ: u32 = MAX_FREQUENCY_HZ;

    /// Create a new Frequency from Hz, returns None if out of range
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz <= Self::MAX_HZ {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Create frequency at compile time (panics if out of range)
    #[must_use]
    pub const fn from_hz_const(hz: u32) -> Self {
        match Self::from_hz(hz) {
            Some(f) => f,
            None => panic!("Frequency out of range"),
        }
    }

    /// Validate a signed entry accumulator
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::OutOfRange`] for negative values and values
    /// above [`Self::MAX_HZ`].
    pub fn from_entry(entry: i32) -> Result<Self, GeneratorError> {
        u32::try_from(entry)
            .ok()
            .and_then(Self::from_hz)
            .ok_or(GeneratorError::OutOfRange)
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }

    /// Tuning word that makes the DDS produce this frequency
    #[must_use]
    pub const fn tuning_word(self) -> TuningWord {
        tuning_word_for(self.0)
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// 32-bit DDS phase increment
///
/// Only meaningful for the 125 MHz reference clock it was computed for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TuningWord(u32);

impl TuningWord {
    /// Wrap a raw word
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw word
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Bytes in bus order (most significant first)
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TuningWord {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:08X}", self.0);
    }
}

/// Keypad legend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Numeric key 0-9
    Digit(u8),
    /// Commit entry to FA
    A,
    /// Commit entry to FB
    B,
    /// Sweep FA..FB
    C,
    /// Delete last digit
    D,
    /// FM around FA
    Hash,
    /// AM at FA
    Star,
}

impl Key {
    /// Map a keypad character, None for anything outside the vocabulary
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c as u8 - b'0')),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            '#' => Some(Self::Hash),
            '*' => Some(Self::Star),
            _ => None,
        }
    }

    /// Legend printed on the key
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Digit(d) => (b'0' + d) as char,
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::Hash => '#',
            Self::Star => '*',
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Key {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Key({})", self.as_char());
    }
}

/// Committed frequency slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Slot {
    /// Primary / carrier (FA)
    #[default]
    A,
    /// Secondary / sweep endpoint (FB)
    B,
}

impl Slot {
    /// Label used on the display
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "FA",
            Self::B => "FB",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Slot {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::A => defmt::write!(f, "FA"),
            Self::B => defmt::write!(f, "FB"),
        }
    }
}

/// Modulation mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modulation {
    /// Amplitude modulation on the PWM channel
    Am,
    /// Frequency modulation by reprogramming the DDS
    Fm,
}

impl Modulation {
    /// Short name shown on the display
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Fm => "FM",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Modulation {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Am => defmt::write!(f, "AM"),
            Self::Fm => defmt::write!(f, "FM"),
        }
    }
}

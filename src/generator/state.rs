//! Carrier State
//!
//! The two committed frequencies and the numeric entry being typed.

use crate::config::{DEFAULT_FA_HZ, DEFAULT_FB_HZ};
use crate::dsp::ramp::SweepParameters;
use crate::error::GeneratorError;
use crate::types::{Frequency, Slot};

/// FA, FB and the entry accumulator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarrierState {
    fa: Frequency,
    fb: Frequency,
    entry: i32,
}

impl CarrierState {
    /// Boot defaults: FA 1 MHz, FB 9 MHz, empty entry
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fa: Frequency::from_hz_const(DEFAULT_FA_HZ),
            fb: Frequency::from_hz_const(DEFAULT_FB_HZ),
            entry: 0,
        }
    }

    /// Primary frequency
    #[must_use]
    pub const fn fa(&self) -> Frequency {
        self.fa
    }

    /// Secondary frequency
    #[must_use]
    pub const fn fb(&self) -> Frequency {
        self.fb
    }

    /// Frequency held in `slot`
    #[must_use]
    pub const fn get(&self, slot: Slot) -> Frequency {
        match slot {
            Slot::A => self.fa,
            Slot::B => self.fb,
        }
    }

    /// Number typed so far
    #[must_use]
    pub const fn entry(&self) -> i32 {
        self.entry
    }

    /// Append a decimal digit
    ///
    /// The accumulator wraps on overflow like the 32-bit register it
    /// models; a wrapped value is rejected at commit time.
    pub fn push_digit(&mut self, digit: u8) -> i32 {
        self.entry = self.entry.wrapping_mul(10).wrapping_add(i32::from(digit));
        self.entry
    }

    /// Drop the last digit
    pub fn delete_digit(&mut self) -> i32 {
        self.entry /= 10;
        self.entry
    }

    /// Forget the entry
    pub fn clear_entry(&mut self) {
        self.entry = 0;
    }

    /// Move the entry into `slot`
    ///
    /// The entry is cleared whether or not the value is accepted.
    ///
    /// # Errors
    ///
    /// [`GeneratorError::OutOfRange`] if the entry is negative or above
    /// the top of the band; the slot keeps its old value.
    pub fn commit(&mut self, slot: Slot) -> Result<Frequency, GeneratorError> {
        let entry = core::mem::take(&mut self.entry);
        let f = Frequency::from_entry(entry)?;
        match slot {
            Slot::A => self.fa = f,
            Slot::B => self.fb = f,
        }
        Ok(f)
    }

    /// Sweep bounds between FA and FB
    ///
    /// The stored values are left in place even when FB < FA.
    #[must_use]
    pub fn sweep_parameters(&self) -> SweepParameters {
        SweepParameters::from_bounds(self.fa, self.fb)
    }
}

impl Default for CarrierState {
    fn default() -> Self {
        Self::new()
    }
}

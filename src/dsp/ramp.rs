//! Sweep Ramp
//!
//! Linear ramp from `low` to `low + span` in [`SWEEP_STEPS`] steps. The
//! per-step increment is `span / 256`, held in an 8-bit fractional
//! fixed-point accumulator so the remainder carries from step to step.

use fixed::types::U56F8;

use crate::config::SWEEP_STEPS;
use crate::types::Frequency;

/// Normalized sweep bounds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepParameters {
    low: u32,
    span: u32,
}

impl SweepParameters {
    /// Order two bounds so the ramp always runs upward
    #[must_use]
    pub fn from_bounds(fa: Frequency, fb: Frequency) -> Self {
        let (low, high) = if fb < fa { (fb, fa) } else { (fa, fb) };
        Self {
            low: low.as_hz(),
            span: high.as_hz() - low.as_hz(),
        }
    }

    /// Start of the ramp
    #[must_use]
    pub const fn low(&self) -> u32 {
        self.low
    }

    /// Distance from start to end
    #[must_use]
    pub const fn span(&self) -> u32 {
        self.span
    }

    /// End of the ramp
    #[must_use]
    pub const fn high(&self) -> u32 {
        self.low + self.span
    }

    /// One pass of the ramp
    #[must_use]
    pub fn ramp(&self) -> Ramp {
        Ramp {
            low: self.low,
            // bits of U56F8 are value × 256, so this is exactly span / 256
            step: U56F8::from_bits(u64::from(self.span)),
            acc: U56F8::ZERO,
            remaining: SWEEP_STEPS,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SweepParameters {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Sweep({}..{} Hz)", self.low, self.high());
    }
}

/// Iterator over the frequencies of one ramp
#[derive(Clone, Debug)]
pub struct Ramp {
    low: u32,
    step: U56F8,
    acc: U56F8,
    remaining: u32,
}

impl Iterator for Ramp {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let offset: u32 = self.acc.to_num();
        self.acc += self.step;
        Some(self.low + offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Ramp {}

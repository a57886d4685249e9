//! DDS Tuning Word Calculation
//!
//! The DDS phase accumulator advances by the tuning word `W` every
//! reference clock cycle, giving an output of `W × FCLK / 2^32`.
//!
//! # Alias fold
//!
//! The sampled output carries images at `k × FCLK ± fout`. Above half the
//! clock the direct output is no longer usable, so the word is computed
//! for the mirror image `FCLK − f` instead and the wanted frequency is
//! taken from the image.

use crate::config::{ALIAS_FOLD_HZ, REFERENCE_CLOCK_HZ};
use crate::types::TuningWord;

/// Target actually synthesized for a requested frequency
///
/// Targets at or above the clock (FM excursions past the top of the band)
/// are reduced modulo the clock before folding.
#[must_use]
pub const fn effective_frequency(freq_hz: u32) -> u32 {
    let f = freq_hz % REFERENCE_CLOCK_HZ;
    if f > ALIAS_FOLD_HZ {
        REFERENCE_CLOCK_HZ - f
    } else {
        f
    }
}

/// Tuning word for `freq_hz` on the 125 MHz reference
///
/// `floor(f_eff × 2^32 / 125 MHz)` with a 64-bit intermediate.
#[must_use]
pub const fn tuning_word_for(freq_hz: u32) -> TuningWord {
    let f = effective_frequency(freq_hz) as u64;
    let word = (f << 32) / REFERENCE_CLOCK_HZ as u64;
    // f_eff <= FCLK/2 so the quotient is at most 2^31
    TuningWord::from_raw(word as u32)
}

/// Output frequency the DDS produces for `word`, truncated to whole Hz
#[must_use]
pub const fn frequency_of(word: TuningWord) -> u32 {
    ((word.raw() as u64 * REFERENCE_CLOCK_HZ as u64) >> 32) as u32
}

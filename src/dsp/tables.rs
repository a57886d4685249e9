//! Modulation Tables
//!
//! One period of a sine, 32 samples long, for each modulation mode.

use crate::config::MODULATION_TABLE_LEN;
use crate::dsp::tuning::tuning_word_for;
use crate::types::{Frequency, TuningWord};

/// FM frequency offsets from the carrier in Hz (peak ±75 kHz)
pub const FM_OFFSETS: [i32; MODULATION_TABLE_LEN] = [
    0, 14_631, 28_701, 41_667, 53_033, 62_360, 69_290, 73_558, //
    75_000, 73_558, 69_290, 62_360, 53_033, 41_667, 28_701, 14_631, //
    0, -14_631, -28_701, -41_667, -53_033, -62_360, -69_290, -73_558, //
    -75_000, -73_558, -69_290, -62_360, -53_033, -41_667, -28_701, -14_631,
];

/// AM amplitude samples, biased to mid-scale
pub const AM_SAMPLES: [u8; MODULATION_TABLE_LEN] = [
    128, 153, 177, 199, 218, 234, 245, 253, //
    255, 253, 245, 234, 218, 199, 177, 153, //
    128, 103, 79, 57, 38, 22, 11, 3, //
    1, 3, 11, 22, 38, 57, 79, 103,
];

/// Next index into a modulation table
#[must_use]
pub const fn next_index(index: usize) -> usize {
    (index + 1) & (MODULATION_TABLE_LEN - 1)
}

/// Precompute the FM tuning words around `carrier`
///
/// The carrier is expected to be at least the FM deviation; lower values
/// saturate the negative excursions at 0 Hz.
#[must_use]
pub fn fm_tuning_table(carrier: Frequency) -> [TuningWord; MODULATION_TABLE_LEN] {
    core::array::from_fn(|i| {
        tuning_word_for(carrier.as_hz().saturating_add_signed(FM_OFFSETS[i]))
    })
}

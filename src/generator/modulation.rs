//! Modulation Engine
//!
//! Blocking AM and FM around the carrier FA. Both replay a 32-sample
//! sine table until a key is pressed.
//!
//! - **FM** reprograms the DDS every 11 µs with a precomputed tuning word
//!   from carrier −75 kHz to carrier +75 kHz, a ~2.84 kHz tone.
//! - **AM** holds the carrier and steps the amplitude PWM every 12 µs,
//!   a ~2.6 kHz tone. The carrier word is rewritten with each sample.

use crate::board::{Board, Hardware};
use crate::config::{AM_SAMPLE_INTERVAL_US, FM_SAMPLE_INTERVAL_US, MIN_FM_CARRIER_HZ};
use crate::dsp::tables::{fm_tuning_table, AM_SAMPLES};
use crate::error::GeneratorError;
use crate::generator::timing::{run_sampled, sample_loop, wait_for_release};
use crate::hal::pwm::AmplitudeOutput;
use crate::types::Frequency;

/// Check that `carrier` can take the full FM deviation
///
/// # Errors
///
/// [`GeneratorError::CarrierTooLow`] below 75 kHz.
pub const fn check_fm_carrier(carrier: Frequency) -> Result<(), GeneratorError> {
    if carrier.as_hz() < MIN_FM_CARRIER_HZ {
        Err(GeneratorError::CarrierTooLow)
    } else {
        Ok(())
    }
}

/// Frequency-modulate around `carrier` until a key is pressed
///
/// Returns the number of samples emitted. The DDS is left on the last
/// sample; the caller restores the carrier.
///
/// # Errors
///
/// [`GeneratorError::CarrierTooLow`] without touching the DDS.
pub fn run_fm<B: Board>(hw: &mut Hardware<B>, carrier: Frequency) -> Result<u32, GeneratorError> {
    check_fm_carrier(carrier)?;
    let table = fm_tuning_table(carrier);

    wait_for_release(hw);
    info!("FM around {}", carrier);
    let samples = run_sampled(hw, FM_SAMPLE_INTERVAL_US, |hw, i| hw.program(table[i]));
    debug!("FM stopped after {} samples", samples);

    wait_for_release(hw);
    hw.keypad.flush();
    Ok(samples)
}

/// Amplitude-modulate `carrier` until a key is pressed
///
/// Returns the number of samples emitted. The amplitude channel is
/// disabled and parked low before interrupts come back.
pub fn run_am<B: Board>(hw: &mut Hardware<B>, carrier: Frequency) -> u32 {
    let word = carrier.tuning_word();

    wait_for_release(hw);
    info!("AM at {}", carrier);
    hw.amplitude.enable();
    let samples = critical_section::with(|cs| {
        let n = sample_loop(cs, hw, AM_SAMPLE_INTERVAL_US, |hw, i| {
            hw.program(word);
            hw.amplitude.set_level(AM_SAMPLES[i]);
        });
        hw.amplitude.disable();
        n
    });
    debug!("AM stopped after {} samples", samples);

    wait_for_release(hw);
    hw.keypad.flush();
    samples
}

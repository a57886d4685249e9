//! Timing-Critical Sections
//!
//! The modulation engines reprogram the DDS on a fixed microsecond
//! cadence. Any interrupt would stretch a sample, so the loops run inside
//! a critical section, watching the keypad rows directly instead of the
//! interrupt-driven scan.
//!
//! A loop needs a [`CriticalSection`] token to run, so it cannot be
//! started with interrupts enabled, and the section ends on every exit
//! path when the closure returns.

use critical_section::CriticalSection;
use embedded_hal::delay::DelayNs;

use crate::board::{Board, Hardware};
use crate::dsp::tables::next_index;

/// Step through a modulation table until a key is held
///
/// Each sample feeds the watchdog, calls `step` with the table index,
/// holds for `interval_us` and then checks the keypad rows. Returns the
/// number of samples emitted (wrapping).
pub fn sample_loop<B, F>(
    _cs: CriticalSection<'_>,
    hw: &mut Hardware<B>,
    interval_us: u32,
    mut step: F,
) -> u32
where
    B: Board,
    F: FnMut(&mut Hardware<B>, usize),
{
    let mut index = 0;
    let mut samples: u32 = 0;
    loop {
        hw.feed_watchdog();
        step(hw, index);
        index = next_index(index);
        samples = samples.wrapping_add(1);
        hw.delay.delay_us(interval_us);
        if hw.key_held() {
            return samples;
        }
    }
}

/// [`sample_loop`] with interrupts disabled for its duration
pub fn run_sampled<B, F>(hw: &mut Hardware<B>, interval_us: u32, step: F) -> u32
where
    B: Board,
    F: FnMut(&mut Hardware<B>, usize),
{
    critical_section::with(|cs| sample_loop(cs, hw, interval_us, step))
}

/// Block until every key is up, feeding the watchdog
pub fn wait_for_release<B: Board>(hw: &mut Hardware<B>) {
    while !hw.keys_released() {
        hw.feed_watchdog();
    }
}

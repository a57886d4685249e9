//! Sweep Engine
//!
//! Repeated linear ramps from the lower to the higher of FA and FB,
//! 256 steps of 500 µs each. The sync output is high for the duration of
//! every ramp so an oscilloscope can trigger on it.
//!
//! Interrupts stay enabled; the keypad is scanned twice per ramp and any
//! queued key ends the sweep after the ramp in progress.

use embedded_hal::delay::DelayNs;

use crate::board::{Board, Hardware};
use crate::config::{SWEEP_SETTLE_MS, SWEEP_STEP_DELAY_US};
use crate::dsp::ramp::SweepParameters;
use crate::hal::gpio::Line;

/// Sweep until a key is queued; returns the number of ramps completed
///
/// The terminating key is discarded.
pub fn run_sweep<B: Board>(hw: &mut Hardware<B>, params: SweepParameters) -> u32 {
    info!("{}", params);
    let mut ramps: u32 = 0;
    while !hw.keypad.ready() {
        hw.feed_watchdog();

        hw.sync.high();
        for f in params.ramp() {
            hw.set_frequency(f);
            hw.delay.delay_us(SWEEP_STEP_DELAY_US);
        }
        hw.sync.low();

        hw.scan_keypad();
        hw.delay.delay_ms(SWEEP_SETTLE_MS);
        hw.set_frequency(params.low());
        hw.delay.delay_ms(SWEEP_SETTLE_MS);
        hw.scan_keypad();

        ramps = ramps.wrapping_add(1);
    }
    hw.keypad.flush();
    debug!("sweep stopped after {} ramps", ramps);
    ramps
}

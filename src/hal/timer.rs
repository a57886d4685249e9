//! Timer Abstractions
//!
//! Busy-wait delays for the sample loops. They count CPU cycles rather
//! than timer ticks, so they keep working with interrupts disabled.

/// Cycles needed to wait `ns` at `clock_hz`, at least one
#[must_use]
pub const fn cycles_for_ns(ns: u32, clock_hz: u32) -> u32 {
    let cycles = (ns as u64 * clock_hz as u64) / 1_000_000_000;
    if cycles == 0 {
        1
    } else if cycles > u32::MAX as u64 {
        u32::MAX
    } else {
        cycles as u32
    }
}

/// Cycle-counting delay
#[cfg(feature = "embedded")]
#[derive(Clone, Copy, Debug)]
pub struct CycleDelay {
    clock_hz: u32,
}

#[cfg(feature = "embedded")]
impl CycleDelay {
    /// Create for a core running at `clock_hz`
    #[must_use]
    pub const fn new(clock_hz: u32) -> Self {
        Self { clock_hz }
    }
}

#[cfg(feature = "embedded")]
impl embedded_hal::delay::DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        cortex_m::asm::delay(cycles_for_ns(ns, self.clock_hz));
    }
}

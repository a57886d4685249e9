//! Watchdog
//!
//! The independent watchdog is the only defense against a stuck loop.
//! Every path, interrupt-free sample loops included, must feed it well
//! inside its 4 s timeout.

/// Hardware watchdog that must be fed periodically
pub trait Watchdog {
    /// Restart the timeout
    fn feed(&mut self);
}

#[cfg(feature = "embedded")]
impl Watchdog for embassy_stm32::wdg::IndependentWatchdog<'_, embassy_stm32::peripherals::IWDG> {
    fn feed(&mut self) {
        self.pet();
    }
}

//! GPIO Abstractions
//!
//! Control lines (DDS strobes, LCD RS/E, sweep sync) and the keypad row
//! inputs.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

/// Infallible output line
///
/// Blanket-implemented for every `OutputPin` that cannot fail, which
/// covers the STM32 GPIO outputs.
pub trait Line: OutputPin<Error = Infallible> {
    /// Drive high
    fn high(&mut self) {
        self.set_high().unwrap_or_else(|e| match e {});
    }

    /// Drive low
    fn low(&mut self) {
        self.set_low().unwrap_or_else(|e| match e {});
    }

    /// Drive to `level`
    fn put(&mut self, level: bool) {
        if level {
            self.high();
        } else {
            self.low();
        }
    }

    /// One positive pulse, back low afterwards
    fn strobe(&mut self) {
        self.high();
        self.low();
    }
}

impl<T: OutputPin<Error = Infallible>> Line for T {}

/// Keypad row inputs
///
/// Rows are pulled up. With a column driven low, a pressed key pulls its
/// row low, so a `0` bit means pressed.
pub trait RowSense {
    /// Row levels in bits 0-3
    fn read_rows(&mut self) -> u8;
}

/// All rows high: nothing pressed
pub const ROWS_RELEASED: u8 = 0x0F;

/// Four pulled-up row inputs
#[cfg(feature = "embedded")]
pub struct RowInputs<'d> {
    rows: [embassy_stm32::gpio::Input<'d>; 4],
}

#[cfg(feature = "embedded")]
impl<'d> RowInputs<'d> {
    /// Create from row 0..3
    #[must_use]
    pub fn new(rows: [embassy_stm32::gpio::Input<'d>; 4]) -> Self {
        Self { rows }
    }
}

#[cfg(feature = "embedded")]
impl RowSense for RowInputs<'_> {
    fn read_rows(&mut self) -> u8 {
        self.rows
            .iter()
            .enumerate()
            .fold(0, |acc, (bit, pin)| acc | (u8::from(pin.is_high()) << bit))
    }
}

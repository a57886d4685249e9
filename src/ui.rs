//! User Interface
//!
//! Status screens of the generator. Each [`Status`] knows how to render
//! itself on the character display; the command interpreter decides which
//! one is shown.

use crate::drivers::lcd::Console;
use crate::dsp::ramp::SweepParameters;
use crate::error::GeneratorError;
use crate::hal::bus::ParallelPort;
use crate::hal::gpio::Line;
use crate::types::Modulation;
use embedded_hal::delay::DelayNs;

/// One screen update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status<'a> {
    /// `name=value` on a cleared display, cursor on the second row
    Setting {
        /// Label, e.g. `FA`
        name: &'a str,
        /// Value in Hz
        hz: u32,
    },
    /// Entry accumulator echoed at the start of the current row
    Entry(i32),
    /// Entry after a deleted digit, blanking the dropped cell
    Deleted(i32),
    /// `Modulation: AM` / `Modulation: FM`
    Modulation(Modulation),
    /// Both sweep endpoints
    Sweep(SweepParameters),
    /// Error text awaiting acknowledgment
    Error(GeneratorError),
}

impl Status<'_> {
    /// Draw on the display
    pub fn render<L: Line, P: ParallelPort, D: DelayNs>(self, console: &mut Console<'_, L, P, D>) {
        match self {
            Self::Setting { name, hz } => {
                console.clear();
                console.print_str(name);
                console.print_char(b'=');
                console.print_uint(hz);
                console.print_str("\r\n");
            }
            Self::Entry(entry) => {
                console.print_char(b'\r');
                console.print_int(entry);
            }
            Self::Deleted(entry) => {
                console.print_char(b'\r');
                if entry != 0 {
                    console.print_int(entry);
                }
                console.print_str(" \x08");
            }
            Self::Modulation(mode) => {
                console.print_str("Modulation: ");
                console.print_str(mode.name());
            }
            Self::Sweep(params) => {
                console.clear();
                console.print_str("FA=");
                console.print_uint(params.low());
                console.print_str("\r\nFB=");
                console.print_uint(params.high());
            }
            Self::Error(error) => {
                console.clear();
                console.print_str(error.message());
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Status<'_> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Setting { name, hz } => defmt::write!(f, "{}={}", name, hz),
            Self::Entry(e) => defmt::write!(f, "Entry({})", e),
            Self::Deleted(e) => defmt::write!(f, "Deleted({})", e),
            Self::Modulation(m) => defmt::write!(f, "Modulation({})", m),
            Self::Sweep(p) => defmt::write!(f, "{}", p),
            Self::Error(e) => defmt::write!(f, "Error({})", e),
        }
    }
}

//! Command Interpreter
//!
//! Maps keypad legends to actions:
//!
//! | Key    | Action                                       |
//! |--------|----------------------------------------------|
//! | `0`-`9`| append a digit to the entry                  |
//! | `D`    | delete the last digit                        |
//! | `A`    | commit the entry to FA and tune to it        |
//! | `B`    | commit the entry to FB and tune to it        |
//! | `C`    | sweep between FA and FB                      |
//! | `#`    | FM around FA                                 |
//! | `*`    | AM at FA                                     |
//!
//! Sweep and modulation block until the operator presses a key; the
//! generator then returns to FA with an empty entry. Errors are shown
//! until any key is pressed, and that key is discarded.

use embedded_hal::delay::DelayNs;

use crate::board::{Board, Hardware};
use crate::config::TICK_PERIOD_MS;
use crate::error::GeneratorError;
use crate::generator::modulation::{check_fm_carrier, run_am, run_fm};
use crate::generator::state::CarrierState;
use crate::generator::sweep::run_sweep;
use crate::generator::timing::wait_for_release;
use crate::types::{Frequency, Key, Modulation, Slot};
use crate::ui::Status;

/// Label shown while a modulation carrier is active
const CARRIER_LABEL: &str = "FC";

/// What a keypress did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Not a keypad legend
    Ignored,
    /// Entry changed to this value
    Entry(i32),
    /// Slot updated and the DDS retuned
    Committed(Slot, Frequency),
    /// Command refused and acknowledged by the operator
    Rejected(GeneratorError),
    /// Sweep ran for this many ramps
    Swept {
        /// Completed ramps
        ramps: u32,
    },
    /// Modulation ran for this many samples
    Modulated {
        /// AM or FM
        mode: Modulation,
        /// Samples emitted
        samples: u32,
    },
}

#[cfg(feature = "embedded")]
impl defmt::Format for Outcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Ignored => defmt::write!(f, "Ignored"),
            Self::Entry(e) => defmt::write!(f, "Entry({})", e),
            Self::Committed(slot, freq) => defmt::write!(f, "{}={}", slot, freq),
            Self::Rejected(e) => defmt::write!(f, "Rejected({})", e),
            Self::Swept { ramps } => defmt::write!(f, "Swept({} ramps)", ramps),
            Self::Modulated { mode, samples } => {
                defmt::write!(f, "{}({} samples)", mode, samples);
            }
        }
    }
}

/// Keypad-driven controller of the generator
#[derive(Clone, Debug, Default)]
pub struct CommandInterpreter {
    state: CarrierState,
}

impl CommandInterpreter {
    /// Boot state: FA 1 MHz, FB 9 MHz
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: CarrierState::new(),
        }
    }

    /// Current carrier state
    #[must_use]
    pub const fn state(&self) -> &CarrierState {
        &self.state
    }

    /// Show FA and tune to it
    pub fn start<B: Board>(&mut self, hw: &mut Hardware<B>) {
        info!("start at {}", self.state.fa());
        self.show_slot(hw, Slot::A);
    }

    /// Act on one keypad legend
    pub fn handle<B: Board>(&mut self, hw: &mut Hardware<B>, c: char) -> Outcome {
        let Some(key) = Key::from_char(c) else {
            return Outcome::Ignored;
        };
        match key {
            Key::Digit(d) => {
                let entry = self.state.push_digit(d);
                Status::Entry(entry).render(&mut hw.console());
                Outcome::Entry(entry)
            }
            Key::D => {
                let entry = self.state.delete_digit();
                Status::Deleted(entry).render(&mut hw.console());
                Outcome::Entry(entry)
            }
            Key::A => self.commit(hw, Slot::A),
            Key::B => self.commit(hw, Slot::B),
            Key::C => self.sweep(hw),
            Key::Hash => self.frequency_modulate(hw),
            Key::Star => self.amplitude_modulate(hw),
        }
    }

    fn commit<B: Board>(&mut self, hw: &mut Hardware<B>, slot: Slot) -> Outcome {
        let outcome = match self.state.commit(slot) {
            Ok(freq) => {
                info!("{} <- {}", slot, freq);
                Outcome::Committed(slot, freq)
            }
            Err(error) => {
                acknowledge(hw, error);
                Outcome::Rejected(error)
            }
        };
        self.show_slot(hw, slot);
        outcome
    }

    fn sweep<B: Board>(&mut self, hw: &mut Hardware<B>) -> Outcome {
        let params = self.state.sweep_parameters();
        Status::Sweep(params).render(&mut hw.console());
        let ramps = run_sweep(hw, params);
        self.resume(hw);
        Outcome::Swept { ramps }
    }

    fn frequency_modulate<B: Board>(&mut self, hw: &mut Hardware<B>) -> Outcome {
        let carrier = self.state.fa();
        let result = check_fm_carrier(carrier).and_then(|()| {
            show_frequency(hw, CARRIER_LABEL, carrier);
            Status::Modulation(Modulation::Fm).render(&mut hw.console());
            run_fm(hw, carrier)
        });
        let outcome = match result {
            Ok(samples) => Outcome::Modulated {
                mode: Modulation::Fm,
                samples,
            },
            Err(error) => {
                acknowledge(hw, error);
                wait_for_release(hw);
                hw.keypad.flush();
                Outcome::Rejected(error)
            }
        };
        self.resume(hw);
        outcome
    }

    fn amplitude_modulate<B: Board>(&mut self, hw: &mut Hardware<B>) -> Outcome {
        let carrier = self.state.fa();
        show_frequency(hw, CARRIER_LABEL, carrier);
        Status::Modulation(Modulation::Am).render(&mut hw.console());
        let samples = run_am(hw, carrier);
        self.resume(hw);
        Outcome::Modulated {
            mode: Modulation::Am,
            samples,
        }
    }

    /// Back to FA with an empty entry
    fn resume<B: Board>(&mut self, hw: &mut Hardware<B>) {
        self.state.clear_entry();
        self.show_slot(hw, Slot::A);
    }

    fn show_slot<B: Board>(&self, hw: &mut Hardware<B>, slot: Slot) {
        show_frequency(hw, slot.label(), self.state.get(slot));
    }
}

/// `name=value` on the display, then tune the DDS
fn show_frequency<B: Board>(hw: &mut Hardware<B>, name: &str, freq: Frequency) {
    Status::Setting {
        name,
        hz: freq.as_hz(),
    }
    .render(&mut hw.console());
    hw.set_frequency(freq.as_hz());
}

/// Show `error` until the operator presses a key, then discard the key
///
/// The keypad keeps being scanned and the watchdog fed while waiting.
pub fn acknowledge<B: Board>(hw: &mut Hardware<B>, error: GeneratorError) {
    warn!("{}", error);
    hw.keypad.flush();
    Status::Error(error).render(&mut hw.console());
    while !hw.keypad.ready() {
        hw.feed_watchdog();
        hw.delay.delay_ms(TICK_PERIOD_MS as u32);
        hw.scan_keypad();
    }
    hw.keypad.flush();
}

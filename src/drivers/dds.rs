//! DDS Synthesizer Driver
//!
//! Parallel-load driver for a 125 MHz-clocked DDS chip (AD9850 family).
//!
//! A frequency change is one five-byte frame on the shared data bus:
//!
//! ```text
//! FQ_UD ‾\_______________________________/‾‾‾
//! D0-D7   | ctrl | w31-24 | w23-16 | w15-8 | w7-0 |
//! W_CLK        ‾|_     ‾|_      ‾|_      ‾|_     ‾|_
//! ```
//!
//! The control byte is always zero: phase 0, powered up. The chip latches
//! the accumulated word on the rising edge of FQ_UD.

use embedded_hal::delay::DelayNs;

use crate::config::DDS_RESET_PULSE_MS;
use crate::dsp::tuning::tuning_word_for;
use crate::hal::bus::{ParallelPort, SharedBus};
use crate::hal::gpio::Line;
use crate::types::TuningWord;

/// Control byte: phase offset 0, power-down off, factory test bits clear
const CONTROL_BYTE: u8 = 0x00;

/// Bytes in one parallel-load frame
pub const FRAME_LEN: usize = 5;

/// Bytes written for `word`, in bus order
#[must_use]
pub const fn frame(word: TuningWord) -> [u8; FRAME_LEN] {
    let [b3, b2, b1, b0] = word.to_be_bytes();
    [CONTROL_BYTE, b3, b2, b1, b0]
}

/// DDS chip control lines
pub struct Dds<L> {
    w_clk: L,
    fq_ud: L,
    reset: L,
}

impl<L: Line> Dds<L> {
    /// Take the strobe and reset lines, all driven low
    pub fn new(mut w_clk: L, mut fq_ud: L, mut reset: L) -> Self {
        w_clk.low();
        fq_ud.low();
        reset.low();
        Self {
            w_clk,
            fq_ud,
            reset,
        }
    }

    /// Pulse RESET and leave the strobes low
    pub fn reset_chip<D: DelayNs>(&mut self, delay: &mut D) {
        self.reset.high();
        delay.delay_ms(DDS_RESET_PULSE_MS);
        self.reset.low();
        self.w_clk.low();
        self.fq_ud.low();
        debug!("DDS reset");
    }

    /// Load `word` and latch it
    ///
    /// The bus is returned to zero afterwards, which also leaves every
    /// keypad column driven low.
    pub fn program<P: ParallelPort>(&mut self, bus: &mut SharedBus<P>, word: TuningWord) {
        self.fq_ud.low();
        let mut lane = bus.dds();
        for byte in frame(word) {
            lane.put(byte);
            self.w_clk.strobe();
        }
        self.fq_ud.high();
    }

    /// Program the word for `hz` (folded and wrapped as needed)
    pub fn set_frequency<P: ParallelPort>(&mut self, bus: &mut SharedBus<P>, hz: u32) {
        let word = tuning_word_for(hz);
        trace!("DDS {} Hz -> {}", hz, word);
        self.program(bus, word);
    }
}

//! Host-side board for integration tests
//!
//! Every mock peripheral shares one [`Probe`] that records what the
//! firmware drove and advances a simulated clock on each delay. Keys are
//! scripted as time windows; a held key pulls its row low whenever its
//! column is driven low on the data bus.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use dds_siggen::board::{Board, Hardware};
use dds_siggen::config::{KEYMAP, TICK_PERIOD_MS};
use dds_siggen::drivers::dds::Dds;
use dds_siggen::drivers::keypad::Keypad;
use dds_siggen::drivers::lcd::Lcd;
use dds_siggen::generator::command::{CommandInterpreter, Outcome};
use dds_siggen::hal::bus::{ParallelPort, SharedBus};
use dds_siggen::hal::gpio::RowSense;
use dds_siggen::hal::pwm::AmplitudeOutput;
use dds_siggen::hal::watchdog::Watchdog;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

/// Simulated time after which a test is considered hung
const RUNAWAY_NS: u64 = 120_000_000_000;

/// Everything the firmware did to the board
#[derive(Debug, Default)]
pub struct Probe {
    /// Simulated time
    pub elapsed_ns: u64,
    /// Value on the data bus
    pub port: u8,
    /// Scripted presses: legend, from, until (ns)
    pub keys: Vec<(char, u64, u64)>,
    /// Row reads performed
    pub row_reads: usize,

    w_clk: bool,
    fq_ud: bool,
    pending_frame: Vec<u8>,
    /// Complete frames latched by FQ_UD, in order
    pub frames: Vec<Vec<u8>>,
    /// Tuning words latched by FQ_UD, in order
    pub words: Vec<u32>,
    /// Sync level when each word was latched
    pub word_sync: Vec<bool>,
    /// Data bus value right after each FQ_UD rising edge
    pub bus_at_latch: Vec<u8>,

    reset: bool,
    reset_since: u64,
    /// Completed DDS reset pulses
    pub reset_pulses: usize,
    /// Width of the last reset pulse
    pub last_reset_width_ns: u64,

    /// LCD register select level
    pub rs: bool,
    lcd_half: Option<u8>,
    /// Bytes written to the LCD as (rs, byte)
    pub lcd_bytes: Vec<(bool, u8)>,

    /// Sync output level
    pub sync: bool,
    /// Sync rising edges
    pub sync_rises: usize,

    /// Amplitude channel running
    pub amplitude_enabled: bool,
    /// Times the amplitude channel was started
    pub amplitude_enables: usize,
    /// Level last written, 0 once parked
    pub amplitude_level: u8,
    /// Levels written while enabled
    pub amplitude_levels: Vec<u8>,

    /// Watchdog feeds
    pub feeds: usize,
}

impl Probe {
    /// Hold `key` from `at_ms` for `hold_ms`
    pub fn press(&mut self, key: char, at_ms: u64, hold_ms: u64) {
        let from = at_ms * 1_000_000;
        self.keys.push((key, from, from + hold_ms * 1_000_000));
    }

    /// Type `keys` one after another starting at `at_ms`, 40 ms held and
    /// 20 ms apart; returns the time after the last release
    pub fn type_keys(&mut self, keys: &str, at_ms: u64) -> u64 {
        let mut t = at_ms;
        for key in keys.chars() {
            self.press(key, t, 40);
            t += 60;
        }
        t
    }

    /// Simulated time in ms
    pub fn now_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }

    fn rows(&mut self) -> u8 {
        self.row_reads += 1;
        let now = self.elapsed_ns;
        let mut rows = 0x0F;
        for &(key, from, until) in &self.keys {
            if (from..until).contains(&now) {
                let idx = KEYMAP
                    .iter()
                    .position(|&k| k == key)
                    .expect("scripted key is not on the keypad");
                let (col, row) = (idx / 4, idx % 4);
                if self.port & (1 << col) == 0 {
                    rows &= !(1 << row);
                }
            }
        }
        rows
    }
}

/// Shared handle to the probe
pub type Shared = Rc<RefCell<Probe>>;

/// Which control line a [`MockLine`] stands for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    WClk,
    FqUd,
    Reset,
    Rs,
    En,
    Sync,
}

pub struct MockPort(Shared);

impl ParallelPort for MockPort {
    fn write(&mut self, value: u8) {
        self.0.borrow_mut().port = value;
    }
}

pub struct MockLine {
    probe: Shared,
    role: Role,
}

impl ErrorType for MockLine {
    type Error = Infallible;
}

impl OutputPin for MockLine {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.drive(true);
        Ok(())
    }
}

impl MockLine {
    fn drive(&mut self, level: bool) {
        let mut p = self.probe.borrow_mut();
        match self.role {
            Role::WClk => {
                if level && !p.w_clk {
                    let byte = p.port;
                    p.pending_frame.push(byte);
                }
                p.w_clk = level;
            }
            Role::FqUd => {
                if level && !p.fq_ud {
                    let frame = std::mem::take(&mut p.pending_frame);
                    if frame.len() == 5 {
                        let word = u32::from_be_bytes([frame[1], frame[2], frame[3], frame[4]]);
                        let sync = p.sync;
                        p.words.push(word);
                        p.word_sync.push(sync);
                    }
                    let bus = p.port;
                    p.bus_at_latch.push(bus);
                    p.frames.push(frame);
                } else if !level {
                    p.pending_frame.clear();
                }
                p.fq_ud = level;
            }
            Role::Reset => {
                if level && !p.reset {
                    p.reset_since = p.elapsed_ns;
                } else if !level && p.reset {
                    p.reset_pulses += 1;
                    p.last_reset_width_ns = p.elapsed_ns - p.reset_since;
                }
                p.reset = level;
            }
            Role::Rs => p.rs = level,
            Role::En => {
                if level {
                    let nibble = p.port >> 4;
                    match p.lcd_half.take() {
                        Some(high) => {
                            let rs = p.rs;
                            p.lcd_bytes.push((rs, (high << 4) | nibble));
                        }
                        None => p.lcd_half = Some(nibble),
                    }
                }
            }
            Role::Sync => {
                if level && !p.sync {
                    p.sync_rises += 1;
                }
                p.sync = level;
            }
        }
    }
}

pub struct MockRows(Shared);

impl RowSense for MockRows {
    fn read_rows(&mut self) -> u8 {
        self.0.borrow_mut().rows()
    }
}

pub struct MockAmplitude(Shared);

impl AmplitudeOutput for MockAmplitude {
    fn enable(&mut self) {
        let mut p = self.0.borrow_mut();
        p.amplitude_enabled = true;
        p.amplitude_enables += 1;
    }

    fn disable(&mut self) {
        let mut p = self.0.borrow_mut();
        p.amplitude_enabled = false;
        p.amplitude_level = 0;
    }

    fn set_level(&mut self, level: u8) {
        let mut p = self.0.borrow_mut();
        p.amplitude_level = level;
        if p.amplitude_enabled {
            p.amplitude_levels.push(level);
        }
    }
}

pub struct MockWatchdog(Shared);

impl Watchdog for MockWatchdog {
    fn feed(&mut self) {
        self.0.borrow_mut().feeds += 1;
    }
}

pub struct MockDelay(Shared);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        let mut p = self.0.borrow_mut();
        p.elapsed_ns += u64::from(ns);
        assert!(p.elapsed_ns < RUNAWAY_NS, "simulation ran away");
    }
}

/// Host board
pub struct MockBoard;

impl Board for MockBoard {
    type Port = MockPort;
    type Line = MockLine;
    type Rows = MockRows;
    type Amplitude = MockAmplitude;
    type Watchdog = MockWatchdog;
    type Delay = MockDelay;
}

/// Fresh board and its probe
pub fn hardware() -> (Hardware<MockBoard>, Shared) {
    let probe: Shared = Rc::default();
    let line = |role| MockLine {
        probe: probe.clone(),
        role,
    };
    let hw = Hardware {
        bus: SharedBus::new(MockPort(probe.clone())),
        dds: Dds::new(line(Role::WClk), line(Role::FqUd), line(Role::Reset)),
        keypad: Keypad::new(MockRows(probe.clone())),
        lcd: Lcd::new(line(Role::Rs), line(Role::En)),
        amplitude: MockAmplitude(probe.clone()),
        sync: line(Role::Sync),
        watchdog: MockWatchdog(probe.clone()),
        delay: MockDelay(probe.clone()),
    };
    (hw, probe)
}

/// Board after the boot sequence: display reset, DDS reset, FA shown
pub fn booted() -> (Hardware<MockBoard>, Shared, CommandInterpreter) {
    let (mut hw, probe) = hardware();
    {
        let mut console = hw.console();
        console.reset();
        console.set_cursor_visible(true);
    }
    hw.reset_dds();
    let mut interpreter = CommandInterpreter::new();
    interpreter.start(&mut hw);
    (hw, probe, interpreter)
}

/// One wake-up of the main loop without handling keys
pub fn tick(hw: &mut Hardware<MockBoard>) {
    hw.delay.delay_ms(TICK_PERIOD_MS as u32);
    hw.feed_watchdog();
    hw.scan_keypad();
}

/// Run the main loop until `until_ms`, collecting every outcome
pub fn run_until(
    hw: &mut Hardware<MockBoard>,
    probe: &Shared,
    interpreter: &mut CommandInterpreter,
    until_ms: u64,
) -> Vec<Outcome> {
    let mut outcomes = Vec::new();
    while probe.borrow().now_ms() < until_ms {
        tick(hw);
        if let Some(c) = hw.keypad.getch() {
            outcomes.push(interpreter.handle(hw, c));
        }
    }
    outcomes
}

/// Text of display row `row`, trailing blanks removed
pub fn row_text(hw: &Hardware<MockBoard>, row: usize) -> String {
    let bytes = hw.lcd.row(row).expect("row on display");
    String::from_utf8_lossy(bytes).trim_end().to_string()
}

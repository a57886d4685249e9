//! Keypad Matrix Scanner
//!
//! 4x4 matrix: four column lines on the lower nibble of the shared bus,
//! four pulled-up row inputs. One scan drives each column low in turn and
//! samples the rows.
//!
//! Each key keeps a shift register of its last eight samples. A key is
//! emitted once, when the history shows a released sample followed by
//! [`KEYPAD_DEBOUNCE_SCANS`] pressed samples. Chatter shorter than that
//! never emits, and a held key does not auto-repeat.
//!
//! Emitted legends go into a small FIFO; keys arriving while it is full
//! are dropped.

use embedded_hal::delay::DelayNs;
use heapless::Deque;

use crate::config::{KEYMAP, KEYPAD_BUFFER_SIZE, KEYPAD_DEBOUNCE_SCANS, KEYPAD_SETTLE_US};
use crate::hal::bus::{ParallelPort, SharedBus};
use crate::hal::gpio::{RowSense, ROWS_RELEASED};

/// History bits inspected for a new press
const CONFIRM_MASK: u8 = (1 << (KEYPAD_DEBOUNCE_SCANS + 1)) - 1;

/// One released sample, then the confirming pressed samples
const CONFIRM_PATTERN: u8 = (1 << KEYPAD_DEBOUNCE_SCANS) - 1;

const COLUMNS: u8 = 4;
const ROWS: u8 = 4;

/// Debounced keypad with a FIFO of pending legends
pub struct Keypad<R> {
    rows: R,
    history: [u8; KEYMAP.len()],
    queue: Deque<char, KEYPAD_BUFFER_SIZE>,
}

impl<R: RowSense> Keypad<R> {
    /// Create with empty history and queue
    pub const fn new(rows: R) -> Self {
        Self {
            rows,
            history: [0; KEYMAP.len()],
            queue: Deque::new(),
        }
    }

    /// Sample every key once and queue newly confirmed presses
    ///
    /// The columns are back low when this returns.
    pub fn scan<P: ParallelPort, D: DelayNs>(&mut self, bus: &mut SharedBus<P>, delay: &mut D) {
        {
            let mut columns = bus.columns();
            for col in 0..COLUMNS {
                columns.select(col);
                delay.delay_us(KEYPAD_SETTLE_US);
                let rows = self.rows.read_rows();
                for row in 0..ROWS {
                    let idx = usize::from(col * ROWS + row);
                    let pressed = rows & (1 << row) == 0;
                    self.history[idx] = (self.history[idx] << 1) | u8::from(pressed);
                }
            }
        }

        for idx in 0..KEYMAP.len() {
            if self.history[idx] & CONFIRM_MASK == CONFIRM_PATTERN {
                self.push(KEYMAP[idx]);
            }
        }
    }

    /// True if any key is down
    ///
    /// Reads the rows only; valid while every column is driven low, which
    /// is the idle state of the shared bus.
    pub fn pressed(&mut self) -> bool {
        self.rows.read_rows() & ROWS_RELEASED != ROWS_RELEASED
    }

    /// Drive every column low, settle, then check for any held key
    pub fn read_all<P: ParallelPort, D: DelayNs>(
        &mut self,
        bus: &mut SharedBus<P>,
        delay: &mut D,
    ) -> bool {
        bus.columns().select_all();
        delay.delay_us(KEYPAD_SETTLE_US);
        self.pressed()
    }

    /// Oldest pending legend
    pub fn getch(&mut self) -> Option<char> {
        self.queue.pop_front()
    }

    /// True if a legend is pending
    #[must_use]
    pub fn ready(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Number of pending legends
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Discard every pending legend
    pub fn flush(&mut self) {
        self.queue.clear();
    }

    fn push(&mut self, key: char) {
        if self.queue.push_back(key).is_err() {
            warn!("keypad buffer full, dropped {}", key);
        } else {
            trace!("key {}", key);
        }
    }
}

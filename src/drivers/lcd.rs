//! Character Display Driver
//!
//! HD44780-compatible 2x16 display on a 4-bit interface: D4-D7 on the
//! upper nibble of the shared bus plus RS and E control lines.
//!
//! A framebuffer mirrors the visible text so that a newline on the last
//! row can scroll: the top row is dropped and both rows are rewritten.
//!
//! [`Lcd`] owns the control lines and the framebuffer. Writing needs the
//! bus and a delay as well, so output goes through a short-lived
//! [`Console`] obtained from [`Lcd::attach`].
//!
//! Control characters understood by [`Console::print_char`]:
//!
//! | Byte   | Effect                                   |
//! |--------|------------------------------------------|
//! | `\x08` | cursor left one column                   |
//! | `\x0B` | home                                     |
//! | `\t`   | cursor right one column                  |
//! | `\x0C` | clear                                    |
//! | `\n`   | next row, scrolling on the last row      |
//! | `\r`   | column 0 of the current row              |

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::config::{DISPLAY_COLUMNS, DISPLAY_ROWS};
use crate::hal::bus::{ParallelPort, SharedBus};
use crate::hal::gpio::Line;

/// HD44780 instruction set (subset)
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_INCREMENT: u8 = 0x06;
    pub const DISPLAY_ON: u8 = 0x0C;
    pub const DISPLAY_ON_CURSOR_BLINK: u8 = 0x0F;
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address offset between rows
const ROW_STRIDE: usize = 0x40;

/// Execution time of ordinary instructions
const COMMAND_DELAY_US: u32 = 50;

/// Execution time of clear and home
const CLEAR_DELAY_MS: u32 = 2;

/// Power-on wait before the first instruction
const POWER_ON_DELAY_MS: u32 = 20;

/// Wait between the 8-bit wake-up nibbles
const WAKE_DELAY_MS: u32 = 5;

/// Display state and control lines
pub struct Lcd<L> {
    rs: L,
    en: L,
    frame: [[u8; DISPLAY_COLUMNS]; DISPLAY_ROWS],
    cx: usize,
    cy: usize,
    show_cursor: bool,
}

impl<L: Line> Lcd<L> {
    /// Take the RS and E lines; call [`Console::reset`] before use
    pub fn new(mut rs: L, mut en: L) -> Self {
        rs.low();
        en.low();
        Self {
            rs,
            en,
            frame: [[b' '; DISPLAY_COLUMNS]; DISPLAY_ROWS],
            cx: 0,
            cy: 0,
            show_cursor: false,
        }
    }

    /// Borrow the bus and a delay for output
    pub fn attach<'a, P: ParallelPort, D: DelayNs>(
        &'a mut self,
        bus: &'a mut SharedBus<P>,
        delay: &'a mut D,
    ) -> Console<'a, L, P, D> {
        Console {
            lcd: self,
            bus,
            delay,
        }
    }

    /// Text of `row` as shown
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[u8; DISPLAY_COLUMNS]> {
        self.frame.get(row)
    }

    /// Cursor position as (column, row)
    ///
    /// The column may equal [`DISPLAY_COLUMNS`] right after the last cell
    /// of a row was written; the next character then wraps.
    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        (self.cx, self.cy)
    }

    /// True if the blinking cursor is enabled
    #[must_use]
    pub const fn cursor_visible(&self) -> bool {
        self.show_cursor
    }
}

/// Display borrowed together with the bus and a delay
pub struct Console<'a, L, P: ParallelPort, D> {
    lcd: &'a mut Lcd<L>,
    bus: &'a mut SharedBus<P>,
    delay: &'a mut D,
}

impl<L: Line, P: ParallelPort, D: DelayNs> Console<'_, L, P, D> {
    /// Run the 4-bit initialization sequence and clear
    pub fn reset(&mut self) {
        self.delay.delay_ms(POWER_ON_DELAY_MS);
        self.lcd.rs.low();
        for _ in 0..3 {
            self.wake_nibble(0x03);
        }
        self.wake_nibble(0x02);
        self.command(cmd::FUNCTION_4BIT_2LINE);
        self.command(cmd::ENTRY_INCREMENT);
        self.lcd.show_cursor = false;
        self.clear();
        debug!("display reset");
    }

    /// Blank the display and home the cursor
    pub fn clear(&mut self) {
        self.command(cmd::DISPLAY_ON);
        self.command(cmd::CLEAR);
        self.delay.delay_ms(CLEAR_DELAY_MS);
        self.lcd.frame = [[b' '; DISPLAY_COLUMNS]; DISPLAY_ROWS];
        self.lcd.cx = 0;
        self.lcd.cy = 0;
        self.restore_cursor_mode();
    }

    /// Move the cursor to the top-left cell
    pub fn home(&mut self) {
        self.lcd.cx = 0;
        self.lcd.cy = 0;
        self.command(cmd::HOME);
        self.delay.delay_ms(CLEAR_DELAY_MS);
        self.restore_cursor_mode();
    }

    /// Show or hide the blinking cursor
    pub fn set_cursor_visible(&mut self, on: bool) {
        self.lcd.show_cursor = on;
        self.restore_cursor_mode();
    }

    /// Move the cursor, clamped to the visible area
    pub fn set_cursor(&mut self, x: usize, y: usize) {
        self.move_to(x.min(DISPLAY_COLUMNS - 1), y.min(DISPLAY_ROWS - 1));
    }

    /// Print one byte, interpreting the control characters
    pub fn print_char(&mut self, c: u8) {
        let (cx, cy) = (self.lcd.cx, self.lcd.cy);
        match c {
            0x08 => {
                if cx > 0 {
                    self.move_to(cx - 1, cy);
                }
            }
            0x0B => self.home(),
            b'\t' => {
                if cx + 1 < DISPLAY_COLUMNS {
                    self.move_to(cx + 1, cy);
                }
            }
            0x0C => self.clear(),
            b'\n' => {
                if cy + 1 < DISPLAY_ROWS {
                    self.move_to(cx, cy + 1);
                } else {
                    self.scroll_up();
                }
            }
            b'\r' => self.move_to(0, cy),
            _ => {
                if cx >= DISPLAY_COLUMNS {
                    if cy + 1 < DISPLAY_ROWS {
                        self.move_to(0, cy + 1);
                    } else {
                        self.lcd.cx = 0;
                        self.scroll_up();
                    }
                }
                let (cx, cy) = (self.lcd.cx, self.lcd.cy);
                self.lcd.frame[cy][cx] = c;
                self.data(c);
                self.lcd.cx = cx + 1;
            }
        }
    }

    /// Print every byte of `s`
    pub fn print_str(&mut self, s: &str) {
        for b in s.bytes() {
            self.print_char(b);
        }
    }

    /// Print a signed decimal
    pub fn print_int(&mut self, n: i32) {
        if n < 0 {
            self.print_char(b'-');
        }
        self.print_uint(n.unsigned_abs());
    }

    /// Print an unsigned decimal
    pub fn print_uint(&mut self, mut n: u32) {
        let mut digits = [0u8; 10];
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for &d in digits[..len].iter().rev() {
            self.print_char(d);
        }
    }

    fn move_to(&mut self, x: usize, y: usize) {
        self.lcd.cx = x;
        self.lcd.cy = y;
        self.set_address(x, y);
    }

    fn set_address(&mut self, x: usize, y: usize) {
        let addr = (y * ROW_STRIDE + x.min(DISPLAY_COLUMNS - 1)) as u8;
        self.command(cmd::SET_DDRAM | addr);
    }

    fn scroll_up(&mut self) {
        self.lcd.frame.rotate_left(1);
        self.lcd.frame[DISPLAY_ROWS - 1] = [b' '; DISPLAY_COLUMNS];
        for row in 0..DISPLAY_ROWS {
            self.set_address(0, row);
            for col in 0..DISPLAY_COLUMNS {
                let b = self.lcd.frame[row][col];
                self.data(b);
            }
        }
        self.lcd.cy = DISPLAY_ROWS - 1;
        self.set_address(self.lcd.cx, self.lcd.cy);
    }

    fn restore_cursor_mode(&mut self) {
        let mode = if self.lcd.show_cursor {
            cmd::DISPLAY_ON_CURSOR_BLINK
        } else {
            cmd::DISPLAY_ON
        };
        self.command(mode);
    }

    fn wake_nibble(&mut self, nibble: u8) {
        {
            let mut lane = self.bus.display();
            lane.put_low(nibble);
            self.lcd.en.strobe();
        }
        self.delay.delay_ms(WAKE_DELAY_MS);
    }

    fn command(&mut self, c: u8) {
        self.lcd.rs.low();
        self.write(c);
    }

    fn data(&mut self, d: u8) {
        self.lcd.rs.high();
        self.write(d);
    }

    fn write(&mut self, byte: u8) {
        {
            let mut lane = self.bus.display();
            lane.put_high(byte);
            self.lcd.en.strobe();
            lane.put_low(byte);
            self.lcd.en.strobe();
        }
        self.delay.delay_us(COMMAND_DELAY_US);
    }
}

impl<L: Line, P: ParallelPort, D: DelayNs> fmt::Write for Console<'_, L, P, D> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print_str(s);
        Ok(())
    }
}

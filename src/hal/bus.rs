//! Shared Parallel Bus
//!
//! One physical 8-bit port serves three peripherals:
//!
//! | Lane          | Bits | Driven                                  |
//! |---------------|------|-----------------------------------------|
//! | DDS data      | 0-7  | transiently, during a tuning-word write |
//! | LCD data      | 4-7  | one nibble per enable strobe            |
//! | Keypad column | 0-3  | one column low while it is scanned      |
//!
//! [`SharedBus`] is the single owner of the port. A lane mutably borrows
//! the bus, so exactly one protocol can drive it in any scope, and each
//! lane puts its bits back to the idle level when dropped. Idle is all
//! zeros: every keypad column driven low, which lets a level check see
//! any held key without a scan.

/// 8-bit output port
pub trait ParallelPort {
    /// Drive all eight lines
    fn write(&mut self, value: u8);
}

/// Lower nibble: keypad columns
const COLUMN_MASK: u8 = 0x0F;

/// Upper nibble: LCD data lines D4-D7
const DISPLAY_MASK: u8 = 0xF0;

/// Owner of the multiplexed bus
pub struct SharedBus<P: ParallelPort> {
    port: P,
    latch: u8,
}

impl<P: ParallelPort> SharedBus<P> {
    /// Take ownership of the port and drive it idle
    pub fn new(mut port: P) -> Self {
        port.write(0);
        Self { port, latch: 0 }
    }

    /// Value currently driven
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.latch
    }

    /// Borrow the full width for a DDS write
    pub fn dds(&mut self) -> DdsLane<'_, P> {
        DdsLane { bus: self }
    }

    /// Borrow the upper nibble for the display
    pub fn display(&mut self) -> DisplayLane<'_, P> {
        DisplayLane { bus: self }
    }

    /// Borrow the lower nibble for keypad columns
    pub fn columns(&mut self) -> ColumnLane<'_, P> {
        ColumnLane { bus: self }
    }

    /// Give the port back
    pub fn release(self) -> P {
        self.port
    }

    fn drive(&mut self, value: u8) {
        self.latch = value;
        self.port.write(value);
    }
}

/// Full-width access for the DDS write protocol
pub struct DdsLane<'a, P: ParallelPort> {
    bus: &'a mut SharedBus<P>,
}

impl<P: ParallelPort> DdsLane<'_, P> {
    /// Present one byte on the bus
    pub fn put(&mut self, byte: u8) {
        self.bus.drive(byte);
    }
}

impl<P: ParallelPort> Drop for DdsLane<'_, P> {
    fn drop(&mut self) {
        self.bus.drive(0);
    }
}

/// Upper-nibble access for the 4-bit LCD interface
pub struct DisplayLane<'a, P: ParallelPort> {
    bus: &'a mut SharedBus<P>,
}

impl<P: ParallelPort> DisplayLane<'_, P> {
    /// Present the high nibble of `byte` on D4-D7
    pub fn put_high(&mut self, byte: u8) {
        let v = (self.bus.latch & COLUMN_MASK) | (byte & DISPLAY_MASK);
        self.bus.drive(v);
    }

    /// Present the low nibble of `byte` on D4-D7
    pub fn put_low(&mut self, byte: u8) {
        let v = (self.bus.latch & COLUMN_MASK) | ((byte << 4) & DISPLAY_MASK);
        self.bus.drive(v);
    }
}

impl<P: ParallelPort> Drop for DisplayLane<'_, P> {
    fn drop(&mut self) {
        let v = self.bus.latch & COLUMN_MASK;
        self.bus.drive(v);
    }
}

/// Lower-nibble access for keypad column drive
pub struct ColumnLane<'a, P: ParallelPort> {
    bus: &'a mut SharedBus<P>,
}

impl<P: ParallelPort> ColumnLane<'_, P> {
    /// Drive column `col` (0-3) low and the others high
    pub fn select(&mut self, col: u8) {
        let v = (self.bus.latch & DISPLAY_MASK) | (!(1u8 << (col & 3)) & COLUMN_MASK);
        self.bus.drive(v);
    }

    /// Drive every column low
    pub fn select_all(&mut self) {
        let v = self.bus.latch & DISPLAY_MASK;
        self.bus.drive(v);
    }
}

impl<P: ParallelPort> Drop for ColumnLane<'_, P> {
    fn drop(&mut self) {
        self.select_all();
    }
}

/// Eight push-pull outputs forming the data bus
#[cfg(feature = "embedded")]
pub struct GpioPort<'d> {
    pins: [embassy_stm32::gpio::Output<'d>; 8],
}

#[cfg(feature = "embedded")]
impl<'d> GpioPort<'d> {
    /// Create from D0..D7 in bit order
    #[must_use]
    pub fn new(pins: [embassy_stm32::gpio::Output<'d>; 8]) -> Self {
        Self { pins }
    }
}

#[cfg(feature = "embedded")]
impl ParallelPort for GpioPort<'_> {
    fn write(&mut self, value: u8) {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            if value & (1 << bit) != 0 {
                pin.set_high();
            } else {
                pin.set_low();
            }
        }
    }
}

//! Board Aggregate
//!
//! [`Hardware`] owns every peripheral the generator touches. It is built
//! once at startup, owned by the control loop and lent by `&mut` to the
//! engines; nothing lives in globals.
//!
//! The [`Board`] trait names the concrete peripheral types, so the same
//! control logic runs on the STM32 target and against host mocks.

use embedded_hal::delay::DelayNs;

use crate::drivers::dds::Dds;
use crate::drivers::keypad::Keypad;
use crate::drivers::lcd::{Console, Lcd};
use crate::hal::bus::{ParallelPort, SharedBus};
use crate::hal::gpio::{Line, RowSense};
use crate::hal::pwm::AmplitudeOutput;
use crate::hal::watchdog::Watchdog;
use crate::types::TuningWord;

/// Peripheral types of one board
pub trait Board {
    /// Shared 8-bit data bus
    type Port: ParallelPort;
    /// Control output line
    type Line: Line;
    /// Keypad row inputs
    type Rows: RowSense;
    /// AM amplitude channel
    type Amplitude: AmplitudeOutput;
    /// Hardware watchdog
    type Watchdog: Watchdog;
    /// Busy-wait delay usable with interrupts disabled
    type Delay: DelayNs;
}

/// Every peripheral of the generator
pub struct Hardware<B: Board> {
    /// Data bus shared by DDS, keypad columns and display
    pub bus: SharedBus<B::Port>,
    /// DDS control lines
    pub dds: Dds<B::Line>,
    /// Keypad scanner and FIFO
    pub keypad: Keypad<B::Rows>,
    /// Display state
    pub lcd: Lcd<B::Line>,
    /// AM amplitude channel
    pub amplitude: B::Amplitude,
    /// Sweep sync output, high during each ramp
    pub sync: B::Line,
    /// Hardware watchdog
    pub watchdog: B::Watchdog,
    /// Busy-wait delay
    pub delay: B::Delay,
}

impl<B: Board> Hardware<B> {
    /// Program the DDS for `hz`
    pub fn set_frequency(&mut self, hz: u32) {
        self.dds.set_frequency(&mut self.bus, hz);
    }

    /// Program a precomputed tuning word
    pub fn program(&mut self, word: TuningWord) {
        self.dds.program(&mut self.bus, word);
    }

    /// Pulse the DDS reset line
    pub fn reset_dds(&mut self) {
        self.dds.reset_chip(&mut self.delay);
    }

    /// One keypad scan
    pub fn scan_keypad(&mut self) {
        self.keypad.scan(&mut self.bus, &mut self.delay);
    }

    /// True if any key is down, assuming idle columns
    pub fn key_held(&mut self) -> bool {
        self.keypad.pressed()
    }

    /// True once every key is up
    pub fn keys_released(&mut self) -> bool {
        !self.keypad.read_all(&mut self.bus, &mut self.delay)
    }

    /// Restart the watchdog timeout
    pub fn feed_watchdog(&mut self) {
        self.watchdog.feed();
    }

    /// Borrow the display for output
    pub fn console(&mut self) -> Console<'_, B::Line, B::Port, B::Delay> {
        self.lcd.attach(&mut self.bus, &mut self.delay)
    }
}

/// STM32G474 wiring
#[cfg(feature = "embedded")]
pub mod stm32 {
    use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
    use embassy_stm32::peripherals::{IWDG, TIM1};
    use embassy_stm32::time::khz;
    use embassy_stm32::timer::low_level::CountingMode;
    use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
    use embassy_stm32::wdg::IndependentWatchdog;
    use embassy_stm32::Peripherals;

    use super::{Board, Hardware};
    use crate::config::{timers, SYSTEM_CLOCK_HZ, WATCHDOG_TIMEOUT_US};
    use crate::drivers::dds::Dds;
    use crate::drivers::keypad::Keypad;
    use crate::drivers::lcd::Lcd;
    use crate::hal::bus::{GpioPort, SharedBus};
    use crate::hal::gpio::RowInputs;
    use crate::hal::pwm::AmplitudePwm;
    use crate::hal::timer::CycleDelay;

    /// The production board
    pub struct Stm32Board;

    impl Board for Stm32Board {
        type Port = GpioPort<'static>;
        type Line = Output<'static>;
        type Rows = RowInputs<'static>;
        type Amplitude = AmplitudePwm<'static>;
        type Watchdog = IndependentWatchdog<'static, IWDG>;
        type Delay = CycleDelay;
    }

    /// Claim the generator's pins and timers
    ///
    /// The watchdog is configured but not started.
    #[must_use]
    pub fn take(p: Peripherals) -> Hardware<Stm32Board> {
        let port = GpioPort::new([
            Output::new(p.PB0, Level::Low, Speed::VeryHigh),
            Output::new(p.PB1, Level::Low, Speed::VeryHigh),
            Output::new(p.PB2, Level::Low, Speed::VeryHigh),
            Output::new(p.PB3, Level::Low, Speed::VeryHigh),
            Output::new(p.PB4, Level::Low, Speed::VeryHigh),
            Output::new(p.PB5, Level::Low, Speed::VeryHigh),
            Output::new(p.PB6, Level::Low, Speed::VeryHigh),
            Output::new(p.PB7, Level::Low, Speed::VeryHigh),
        ]);

        let dds = Dds::new(
            Output::new(p.PC0, Level::Low, Speed::VeryHigh),
            Output::new(p.PB8, Level::Low, Speed::VeryHigh),
            Output::new(p.PC1, Level::Low, Speed::Low),
        );

        let rows = RowInputs::new([
            Input::new(p.PC2, Pull::Up),
            Input::new(p.PC3, Pull::Up),
            Input::new(p.PC4, Pull::Up),
            Input::new(p.PC5, Pull::Up),
        ]);

        let lcd = Lcd::new(
            Output::new(p.PB11, Level::Low, Speed::Low),
            Output::new(p.PB12, Level::Low, Speed::Low),
        );

        let pwm: SimplePwm<'static, TIM1> = SimplePwm::new(
            p.TIM1,
            Some(PwmPin::new_ch1(p.PA8, OutputType::PushPull)),
            None,
            None,
            None,
            khz(timers::AM_PWM_KHZ),
            CountingMode::EdgeAlignedUp,
        );

        Hardware {
            bus: SharedBus::new(port),
            dds,
            keypad: Keypad::new(rows),
            lcd,
            amplitude: AmplitudePwm::new(pwm),
            sync: Output::new(p.PB10, Level::Low, Speed::Low),
            watchdog: IndependentWatchdog::new(p.IWDG, WATCHDOG_TIMEOUT_US),
            delay: CycleDelay::new(SYSTEM_CLOCK_HZ),
        }
    }
}

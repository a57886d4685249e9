//! PWM Driver
//!
//! Amplitude output for AM: an 8-bit sample sets the duty cycle of a
//! timer channel feeding the DDS output stage.

/// Duty cycle (0-65535)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct DutyCycle(u16);

impl DutyCycle {
    /// 0% duty cycle
    pub const ZERO: Self = Self(0);

    /// 100% duty cycle
    pub const FULL: Self = Self(65535);

    /// Expand an 8-bit sample to the full range
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        Self(level as u16 * 257)
    }

    /// Get raw 16-bit value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Compare value for a timer counting to `max`
    #[must_use]
    pub fn scaled(self, max: u16) -> u16 {
        ((u32::from(self.0) * u32::from(max)) / 65535) as u16
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DutyCycle {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}%", (u32::from(self.0) * 100) / 65535);
    }
}

/// Secondary amplitude channel
pub trait AmplitudeOutput {
    /// Start the PWM output
    fn enable(&mut self);

    /// Stop the PWM output and park it low
    fn disable(&mut self);

    /// Set the next amplitude sample
    fn set_level(&mut self, level: u8);
}

/// AM output on TIM1 channel 1
#[cfg(feature = "embedded")]
pub struct AmplitudePwm<'d> {
    pwm: embassy_stm32::timer::simple_pwm::SimplePwm<'d, embassy_stm32::peripherals::TIM1>,
}

#[cfg(feature = "embedded")]
impl<'d> AmplitudePwm<'d> {
    /// Wrap a configured PWM timer; the channel starts disabled
    #[must_use]
    pub fn new(
        mut pwm: embassy_stm32::timer::simple_pwm::SimplePwm<'d, embassy_stm32::peripherals::TIM1>,
    ) -> Self {
        let mut ch = pwm.ch1();
        ch.set_duty_cycle(0);
        ch.disable();
        Self { pwm }
    }
}

#[cfg(feature = "embedded")]
impl AmplitudeOutput for AmplitudePwm<'_> {
    fn enable(&mut self) {
        self.pwm.ch1().enable();
    }

    fn disable(&mut self) {
        let mut ch = self.pwm.ch1();
        ch.set_duty_cycle(0);
        ch.disable();
    }

    fn set_level(&mut self, level: u8) {
        let mut ch = self.pwm.ch1();
        let max = ch.max_duty_cycle();
        ch.set_duty_cycle(DutyCycle::from_level(level).scaled(max));
    }
}

//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the signal generator
//! hardware. Clock ratios, timing intervals, pin mappings and UI limits
//! are centralized here.

/// System clock frequency (STM32G474 on its default 16 MHz HSI)
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;

/// DDS reference clock (fixed 125 MHz oscillator on the module)
pub const REFERENCE_CLOCK_HZ: u32 = 125_000_000;

/// Half the reference clock; targets above this are folded to their alias
pub const ALIAS_FOLD_HZ: u32 = REFERENCE_CLOCK_HZ / 2;

/// Highest frequency that may be committed to FA/FB
pub const MAX_FREQUENCY_HZ: u32 = 124_999_900;

/// Lowest carrier that can take the full FM deviation
pub const MIN_FM_CARRIER_HZ: u32 = 75_000;

/// Peak FM deviation
pub const FM_DEVIATION_HZ: i32 = 75_000;

/// Default primary frequency (FA) at boot
pub const DEFAULT_FA_HZ: u32 = 1_000_000;

/// Default secondary frequency (FB) at boot
pub const DEFAULT_FB_HZ: u32 = 9_000_000;

/// Number of entries in one modulation period
pub const MODULATION_TABLE_LEN: usize = 32;

/// Hold between FM samples in microseconds
pub const FM_SAMPLE_INTERVAL_US: u32 = 11;

/// Hold between AM samples in microseconds
pub const AM_SAMPLE_INTERVAL_US: u32 = 12;

/// Steps in one sweep ramp
pub const SWEEP_STEPS: u32 = 256;

/// Dwell per sweep step in microseconds
pub const SWEEP_STEP_DELAY_US: u32 = 500;

/// Settle time around the low endpoint between ramps
pub const SWEEP_SETTLE_MS: u32 = 10;

/// DDS reset pulse width in milliseconds
pub const DDS_RESET_PULSE_MS: u32 = 1;

/// Main loop wake-up period (watchdog service and keypad scan)
pub const TICK_PERIOD_MS: u64 = 4;

/// Independent watchdog timeout in microseconds
pub const WATCHDOG_TIMEOUT_US: u32 = 4_000_000;

/// Keypad FIFO depth
pub const KEYPAD_BUFFER_SIZE: usize = 8;

/// Column settle time before the rows are sampled
pub const KEYPAD_SETTLE_US: u32 = 2;

/// Consecutive pressed scans needed before a key is emitted
pub const KEYPAD_DEBOUNCE_SCANS: u32 = 4;

/// Key legends in scan order (column-major, four rows per column)
pub const KEYMAP: [char; 16] = [
    'A', '3', '2', '1', //
    'B', '6', '5', '4', //
    'C', '9', '8', '7', //
    'D', '#', '0', '*',
];

/// Display rows
pub const DISPLAY_ROWS: usize = 2;

/// Display columns
pub const DISPLAY_COLUMNS: usize = 16;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Shared data bus bit 0..7 (DDS D0-D7, keypad columns on 0-3, LCD D4-D7 on 4-7)
    pub const DATA_BUS: [&str; 8] = ["PB0", "PB1", "PB2", "PB3", "PB4", "PB5", "PB6", "PB7"];

    /// DDS write clock
    pub const DDS_W_CLK: &str = "PC0";

    /// DDS reset
    pub const DDS_RESET: &str = "PC1";

    /// DDS frequency update strobe
    pub const DDS_FQ_UD: &str = "PB8";

    /// Keypad row inputs (pulled up)
    pub const KEYPAD_ROWS: [&str; 4] = ["PC2", "PC3", "PC4", "PC5"];

    /// AM amplitude PWM output (TIM1 CH1)
    pub const AM_PWM: &str = "PA8";

    /// Sweep sync output
    pub const SWEEP_SYNC: &str = "PB10";

    /// LCD register select
    pub const LCD_RS: &str = "PB11";

    /// LCD enable strobe
    pub const LCD_E: &str = "PB12";
}

/// Timer assignments
pub mod timers {
    //! Hardware timer assignments

    /// AM amplitude PWM timer
    pub const AM_PWM: u8 = 1;

    /// AM PWM carrier frequency in kHz
    pub const AM_PWM_KHZ: u32 = 62;
}

//! DDS Signal Generator Main Application
//!
//! Entry point for the STM32G474 board. Brings up the display and the DDS,
//! then wakes every few milliseconds to feed the watchdog, scan the
//! keypad and act on at most one key.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use dds_siggen::board::stm32;
use dds_siggen::prelude::*;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("DDS Signal Generator Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Default clock configuration: 16 MHz HSI, matching SYSTEM_CLOCK_HZ
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    let mut hw = stm32::take(p);
    hw.watchdog.unleash();
    info!("Watchdog armed: timeout={=u32}us", WATCHDOG_TIMEOUT_US);

    {
        let mut console = hw.console();
        console.reset();
        console.set_cursor_visible(true);
    }
    hw.reset_dds();

    let mut interpreter = CommandInterpreter::new();
    interpreter.start(&mut hw);

    info!("Entering main loop");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
    loop {
        ticker.next().await;
        hw.feed_watchdog();
        hw.scan_keypad();

        if let Some(c) = hw.keypad.getch() {
            let outcome = interpreter.handle(&mut hw, c);
            debug!("{} -> {}", c, outcome);
        }
    }
}

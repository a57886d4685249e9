//! Command Interpreter Tests
//!
//! End-to-end keypad sessions against the host board: entry, commit,
//! error acknowledgment, sweep and modulation
//! Run with: cargo test --features std --test command_tests

mod common;

use common::{booted, row_text, run_until};
use dds_siggen::dsp::ramp::SweepParameters;
use dds_siggen::dsp::tuning::tuning_word_for;
use dds_siggen::error::GeneratorError;
use dds_siggen::generator::command::Outcome;
use dds_siggen::types::{Frequency, Modulation, Slot};

fn word(hz: u32) -> u32 {
    tuning_word_for(hz).raw()
}

fn hz(v: u32) -> Frequency {
    Frequency::from_hz_const(v)
}

// =============================================================================
// Startup Tests
// =============================================================================

#[test]
fn test_start_shows_fa_and_tunes() {
    let (hw, probe, interpreter) = booted();

    assert_eq!(row_text(&hw, 0), "FA=1000000");
    assert_eq!(row_text(&hw, 1), "");
    assert_eq!(hw.lcd.cursor(), (0, 1));
    assert!(hw.lcd.cursor_visible());
    assert_eq!(probe.borrow().words, [word(1_000_000)]);
    assert_eq!(probe.borrow().reset_pulses, 1);
    assert_eq!(interpreter.state().fb(), hz(9_000_000));
}

#[test]
fn test_unknown_character_ignored() {
    let (mut hw, probe, mut interpreter) = booted();
    assert_eq!(interpreter.handle(&mut hw, 'x'), Outcome::Ignored);
    assert_eq!(probe.borrow().words.len(), 1);
}

// =============================================================================
// Entry Tests
// =============================================================================

#[test]
fn test_digits_then_delete() {
    let (mut hw, probe, mut interpreter) = booted();
    let t0 = probe.borrow().now_ms() + 10;
    let end = probe.borrow_mut().type_keys("123D", t0);

    let outcomes = run_until(&mut hw, &probe, &mut interpreter, end + 20);

    assert_eq!(
        outcomes,
        [Outcome::Entry(1), Outcome::Entry(12), Outcome::Entry(123), Outcome::Entry(12)]
    );
    assert_eq!(row_text(&hw, 1), "12");
    assert_eq!(interpreter.state().entry(), 12);
    // entry alone never retunes
    assert_eq!(probe.borrow().words.len(), 1);
}

// =============================================================================
// Commit Tests
// =============================================================================

#[test]
fn test_commit_fa() {
    let (mut hw, probe, mut interpreter) = booted();
    let t0 = probe.borrow().now_ms() + 10;
    let end = probe.borrow_mut().type_keys("7030000A", t0);

    let outcomes = run_until(&mut hw, &probe, &mut interpreter, end + 20);

    assert_eq!(outcomes.last(), Some(&Outcome::Committed(Slot::A, hz(7_030_000))));
    assert_eq!(row_text(&hw, 0), "FA=7030000");
    assert_eq!(probe.borrow().words.last(), Some(&word(7_030_000)));
    assert_eq!(interpreter.state().fa(), hz(7_030_000));
    assert_eq!(interpreter.state().entry(), 0);
}

#[test]
fn test_commit_fb_tunes_to_fb() {
    let (mut hw, probe, mut interpreter) = booted();
    let t0 = probe.borrow().now_ms() + 10;
    let end = probe.borrow_mut().type_keys("500B", t0);

    let outcomes = run_until(&mut hw, &probe, &mut interpreter, end + 20);

    assert_eq!(outcomes.last(), Some(&Outcome::Committed(Slot::B, hz(500))));
    assert_eq!(row_text(&hw, 0), "FB=500");
    assert_eq!(probe.borrow().words.last(), Some(&word(500)));
    assert_eq!(interpreter.state().fa(), hz(1_000_000));
}

#[test]
fn test_commit_top_of_band() {
    let (mut hw, probe, mut interpreter) = booted();
    let t0 = probe.borrow().now_ms() + 10;
    let end = probe.borrow_mut().type_keys("124999900A", t0);

    let outcomes = run_until(&mut hw, &probe, &mut interpreter, end + 20);

    assert_eq!(outcomes.last(), Some(&Outcome::Committed(Slot::A, hz(124_999_900))));
    assert_eq!(row_text(&hw, 0), "FA=124999900");
    // folded to the 100 Hz alias
    assert_eq!(probe.borrow().words.last(), Some(&word(100)));
}

#[test]
fn test_out_of_range_needs_acknowledgment() {
    let (mut hw, probe, mut interpreter) = booted();
    let t0 = probe.borrow().now_ms() + 10;
    let end = probe.borrow_mut().type_keys("125000000A", t0);
    probe.borrow_mut().press('7', end + 100, 40);

    let outcomes = run_until(&mut hw, &probe, &mut interpreter, end + 300);

    assert_eq!(outcomes.len(), 10);
    assert_eq!(outcomes[9], Outcome::Rejected(GeneratorError::OutOfRange));
    // the acknowledging key is not taken as a digit
    assert_eq!(interpreter.state().entry(), 0);
    assert_eq!(interpreter.state().fa(), hz(1_000_000));
    assert_eq!(row_text(&hw, 0), "FA=1000000");
    assert_eq!(probe.borrow().words.last(), Some(&word(1_000_000)));
    // the error stayed up until the acknowledgment
    assert!(probe.borrow().now_ms() >= end + 100);
}

// =============================================================================
// Sweep Tests
// =============================================================================

#[test]
fn test_sweep_from_keypad_normalizes_without_persisting() {
    let (mut hw, probe, mut interpreter) = booted();
    let t0 = probe.borrow().now_ms() + 10;
    let end = probe.borrow_mut().type_keys("500BC", t0);
    probe.borrow_mut().press('9', end + 100, 700);

    let outcomes = run_until(&mut hw, &probe, &mut interpreter, end + 1_200);

    assert_eq!(outcomes.len(), 5);
    assert_eq!(outcomes[3], Outcome::Committed(Slot::B, hz(500)));
    let Outcome::Swept { ramps } = outcomes[4] else {
        panic!("expected a sweep, got {:?}", outcomes[4]);
    };
    assert!(ramps >= 1);

    let expected: Vec<u32> = SweepParameters::from_bounds(hz(1_000_000), hz(500))
        .ramp()
        .map(word)
        .collect();
    let p = probe.borrow();
    // start, commit FB, then the first ramp from 500 Hz upward
    assert_eq!(p.words[2..2 + expected.len()], expected[..]);
    assert_eq!(p.words.last(), Some(&word(1_000_000)));

    assert_eq!(interpreter.state().fa(), hz(1_000_000));
    assert_eq!(interpreter.state().fb(), hz(500));
    assert_eq!(row_text(&hw, 0), "FA=1000000");
}

// =============================================================================
// Modulation Tests
// =============================================================================

#[test]
fn test_fm_from_keypad() {
    let (mut hw, probe, mut interpreter) = booted();
    let t0 = probe.borrow().now_ms() + 10;
    let end = probe.borrow_mut().type_keys("#", t0);
    probe.borrow_mut().press('5', end + 40, 40);

    let outcomes = run_until(&mut hw, &probe, &mut interpreter, end + 200);

    assert_eq!(outcomes.len(), 1);
    let Outcome::Modulated { mode, samples } = outcomes[0] else {
        panic!("expected modulation, got {:?}", outcomes[0]);
    };
    assert_eq!(mode, Modulation::Fm);
    assert!(samples > 1_000);

    let p = probe.borrow();
    // start, FC, the samples, back to FA
    assert_eq!(p.words.len(), 3 + samples as usize);
    assert_eq!(p.words[2], word(1_000_000));
    assert_eq!(p.words[2 + 8], word(1_075_000));
    assert_eq!(p.words.last(), Some(&word(1_000_000)));
    assert_eq!(row_text(&hw, 0), "FA=1000000");
    assert_eq!(interpreter.state().entry(), 0);
}

#[test]
fn test_fm_guard_below_75khz() {
    let (mut hw, probe, mut interpreter) = booted();
    let t0 = probe.borrow().now_ms() + 10;
    let end = probe.borrow_mut().type_keys("50000A#", t0);
    probe.borrow_mut().press('1', end + 100, 40);

    let outcomes = run_until(&mut hw, &probe, &mut interpreter, end + 300);

    assert_eq!(outcomes.len(), 7);
    assert_eq!(outcomes[5], Outcome::Committed(Slot::A, hz(50_000)));
    assert_eq!(outcomes[6], Outcome::Rejected(GeneratorError::CarrierTooLow));
    // no FM table was ever programmed
    assert_eq!(
        probe.borrow().words,
        [word(1_000_000), word(50_000), word(50_000)]
    );
    assert_eq!(row_text(&hw, 0), "FA=50000");
    assert_eq!(interpreter.state().entry(), 0);
}

#[test]
fn test_am_from_keypad() {
    let (mut hw, probe, mut interpreter) = booted();
    let t0 = probe.borrow().now_ms() + 10;
    let end = probe.borrow_mut().type_keys("*", t0);
    probe.borrow_mut().press('5', end + 40, 40);

    let outcomes = run_until(&mut hw, &probe, &mut interpreter, end + 200);

    assert_eq!(outcomes.len(), 1);
    let Outcome::Modulated { mode, samples } = outcomes[0] else {
        panic!("expected modulation, got {:?}", outcomes[0]);
    };
    assert_eq!(mode, Modulation::Am);

    let p = probe.borrow();
    assert_eq!(p.amplitude_enables, 1);
    assert!(!p.amplitude_enabled);
    assert_eq!(p.amplitude_levels.len(), samples as usize);
    assert!(p.words.iter().all(|&w| w == word(1_000_000)));
    assert_eq!(row_text(&hw, 0), "FA=1000000");
}

//! Integration test: rotations into digits.

use super::common::{Rig, RigOptions, test_config};
use pirotary_dialer::state::DialerState;

#[test]
fn rotations_accumulate_digits() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.dial("12");

    assert_eq!(rig.ctx().digits().digits(), &[1, 2]);
    assert_eq!(rig.ctx().dialer_state(), DialerState::Idle);
    assert_eq!(rig.spoken(), vec!["hello"]);
}

#[test]
fn ten_pulses_dial_zero() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.rotate(20);
    rig.rotate(6);
    assert_eq!(rig.ctx().digits().digits(), &[0, 3]);
}

#[test]
fn malformed_and_empty_rotations_are_discarded() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.dial("5");
    rig.rotate(7);
    rig.rotate(0);
    rig.rotate(24);
    assert_eq!(rig.ctx().digits().digits(), &[5]);
}

#[test]
fn fourth_digit_starts_a_new_code() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.dial("125");
    assert_eq!(rig.ctx().digits().value(), Some(125));

    rig.dial("7");
    assert_eq!(rig.ctx().digits().digits(), &[7]);
    assert_eq!(rig.spoken(), vec!["hello"]);
}

#[test]
fn full_unknown_code_can_be_announced() {
    let mut config = test_config();
    config.dialer.announce_invalid = true;
    let mut rig = Rig::with(RigOptions {
        config,
        ..RigOptions::default()
    });
    rig.lift();
    rig.dial("12");
    assert_eq!(rig.spoken(), vec!["hello"]);

    rig.dial("5");
    assert_eq!(rig.spoken(), vec!["hello", "invalid number"]);
    assert!(rig.ctx().digits().is_empty());
    assert!(rig.ctx().gate().dialing_enabled());
}

#[test]
fn edges_queued_during_a_command_are_dropped() {
    let mut rig = Rig::new(3);
    rig.lift();
    let before = rig.dialer.stats();

    // "4" is dialed while track 1 plays; all its edges are already queued.
    rig.dial("3214");

    assert_eq!(rig.played(), vec!["/music/a.mp3"]);
    assert!(rig.ctx().digits().is_empty());
    assert_eq!(rig.dialer.stats().stale - before.stale, 10);
}

#[test]
fn dialing_on_hook_produces_no_events() {
    let mut rig = Rig::new(3);
    rig.sim.dial("321");
    assert_eq!(rig.dialer.drain_pending(), 0);
    assert!(rig.ctx().digits().is_empty());
}

//! Integration test: handset pickup and hangup.

use super::common::{Rig, RigOptions};
use pirotary_common::gpio::types::{EdgeEvent, InputLine, Level, OutputLine};
use pirotary_dialer::gate::CallbackGroups;
use pirotary_dialer::state::LineState;
use pirotary_hal::SimHandle;

#[test]
fn starts_on_hook_with_only_the_line_callback() {
    let rig = Rig::new(3);
    assert_eq!(rig.ctx().line_state(), LineState::OnHook);
    assert_eq!(rig.ctx().gate().active(), CallbackGroups::LINE);
    assert!(rig.sim.edge_enabled(InputLine::LineSwitch));
    assert!(!rig.sim.edge_enabled(InputLine::Pulse));
    assert_eq!(rig.sim.output(OutputLine::ReadyLed), Level::Low);
    assert!(rig.spoken().is_empty());
}

#[test]
fn pickup_greets_and_opens_dialing() {
    let mut rig = Rig::new(3);
    rig.lift();

    assert_eq!(rig.ctx().line_state(), LineState::OffHook);
    assert_eq!(rig.spoken(), vec!["hello"]);
    assert_eq!(rig.sim.output(OutputLine::ReadyLed), Level::High);
    assert_eq!(rig.sim.output(OutputLine::DialingLed), Level::High);
    assert!(rig.ctx().gate().dialing_enabled());
    assert!(rig.ctx().gate().line_enabled());
    assert!(!rig.ctx().amplifier().is_playing());
    assert!(!rig.ctx().amplifier().is_powered());
}

#[test]
fn hangup_says_goodbye_and_resets() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.dial("32");
    rig.hang();

    assert_eq!(rig.spoken(), vec!["hello", "goodbye"]);
    assert_eq!(rig.ctx().line_state(), LineState::OnHook);
    assert!(rig.ctx().digits().is_empty());
    assert_eq!(rig.ctx().gate().active(), CallbackGroups::LINE);
    assert_eq!(rig.sim.output(OutputLine::ReadyLed), Level::Low);
    assert_eq!(rig.sim.output(OutputLine::DialingLed), Level::Low);
}

#[test]
fn handset_already_lifted_at_start_is_picked_up() {
    let rig = Rig::with(RigOptions {
        lifted: true,
        ..RigOptions::default()
    });
    assert_eq!(rig.ctx().line_state(), LineState::OffHook);
    assert_eq!(rig.spoken(), vec!["hello"]);
    assert!(rig.ctx().gate().dialing_enabled());
}

#[test]
fn repeated_level_is_a_bounce() {
    let mut rig = Rig::new(3);
    rig.lift();
    let tick = rig.sim.tick();

    assert!(rig
        .dialer
        .handle(EdgeEvent::new(InputLine::LineSwitch, Level::High, tick + 1)));
    assert_eq!(rig.spoken(), vec!["hello"]);
    assert_eq!(rig.ctx().line_state(), LineState::OffHook);
}

#[test]
fn hangup_during_greeting_ends_on_hook() {
    let mut rig = Rig::with(RigOptions {
        hook: Some(Box::new(|argv: &[String], sim: &SimHandle| {
            if argv.last().map(String::as_str) == Some("hello") {
                sim.replace_handset();
            }
        })),
        ..RigOptions::default()
    });
    rig.lift();

    assert_eq!(rig.spoken(), vec!["hello", "goodbye"]);
    assert_eq!(rig.ctx().line_state(), LineState::OnHook);
    assert_eq!(rig.ctx().gate().active(), CallbackGroups::LINE);
    assert_eq!(rig.sim.output(OutputLine::ReadyLed), Level::Low);
}

//! Integration test: command codes end to end.

use super::common::{Rig, RigOptions, argv, test_config};
use pirotary_common::gpio::types::{Level, OutputLine};
use pirotary_dialer::gate::CallbackGroups;
use pirotary_dialer::state::LineState;
use pirotary_hal::SimHandle;

#[test]
fn next_track_wraps_around_the_playlist() {
    let mut rig = Rig::new(3);
    rig.lift();
    for _ in 0..4 {
        rig.dial("321");
    }

    assert_eq!(
        rig.played(),
        vec!["/music/a.mp3", "/music/b.mp3", "/music/c.mp3", "/music/a.mp3"]
    );
    assert_eq!(rig.ctx().track_position(), 1);
    assert!(rig.spoken().contains(&"now playing Bravo".to_string()));
}

#[test]
fn reset_returns_to_the_first_track() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.dial("321");
    rig.dial("321");
    assert_eq!(rig.ctx().track_position(), 2);

    rig.dial("666");
    assert_eq!(rig.ctx().track_position(), 0);
    assert!(rig.ctx().digits().is_empty());
    assert!(rig.ctx().gate().dialing_enabled());

    rig.dial("321");
    assert_eq!(rig.played().last().map(String::as_str), Some("/music/a.mp3"));
}

#[test]
fn reset_after_a_pending_partial_code() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.dial("321");
    assert_eq!(rig.ctx().track_position(), 1);

    rig.dial("1");
    rig.dial("666");
    assert_eq!(rig.ctx().track_position(), 0);
    assert!(rig.ctx().digits().is_empty());
    assert!(rig.ctx().gate().dialing_enabled());
}

#[test]
fn reset_after_two_pending_digits() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.dial("321");
    rig.dial("12");
    rig.dial("666");
    assert_eq!(rig.ctx().track_position(), 0);
    assert!(rig.ctx().digits().is_empty());
}

#[test]
fn reset_after_a_full_unknown_code() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.dial("321");
    rig.dial("555");
    assert_eq!(rig.ctx().digits().value(), Some(555));

    rig.dial("666");
    assert_eq!(rig.ctx().track_position(), 0);
    assert!(rig.ctx().digits().is_empty());
}

#[test]
fn only_reset_matches_at_the_tail() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.dial("666");
    rig.dial("66");
    assert_eq!(rig.ctx().digits().value(), Some(66));

    // "663" restarts with "2", "21": next-track is not found mid-run.
    rig.dial("321");
    assert!(rig.played().is_empty());
    assert_eq!(rig.ctx().digits().value(), Some(21));
}

#[test]
fn select_track_keeps_the_play_position() {
    let mut rig = Rig::new(5);
    rig.lift();
    rig.dial("321");
    rig.dial("405");

    assert_eq!(rig.played(), vec!["/music/a.mp3", "/music/e.mp3"]);
    assert_eq!(rig.ctx().track_position(), 1);
    assert!(rig.ctx().digits().is_empty());
}

#[test]
fn selection_beyond_the_playlist_is_not_a_command() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.dial("404");
    assert!(rig.played().is_empty());
    assert_eq!(rig.ctx().digits().value(), Some(404));
}

#[test]
fn list_titles_speaks_preamble_then_numbered_titles() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.sim.clear_output_log();
    rig.dial("124");

    assert_eq!(
        rig.spoken(),
        vec![
            "hello",
            "there are 3 tracks",
            " 1: Alpha, ",
            " 2: Bravo, ",
            " 3: Charlie, ",
        ]
    );
    assert!(rig.ctx().digits().is_empty());
    assert!(!rig.ctx().amplifier().is_powered());
    assert!(!rig.ctx().amplifier().is_playing());
    assert!(rig.ctx().gate().dialing_enabled());

    let power_presses = rig
        .sim
        .output_log()
        .into_iter()
        .filter(|&entry| entry == (OutputLine::AmpPower, Level::High))
        .count();
    assert_eq!(power_presses, 2);
}

#[test]
fn help_speaks_every_sentence() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.clear_journal();
    rig.dial("111");
    assert_eq!(
        rig.spoken(),
        vec!["dial 123 to play everything", "dial 124 for the titles"]
    );
}

#[test]
fn play_all_plays_in_order_and_moves_past_the_last_track() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.clear_journal();
    rig.dial("123");

    assert_eq!(
        rig.spoken(),
        vec![
            "playing all playlist",
            "now playing Alpha",
            "now playing Bravo",
            "now playing Charlie",
        ]
    );
    assert_eq!(
        rig.played(),
        vec!["/music/a.mp3", "/music/b.mp3", "/music/c.mp3"]
    );
    assert_eq!(rig.ctx().track_position(), 0);
}

#[test]
fn hangup_during_play_all_stops_and_powers_down() {
    let mut rig = Rig::with(RigOptions {
        hook: Some(Box::new(|argv: &[String], sim: &SimHandle| {
            if argv[0] == "player" && argv[1].ends_with("a.mp3") {
                sim.replace_handset();
            }
        })),
        ..RigOptions::default()
    });
    rig.lift();
    rig.dial("123");

    assert_eq!(rig.played(), vec!["/music/a.mp3"]);
    assert_eq!(
        rig.spoken(),
        vec!["hello", "playing all playlist", "now playing Alpha", "goodbye"]
    );
    assert_eq!(rig.ctx().line_state(), LineState::OnHook);
    assert!(!rig.ctx().amplifier().is_powered());
    assert!(!rig.ctx().amplifier().is_playing());
    assert_eq!(rig.ctx().gate().active(), CallbackGroups::LINE);
    assert_eq!(rig.sim.output(OutputLine::DialingLed), Level::Low);
    assert_eq!(rig.sim.output(OutputLine::ReadyLed), Level::Low);
    assert_eq!(rig.ctx().track_position(), 0);
}

#[test]
fn weather_speaks_the_report_after_its_header() {
    let mut rig = Rig::with(RigOptions {
        weather_report: "Linate\nLIML 181250Z\nob: METAR\ncycle: 12\nWind: calm\nSky conditions: clear\n",
        ..RigOptions::default()
    });
    rig.lift();
    rig.clear_journal();
    rig.dial("100");

    assert_eq!(
        rig.spoken(),
        vec!["Milano Linate", "Wind: calm", "Sky conditions: clear"]
    );
    assert!(rig.commands().contains(&argv(&["weather", "LIML"])));
}

#[test]
fn weather_skip_is_configurable() {
    let mut config = test_config();
    config.dialer.weather_skip_lines = 0;
    let mut rig = Rig::with(RigOptions {
        config,
        weather_report: "Wind: calm\n",
        ..RigOptions::default()
    });
    rig.lift();
    rig.clear_journal();
    rig.dial("100");
    assert_eq!(rig.spoken(), vec!["Milano Linate", "Wind: calm"]);
}

#[test]
fn reboot_leaves_gate_and_amplifier_alone() {
    let mut rig = Rig::new(3);
    rig.lift();
    rig.clear_journal();
    rig.sim.clear_output_log();
    rig.dial("999");

    assert_eq!(rig.commands(), vec![argv(&["reboot"])]);
    assert_eq!(rig.ctx().gate().active(), CallbackGroups::all());
    assert!(rig.ctx().digits().is_empty());
    assert!(rig.sim.output_log().iter().all(|(output, _)| {
        !matches!(
            output,
            OutputLine::AmpPower | OutputLine::AmpMode | OutputLine::DialingLed
        )
    }));
}

#[test]
fn empty_playlist_next_track_is_harmless() {
    let mut rig = Rig::new(0);
    rig.lift();
    rig.dial("321");
    assert!(rig.played().is_empty());
    assert_eq!(rig.ctx().track_position(), 0);
    assert!(rig.ctx().gate().dialing_enabled());
}

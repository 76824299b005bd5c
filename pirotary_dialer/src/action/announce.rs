//! Spoken and played actions.
//!
//! Each user-facing action powers the amplifier, runs its programs and
//! powers it down again. Program failures are logged and the sequence goes
//! on with the next step.

use crate::action::executor::ActionStatus;
use crate::context::DialerContext;
use crate::state::line::LineState;
use pirotary_common::catalog::{
    MSG_INVALID, MSG_NOW_PLAYING, MSG_PLAYLIST, MSG_PLAY_ALL_INTRO, MSG_TITLES_INTRO,
    MSG_TITLES_OUTRO,
};
use tracing::{info, warn};

/// Run `body` with the amplifier taken and released around it.
fn with_amplifier<R>(ctx: &mut DialerContext, body: impl FnOnce(&mut DialerContext) -> R) -> R {
    ctx.amplifier.begin(ctx.gpio.as_mut());
    let result = body(ctx);
    ctx.amplifier.finish(ctx.gpio.as_mut());
    result
}

fn run(ctx: &mut DialerContext, argv: &[String]) {
    match ctx.executor.execute(argv) {
        Ok(status) => report(argv, status),
        Err(e) => warn!("{}", e),
    }
}

fn report(argv: &[String], status: ActionStatus) {
    if !status.success() {
        let program = argv.first().map(String::as_str).unwrap_or_default();
        match status.0 {
            Some(code) => warn!("{} exited with status {}", program, code),
            None => warn!("{} terminated by a signal", program),
        }
    }
}

fn speak(ctx: &mut DialerContext, text: &str) {
    let mut argv = ctx.commands.tts.clone();
    argv.push(text.to_string());
    run(ctx, &argv);
}

/// Title announcement followed by the audio file.
fn play_one(ctx: &mut DialerContext, index: usize) {
    let playlist = &ctx.catalog.playlist;
    let (Some(title), Some(path)) = (playlist.title(index), playlist.track_path(index)) else {
        warn!("track {} is not in the playlist", index + 1);
        return;
    };
    let intro = format!("{} {}", ctx.catalog.messages.message(MSG_NOW_PLAYING), title);
    info!("Playing track {}: {}", index + 1, title);

    speak(ctx, &intro);
    let mut argv = ctx.commands.player.clone();
    argv.push(path.to_string_lossy().into_owned());
    run(ctx, &argv);
}

/// Speak catalog message `index`.
pub(crate) fn announce(ctx: &mut DialerContext, index: usize) {
    let text = ctx.catalog.messages.message(index).to_string();
    with_amplifier(ctx, |ctx| speak(ctx, &text));
}

/// Speak the invalid-number message.
pub(crate) fn invalid(ctx: &mut DialerContext) {
    announce(ctx, MSG_INVALID);
}

/// Announce and play one track.
pub(crate) fn play_track(ctx: &mut DialerContext, index: usize) {
    with_amplifier(ctx, |ctx| play_one(ctx, index));
}

/// Play every track, stopping once the handset is replaced.
///
/// Returns the index of the last track played.
pub(crate) fn play_all(ctx: &mut DialerContext) -> Option<usize> {
    let intro = format!(
        "{} {}",
        ctx.catalog.messages.message(MSG_PLAY_ALL_INTRO),
        ctx.catalog.messages.message(MSG_PLAYLIST)
    );
    with_amplifier(ctx, |ctx| {
        speak(ctx, &intro);
        let mut last = None;
        for index in 0..ctx.catalog.playlist.len() {
            play_one(ctx, index);
            last = Some(index);
            if ctx.read_line() == LineState::OnHook {
                info!("handset replaced, playlist stopped after track {}", index + 1);
                break;
            }
        }
        last
    })
}

/// Speak the number of tracks, then every title numbered from 1.
pub(crate) fn list_titles(ctx: &mut DialerContext) {
    let messages = &ctx.catalog.messages;
    let preamble = format!(
        "{} {} {}",
        messages.message(MSG_TITLES_INTRO),
        ctx.catalog.playlist.len(),
        messages.message(MSG_TITLES_OUTRO)
    );
    let lines: Vec<String> = ctx
        .catalog
        .playlist
        .titles()
        .enumerate()
        .map(|(i, title)| format!(" {}: {}, ", i + 1, title))
        .collect();

    with_amplifier(ctx, |ctx| {
        speak(ctx, &preamble);
        for line in &lines {
            speak(ctx, line);
        }
    });
}

/// Speak the help sentences.
pub(crate) fn help(ctx: &mut DialerContext) {
    let sentences: Vec<String> = ctx.catalog.messages.help().map(str::to_string).collect();
    with_amplifier(ctx, |ctx| {
        for sentence in &sentences {
            speak(ctx, sentence);
        }
    });
}

/// Lines of a weather report worth speaking.
pub fn report_lines(report: &str, skip: usize) -> impl Iterator<Item = &str> {
    report
        .lines()
        .skip(skip)
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Speak the airport name and the weather report for its ICAO code.
pub(crate) fn weather(ctx: &mut DialerContext) {
    let airport = ctx.catalog.messages.airport.clone();
    let mut argv = ctx.commands.weather.clone();
    argv.push(ctx.catalog.messages.icao.clone());
    let skip = ctx.settings.weather_skip_lines;

    with_amplifier(ctx, |ctx| {
        speak(ctx, &airport);
        let output = match ctx.executor.capture(&argv) {
            Ok(output) => output,
            Err(e) => {
                warn!("weather query: {}", e);
                return;
            }
        };
        report(&argv, output.status);

        let text = String::from_utf8_lossy(&output.stdout);
        for line in report_lines(&text, skip) {
            speak(ctx, line);
        }
    });
}

/// Run the reboot command.
pub(crate) fn reboot(ctx: &mut DialerContext) {
    warn!("Reboot requested");
    let argv = ctx.commands.reboot.clone();
    run(ctx, &argv);
}

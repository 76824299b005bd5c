//! Command dispatcher.
//!
//! Runs after every decoded digit. A matched command clears the buffer and
//! runs with every callback cancelled; afterwards the hook-switch callback is
//! restored and dialing reopens only if the handset is still lifted.
//!
//! The reset code also matches as the last three digits dialed, so it works
//! whatever was pending before it.

use crate::action::announce;
use crate::command::table::Command;
use crate::context::DialerContext;
use crate::state::line::{self, LineState};
use pirotary_common::consts::{CODE_RESET, CODE_RESET_DIGITS};
use tracing::{debug, info, warn};

/// Match the buffer against the command table and run the first hit.
pub(crate) fn evaluate(ctx: &mut DialerContext) {
    let Some(value) = ctx.buffer.value() else {
        return;
    };

    let Some(command) = ctx.table.lookup(value).or_else(|| trailing_reset(ctx)) else {
        debug!("code {} matches no command", ctx.buffer);
        if ctx.buffer.is_full() && ctx.settings.announce_invalid {
            info!("invalid code {}", ctx.buffer);
            ctx.gate.disable_all(ctx.gpio.as_mut());
            announce::invalid(ctx);
            ctx.buffer.clear();
            resume(ctx);
        }
        return;
    };

    info!("code {} -> {:?}", ctx.buffer, command);
    ctx.buffer.reset();

    if !command.suspends_callbacks() {
        run(ctx, command);
        return;
    }

    ctx.gate.disable_all(ctx.gpio.as_mut());
    run(ctx, command);
    resume(ctx);
}

/// Reset dialed at the tail of a run that started mid-code.
fn trailing_reset(ctx: &DialerContext) -> Option<Command> {
    (ctx.buffer.trailing_value(CODE_RESET_DIGITS) == Some(CODE_RESET)).then_some(Command::Reset)
}

fn run(ctx: &mut DialerContext, command: Command) {
    match command {
        Command::Reset => {
            info!("Dialer reset");
            ctx.reset_dialing();
        }
        Command::NextTrack => {
            let tracks = ctx.catalog.playlist.len();
            if tracks == 0 {
                warn!("next track requested but the playlist is empty");
                return;
            }
            let position = ctx.track_position % tracks;
            announce::play_track(ctx, position);
            ctx.track_position = (position + 1) % tracks;
        }
        Command::PlayAll => {
            let tracks = ctx.catalog.playlist.len();
            if let Some(last) = announce::play_all(ctx) {
                ctx.track_position = (last + 1) % tracks;
            }
        }
        Command::ListTitles => announce::list_titles(ctx),
        Command::SelectTrack(index) => announce::play_track(ctx, index),
        Command::Help => announce::help(ctx),
        Command::Reboot => announce::reboot(ctx),
        Command::Weather => announce::weather(ctx),
    }
}

fn resume(ctx: &mut DialerContext) {
    ctx.gate.enable_line_only(ctx.gpio.as_mut());
    match ctx.read_line() {
        LineState::OffHook => ctx.gate.enable_dialing_only(ctx.gpio.as_mut()),
        LineState::OnHook => {
            info!("handset replaced while the command ran");
            line::hang_up(ctx);
        }
    }
}

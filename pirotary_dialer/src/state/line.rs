//! Hook-switch monitor.
//!
//! Lifting the handset lights the ready indicator, greets the caller and
//! opens dialing. Replacing it says goodbye, resets the dialing state and
//! leaves only the hook-switch callback registered.

use crate::action::announce;
use crate::context::DialerContext;
use pirotary_common::catalog::{MSG_HANGUP, MSG_PICKUP};
use pirotary_common::gpio::types::{Level, OutputLine};
use tracing::{debug, info};

/// Handset position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineState {
    /// Handset on the hook.
    #[default]
    OnHook,
    /// Handset lifted.
    OffHook,
}

impl From<Level> for LineState {
    fn from(level: Level) -> Self {
        if level.is_high() {
            LineState::OffHook
        } else {
            LineState::OnHook
        }
    }
}

/// Hook-switch edge.
pub(crate) fn on_line_edge(ctx: &mut DialerContext) {
    let observed = ctx.read_line();
    if observed == ctx.line {
        debug!("hook switch bounce ignored ({:?})", observed);
        return;
    }
    settle(ctx, observed);
}

/// Handle a lifted handset.
pub(crate) fn pick_up(ctx: &mut DialerContext) {
    settle(ctx, LineState::OffHook);
}

/// Handle a replaced handset.
pub(crate) fn hang_up(ctx: &mut DialerContext) {
    settle(ctx, LineState::OnHook);
}

/// Run the transition to `target`, then repeat for the level the switch
/// actually shows until the two agree.
fn settle(ctx: &mut DialerContext, mut target: LineState) {
    loop {
        ctx.gate.disable_all(ctx.gpio.as_mut());
        match target {
            LineState::OffHook => enter_off_hook(ctx),
            LineState::OnHook => enter_on_hook(ctx),
        }

        let now = ctx.read_line();
        if now == target {
            break;
        }
        info!("hook switch moved to {:?} during the announcement", now);
        target = now;
    }

    match target {
        LineState::OffHook => ctx.gate.enable_all(ctx.gpio.as_mut()),
        LineState::OnHook => ctx.gate.enable_line_only(ctx.gpio.as_mut()),
    }
}

fn enter_off_hook(ctx: &mut DialerContext) {
    info!("Handset lifted");
    ctx.line = LineState::OffHook;
    ctx.write(OutputLine::ReadyLed, Level::High);
    announce::announce(ctx, MSG_PICKUP);
}

fn enter_on_hook(ctx: &mut DialerContext) {
    info!("Handset replaced");
    ctx.line = LineState::OnHook;
    announce::announce(ctx, MSG_HANGUP);
    ctx.write(OutputLine::ReadyLed, Level::Low);
    ctx.reset_dialing();
}

//! Rotary pulse decoder.
//!
//! The dial closes a dial-detect contact for the whole rotation and opens
//! the pulse contact once per unit. Both edges of every pulse are counted,
//! so a well-formed rotation yields an even raw count between 2 and 20.

use crate::command::dispatch;
use crate::context::DialerContext;
use crate::state::line::LineState;
use pirotary_common::consts::RAW_PULSES_FOR_ZERO;
use pirotary_common::gpio::types::{Level, OutputLine};
use std::mem;
use tracing::{debug, trace, warn};

/// Rotation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialerState {
    /// Dial at rest.
    #[default]
    Idle,
    /// Dial returning, pulses being counted.
    Dialing,
}

/// Result of one finished rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    /// A decoded digit (0-9).
    Digit(u8),
    /// No pulse was seen.
    Empty,
    /// Raw count that is odd or above ten pulses.
    Malformed(u32),
}

/// Map a raw edge count to a digit.
pub fn decode(raw: u32) -> RotationOutcome {
    match raw {
        0 => RotationOutcome::Empty,
        RAW_PULSES_FOR_ZERO => RotationOutcome::Digit(0),
        n if n % 2 == 0 && n < RAW_PULSES_FOR_ZERO => RotationOutcome::Digit((n / 2) as u8),
        n => RotationOutcome::Malformed(n),
    }
}

/// Pulse counter driven by the rotary callbacks.
#[derive(Debug, Clone, Default)]
pub struct PulseDecoder {
    state: DialerState,
    count: u32,
}

impl PulseDecoder {
    /// Idle decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rotation state.
    #[inline]
    pub fn state(&self) -> DialerState {
        self.state
    }

    /// Raw edges counted so far.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Dial-detect closed: a rotation starts.
    pub fn begin(&mut self) {
        self.count = 0;
        self.state = DialerState::Dialing;
    }

    /// Pulse edge; counted only while dialing.
    pub fn pulse(&mut self) -> bool {
        if self.state == DialerState::Dialing {
            self.count = self.count.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Dial-detect opened: decode and reset the counter.
    pub fn finish(&mut self) -> RotationOutcome {
        let was = mem::take(&mut self.state);
        let raw = mem::take(&mut self.count);
        match was {
            DialerState::Dialing => decode(raw),
            DialerState::Idle => RotationOutcome::Empty,
        }
    }

    /// Forget any rotation in progress.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ─── Callbacks ──────────────────────────────────────────────────────

/// Dial-detect edge.
pub(crate) fn on_dial_detect(ctx: &mut DialerContext, level: Level) {
    if ctx.line != LineState::OffHook {
        trace!("dial-detect edge ignored on hook");
        return;
    }

    if level.is_high() {
        ctx.decoder.begin();
        ctx.write(OutputLine::PulseLed, Level::High);
        return;
    }

    let outcome = ctx.decoder.finish();
    ctx.write(OutputLine::PulseLed, Level::Low);
    match outcome {
        RotationOutcome::Digit(digit) => {
            if ctx.buffer.push(digit) {
                debug!("digit buffer was full, starting a new code");
            }
            debug!("digit {} dialed, buffer {}", digit, ctx.buffer);
            dispatch::evaluate(ctx);
        }
        RotationOutcome::Empty => debug!("rotation without pulses ignored"),
        RotationOutcome::Malformed(raw) => {
            warn!("malformed rotation ({} raw edges), digit discarded", raw)
        }
    }
}

/// Pulse edge.
pub(crate) fn on_pulse(ctx: &mut DialerContext) {
    if ctx.line != LineState::OffHook {
        return;
    }
    if ctx.decoder.pulse() {
        trace!("pulse edge {}", ctx.decoder.count());
    }
}

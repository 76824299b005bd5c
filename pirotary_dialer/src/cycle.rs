//! Dialer runtime loop.
//!
//! Drains the edge channel on one thread. Each admitted event runs its
//! handler to completion before the next one is received.

use crate::context::DialerContext;
use crate::error::DialerError;
use crate::state::line::{self, LineState};
use crate::state::pulse;
use pirotary_common::gpio::types::{EdgeEvent, InputLine, Level, OutputLine};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;
use tracing::{debug, info, trace};

/// How often the loop checks the running flag while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Event counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStats {
    /// Events taken from the channel.
    pub received: u64,
    /// Events rejected by the gate.
    pub stale: u64,
    /// Events passed to a handler.
    pub handled: u64,
}

/// The dialer: context plus the receiving end of the edge channel.
pub struct Dialer {
    ctx: DialerContext,
    events: Receiver<EdgeEvent>,
    stats: EventStats,
}

impl Dialer {
    /// Wrap a context and its event source.
    pub fn new(ctx: DialerContext, events: Receiver<EdgeEvent>) -> Self {
        Self {
            ctx,
            events,
            stats: EventStats::default(),
        }
    }

    /// Clear the outputs and register the hook-switch callback. A handset
    /// already lifted is handled as a pickup.
    pub fn start(&mut self) {
        for output in OutputLine::ALL {
            self.ctx.write(output, Level::Low);
        }
        self.ctx.gate.enable_line_only(self.ctx.gpio.as_mut());
        if self.ctx.read_line() == LineState::OffHook {
            line::pick_up(&mut self.ctx);
        }
        info!("Dialer started ({:?})", self.ctx.line);
    }

    /// Route one event. Returns whether a handler ran.
    pub fn handle(&mut self, event: EdgeEvent) -> bool {
        self.stats.received += 1;
        if !self.ctx.gate.admits(&event) {
            self.stats.stale += 1;
            trace!("stale {:?} edge at tick {} dropped", event.input, event.tick);
            return false;
        }

        self.stats.handled += 1;
        trace!("{:?} -> {:?} at tick {}", event.input, event.level, event.tick);
        match event.input {
            InputLine::LineSwitch => line::on_line_edge(&mut self.ctx),
            InputLine::DialDetect => pulse::on_dial_detect(&mut self.ctx, event.level),
            InputLine::Pulse => pulse::on_pulse(&mut self.ctx),
        }
        true
    }

    /// Handle every event already queued. Returns how many were received.
    pub fn drain_pending(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle(event);
            drained += 1;
        }
        drained
    }

    /// Handle events until `running` is cleared or the driver goes away.
    pub fn run(&mut self, running: &AtomicBool) -> Result<(), DialerError> {
        info!("Dialer loop running");
        while running.load(Ordering::SeqCst) {
            match self.events.recv_timeout(POLL_INTERVAL) {
                Ok(event) => {
                    self.handle(event);
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return Err(DialerError::EventSourceClosed),
            }
        }
        info!("Dialer loop stopped");
        Ok(())
    }

    /// Shared context.
    pub fn context(&self) -> &DialerContext {
        &self.ctx
    }

    /// Event counters so far.
    pub fn stats(&self) -> EventStats {
        self.stats
    }

    /// Cancel every callback and shut the driver down.
    pub fn shutdown(mut self) -> Result<(), DialerError> {
        self.ctx.gate.disable_all(self.ctx.gpio.as_mut());
        self.ctx.gpio.shutdown()?;
        debug!("{:?}", self.stats);
        info!(
            "Dialer shut down: {} events, {} handled, {} stale",
            self.stats.received, self.stats.handled, self.stats.stale
        );
        Ok(())
    }
}

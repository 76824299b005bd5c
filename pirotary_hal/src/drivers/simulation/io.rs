//! Simulated pin state shared between the driver and whoever drives it.
//!
//! The `SimHandle` manages:
//! - Input levels and the edge events they produce
//! - Edge-detect registrations (edges of unregistered inputs are dropped)
//! - Output levels plus an ordered log of every write

use parking_lot::Mutex;
use pirotary_common::gpio::types::{EdgeEvent, InputLine, Level, OutputLine};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use tracing::trace;

#[derive(Debug, Default)]
struct SimIo {
    inputs: HashMap<InputLine, Level>,
    outputs: HashMap<OutputLine, Level>,
    output_log: Vec<(OutputLine, Level)>,
    edge_enabled: HashSet<InputLine>,
    tick: u64,
    events: Option<Sender<EdgeEvent>>,
}

/// Cloneable handle onto the simulated pins.
#[derive(Debug, Clone, Default)]
pub struct SimHandle {
    io: Arc<Mutex<SimIo>>,
}

impl SimHandle {
    /// Create a handle with every line low and no callback registered.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn connect(&self, events: Sender<EdgeEvent>) {
        self.io.lock().events = Some(events);
    }

    pub(crate) fn disconnect(&self) {
        let mut io = self.io.lock();
        io.events = None;
        io.edge_enabled.clear();
    }

    /// Set an input level.
    ///
    /// A change of level is an edge: the tick advances and, if the input's
    /// callback is registered, an [`EdgeEvent`] is sent. Returns whether an
    /// event was delivered.
    pub fn set_input(&self, input: InputLine, level: Level) -> bool {
        let mut io = self.io.lock();
        let previous = io.inputs.insert(input, level).unwrap_or_default();
        if previous == level {
            return false;
        }

        io.tick += 1;
        let event = EdgeEvent::new(input, level, io.tick);
        if !io.edge_enabled.contains(&input) {
            trace!("edge {:?} -> {:?} dropped (callback not registered)", input, level);
            return false;
        }

        match &io.events {
            Some(sender) => sender.send(event).is_ok(),
            None => false,
        }
    }

    /// Current level of an input.
    pub fn input(&self, input: InputLine) -> Level {
        self.io.lock().inputs.get(&input).copied().unwrap_or_default()
    }

    /// Lift the handset.
    pub fn lift_handset(&self) -> bool {
        self.set_input(InputLine::LineSwitch, Level::High)
    }

    /// Put the handset back on the hook.
    pub fn replace_handset(&self) -> bool {
        self.set_input(InputLine::LineSwitch, Level::Low)
    }

    /// Rotate the dial with `raw_edges` pulse-line edges between the
    /// dial-detect edges. A well-formed digit produces twice its pulse count.
    pub fn rotate(&self, raw_edges: u32) {
        self.set_input(InputLine::DialDetect, Level::High);
        for _ in 0..raw_edges {
            let next = if self.input(InputLine::Pulse).is_high() {
                Level::Low
            } else {
                Level::High
            };
            self.set_input(InputLine::Pulse, next);
        }
        self.set_input(InputLine::DialDetect, Level::Low);
    }

    /// Dial one digit (`0` emits ten pulses).
    pub fn dial_digit(&self, digit: u8) {
        let pulses = if digit == 0 { 10 } else { u32::from(digit.min(9)) };
        self.rotate(pulses * 2);
    }

    /// Dial every ASCII digit of `number`, ignoring other characters.
    pub fn dial(&self, number: &str) {
        for digit in number.bytes().filter(u8::is_ascii_digit) {
            self.dial_digit(digit - b'0');
        }
    }

    /// Current level of an output.
    pub fn output(&self, output: OutputLine) -> Level {
        self.io.lock().outputs.get(&output).copied().unwrap_or_default()
    }

    /// Every output write since the last [`SimHandle::clear_output_log`].
    pub fn output_log(&self) -> Vec<(OutputLine, Level)> {
        self.io.lock().output_log.clone()
    }

    /// Forget the recorded writes.
    pub fn clear_output_log(&self) {
        self.io.lock().output_log.clear();
    }

    /// Whether the callback of `input` is registered.
    pub fn edge_enabled(&self, input: InputLine) -> bool {
        self.io.lock().edge_enabled.contains(&input)
    }

    /// Tick of the most recent edge.
    pub fn tick(&self) -> u64 {
        self.io.lock().tick
    }

    pub(crate) fn write(&self, output: OutputLine, level: Level) {
        let mut io = self.io.lock();
        io.outputs.insert(output, level);
        io.output_log.push((output, level));
    }

    pub(crate) fn set_edge_detect(&self, input: InputLine, enabled: bool) {
        let mut io = self.io.lock();
        if enabled {
            io.edge_enabled.insert(input);
        } else {
            io.edge_enabled.remove(&input);
        }
    }
}

//! Logical GPIO lines and edge events.

use serde::{Deserialize, Serialize};

/// Electrical level of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Level {
    /// Logic low.
    #[default]
    Low,
    /// Logic high.
    High,
}

impl Level {
    /// Whether the level is high.
    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// Edge-triggered inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputLine {
    /// Hook switch, high while the handset is lifted.
    LineSwitch,
    /// High for the whole rotation of one digit.
    DialDetect,
    /// Toggles once per make/break of the dial contacts.
    Pulse,
}

impl InputLine {
    /// Every input, in wiring order.
    pub const ALL: [InputLine; 3] = [InputLine::LineSwitch, InputLine::DialDetect, InputLine::Pulse];

    /// Whether the input belongs to the rotary mechanism.
    #[inline]
    pub const fn is_dialing(self) -> bool {
        matches!(self, InputLine::DialDetect | InputLine::Pulse)
    }
}

/// Driven outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputLine {
    /// Lit while the handset is lifted.
    ReadyLed,
    /// Lit while a digit is being dialed.
    PulseLed,
    /// Lit while dial events are delivered.
    DialingLed,
    /// Amplifier power button relay.
    AmpPower,
    /// Amplifier input-mode button relay.
    AmpMode,
}

impl OutputLine {
    /// Every output, in wiring order.
    pub const ALL: [OutputLine; 5] = [
        OutputLine::ReadyLed,
        OutputLine::PulseLed,
        OutputLine::DialingLed,
        OutputLine::AmpPower,
        OutputLine::AmpMode,
    ];
}

/// One observed edge.
///
/// `tick` is a monotonic stamp assigned by the driver; the gate compares it
/// against the tick at which a callback group was last armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEvent {
    /// Input that changed.
    pub input: InputLine,
    /// Level after the edge.
    pub level: Level,
    /// Driver tick of the edge.
    pub tick: u64,
}

impl EdgeEvent {
    /// Create a new edge event.
    pub const fn new(input: InputLine, level: Level, tick: u64) -> Self {
        Self { input, level, tick }
    }
}

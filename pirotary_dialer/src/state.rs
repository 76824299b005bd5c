//! Dialer state machines.
//!
//! - [`line`]: hook switch, pickup and hangup handling
//! - [`pulse`]: rotation decoding into digits
//! - [`amplifier`]: expected power of the amplifier and its button sequence

pub mod amplifier;
pub mod line;
pub mod pulse;

pub use amplifier::Amplifier;
pub use line::LineState;
pub use pulse::{DialerState, PulseDecoder, RotationOutcome};

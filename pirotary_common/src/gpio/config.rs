//! Pin assignment.

use super::consts::*;
use super::types::{InputLine, OutputLine};
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Broadcom pin numbers of every logical line.
///
/// # TOML Example
///
/// ```toml
/// [pins]
/// line_switch = 23
/// amp_power = 22
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GpioPins {
    /// Hook switch input.
    pub line_switch: u8,
    /// Dial-in-progress input.
    pub dial_detect: u8,
    /// Pulse input.
    pub pulse: u8,
    /// Handset-lifted indicator.
    pub ready_led: u8,
    /// Per-pulse indicator.
    pub pulse_led: u8,
    /// Dialing-enabled indicator.
    pub dialing_led: u8,
    /// Amplifier power relay.
    pub amp_power: u8,
    /// Amplifier mode relay.
    pub amp_mode: u8,
}

impl Default for GpioPins {
    fn default() -> Self {
        Self {
            line_switch: DEFAULT_PIN_LINE_SWITCH,
            dial_detect: DEFAULT_PIN_DIAL_DETECT,
            pulse: DEFAULT_PIN_PULSE,
            ready_led: DEFAULT_PIN_READY_LED,
            pulse_led: DEFAULT_PIN_PULSE_LED,
            dialing_led: DEFAULT_PIN_DIALING_LED,
            amp_power: DEFAULT_PIN_AMP_POWER,
            amp_mode: DEFAULT_PIN_AMP_MODE,
        }
    }
}

impl GpioPins {
    /// Pin wired to an input.
    pub const fn input(&self, line: InputLine) -> u8 {
        match line {
            InputLine::LineSwitch => self.line_switch,
            InputLine::DialDetect => self.dial_detect,
            InputLine::Pulse => self.pulse,
        }
    }

    /// Pin wired to an output.
    pub const fn output(&self, line: OutputLine) -> u8 {
        match line {
            OutputLine::ReadyLed => self.ready_led,
            OutputLine::PulseLed => self.pulse_led,
            OutputLine::DialingLed => self.dialing_led,
            OutputLine::AmpPower => self.amp_power,
            OutputLine::AmpMode => self.amp_mode,
        }
    }

    /// Reject shared pins and the reserved callback pin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        let pins = InputLine::ALL
            .iter()
            .map(|&l| self.input(l))
            .chain(OutputLine::ALL.iter().map(|&l| self.output(l)));

        for pin in pins {
            if !seen.insert(pin) {
                return Err(ConfigError::ValidationError(format!(
                    "GPIO {pin} assigned to more than one line"
                )));
            }
        }

        if let Some(line) = InputLine::ALL.iter().find(|&&l| self.input(l) == RESERVED_PIN) {
            return Err(ConfigError::ValidationError(format!(
                "GPIO {RESERVED_PIN} cannot carry the {line:?} callback"
            )));
        }
        Ok(())
    }
}

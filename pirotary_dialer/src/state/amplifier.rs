//! Amplifier button simulator.
//!
//! The amplifier has no feedback line. Pressing its power button flips it
//! on or off, so the dialer keeps a prediction of the power state and a
//! `playing` flag that says whether the current action still owns it.

use crate::config::AmplifierTiming;
use pirotary_common::gpio::driver::GpioDriver;
use pirotary_common::gpio::types::{Level, OutputLine};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Expected amplifier state.
#[derive(Debug, Clone)]
pub struct Amplifier {
    timing: AmplifierTiming,
    powered: bool,
    playing: bool,
}

impl Amplifier {
    /// Amplifier assumed off, nothing playing.
    pub fn new(timing: AmplifierTiming) -> Self {
        Self {
            timing,
            powered: false,
            playing: false,
        }
    }

    /// Predicted power state.
    #[inline]
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Whether an action currently owns the amplifier.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Press the power button, then select the line input.
    ///
    /// Blocks for the configured hold and settle times.
    pub fn toggle(&mut self, gpio: &mut dyn GpioDriver) {
        press(gpio, OutputLine::AmpPower, self.timing.power_hold());
        pause(self.timing.power_settle());
        press(gpio, OutputLine::AmpMode, self.timing.mode_hold());
        self.powered = !self.powered;
        debug!(
            "amplifier toggled, expected {}",
            if self.powered { "on" } else { "off" }
        );
    }

    /// Take the amplifier for an action and power it.
    pub fn begin(&mut self, gpio: &mut dyn GpioDriver) {
        self.playing = true;
        self.toggle(gpio);
    }

    /// Release the amplifier unless someone already did.
    pub fn finish(&mut self, gpio: &mut dyn GpioDriver) {
        if self.playing {
            self.toggle(gpio);
            self.playing = false;
        }
    }

    /// Drop ownership without touching the buttons.
    pub fn release(&mut self) {
        self.playing = false;
    }
}

fn press(gpio: &mut dyn GpioDriver, button: OutputLine, hold: Duration) {
    if let Err(e) = gpio.write(button, Level::High) {
        warn!("{:?} press failed: {}", button, e);
        return;
    }
    pause(hold);
    if let Err(e) = gpio.write(button, Level::Low) {
        warn!("{:?} release failed: {}", button, e);
    }
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}

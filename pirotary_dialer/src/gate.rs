//! Interrupt gate.
//!
//! Registers and cancels the GPIO callbacks around non-reentrant work. The
//! pulse-detect and pulse-count callbacks form one group: dialing is never
//! half-observed.
//!
//! Enabling a group arms it at the driver's current tick. An event already
//! sitting in the channel with an older tick happened while the group was
//! cancelled and is rejected by [`InterruptGate::admits`].

use bitflags::bitflags;
use pirotary_common::gpio::driver::GpioDriver;
use pirotary_common::gpio::types::{EdgeEvent, InputLine, Level, OutputLine};
use tracing::{debug, warn};

bitflags! {
    /// Registered callback groups.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CallbackGroups: u8 {
        /// Hook switch.
        const LINE = 0b001;
        /// Dial-in-progress.
        const PULSE_DETECT = 0b010;
        /// Pulse counter.
        const PULSE_COUNT = 0b100;
        /// Both rotary callbacks.
        const DIALING = Self::PULSE_DETECT.bits() | Self::PULSE_COUNT.bits();
    }
}

/// Callback registration state.
#[derive(Debug, Clone, Default)]
pub struct InterruptGate {
    active: CallbackGroups,
    line_armed_at: u64,
    dialing_armed_at: u64,
}

impl InterruptGate {
    /// Gate with every callback cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently registered groups.
    #[inline]
    pub fn active(&self) -> CallbackGroups {
        self.active
    }

    /// Whether the rotary callbacks are registered.
    #[inline]
    pub fn dialing_enabled(&self) -> bool {
        self.active.contains(CallbackGroups::DIALING)
    }

    /// Whether the hook-switch callback is registered.
    #[inline]
    pub fn line_enabled(&self) -> bool {
        self.active.contains(CallbackGroups::LINE)
    }

    /// Register every callback.
    pub fn enable_all(&mut self, gpio: &mut dyn GpioDriver) {
        self.set_line(gpio, true);
        self.set_dialing(gpio, true);
    }

    /// Cancel every callback.
    pub fn disable_all(&mut self, gpio: &mut dyn GpioDriver) {
        self.set_line(gpio, false);
        self.set_dialing(gpio, false);
    }

    /// Register the rotary callbacks; the hook-switch callback is untouched.
    pub fn enable_dialing_only(&mut self, gpio: &mut dyn GpioDriver) {
        self.set_dialing(gpio, true);
    }

    /// Register the hook-switch callback; the rotary callbacks are untouched.
    pub fn enable_line_only(&mut self, gpio: &mut dyn GpioDriver) {
        self.set_line(gpio, true);
    }

    /// Whether an event should reach its handler.
    pub fn admits(&self, event: &EdgeEvent) -> bool {
        let (group, armed_at) = match event.input {
            InputLine::LineSwitch => (CallbackGroups::LINE, self.line_armed_at),
            InputLine::DialDetect => (CallbackGroups::PULSE_DETECT, self.dialing_armed_at),
            InputLine::Pulse => (CallbackGroups::PULSE_COUNT, self.dialing_armed_at),
        };
        self.active.contains(group) && event.tick > armed_at
    }

    fn set_line(&mut self, gpio: &mut dyn GpioDriver, enabled: bool) {
        if enabled == self.line_enabled() {
            return;
        }
        if let Err(e) = gpio.set_edge_detect(InputLine::LineSwitch, enabled) {
            warn!("hook-switch callback {}: {}", on_off(enabled), e);
            return;
        }
        self.line_armed_at = gpio.tick();
        self.active.set(CallbackGroups::LINE, enabled);
        debug!("gate: line {} at tick {}", on_off(enabled), self.line_armed_at);
    }

    fn set_dialing(&mut self, gpio: &mut dyn GpioDriver, enabled: bool) {
        if enabled == self.dialing_enabled() {
            return;
        }
        for input in [InputLine::DialDetect, InputLine::Pulse] {
            if let Err(e) = gpio.set_edge_detect(input, enabled) {
                warn!("{:?} callback {}: {}", input, on_off(enabled), e);
                if enabled {
                    // Both rotary callbacks or neither.
                    for input in [InputLine::DialDetect, InputLine::Pulse] {
                        if let Err(e) = gpio.set_edge_detect(input, false) {
                            warn!("{:?} callback rollback: {}", input, e);
                        }
                    }
                }
                return;
            }
        }
        self.dialing_armed_at = gpio.tick();
        self.active.set(CallbackGroups::DIALING, enabled);
        if let Err(e) = gpio.write(OutputLine::DialingLed, Level::from(enabled)) {
            warn!("dialing indicator: {}", e);
        }
        debug!("gate: dialing {} at tick {}", on_off(enabled), self.dialing_armed_at);
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

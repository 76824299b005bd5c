//! GPIO constants.
//!
//! Broadcom pin numbers of the reference wiring. The connector pin is noted
//! next to each one.

/// Handset hook switch input (connector pin 16).
pub const DEFAULT_PIN_LINE_SWITCH: u8 = 23;

/// Dial-in-progress input (connector pin 13).
pub const DEFAULT_PIN_DIAL_DETECT: u8 = 27;

/// Dial pulse input (connector pin 12).
pub const DEFAULT_PIN_PULSE: u8 = 18;

/// Handset-lifted indicator (connector pin 7).
pub const DEFAULT_PIN_READY_LED: u8 = 4;

/// Per-pulse indicator (connector pin 19).
pub const DEFAULT_PIN_PULSE_LED: u8 = 24;

/// Dialing-enabled indicator (connector pin 22).
pub const DEFAULT_PIN_DIALING_LED: u8 = 25;

/// Amplifier power button relay (connector pin 15).
pub const DEFAULT_PIN_AMP_POWER: u8 = 22;

/// Amplifier input-mode button relay (connector pin 10).
pub const DEFAULT_PIN_AMP_MODE: u8 = 15;

/// Broadcom pin that must never carry a callback.
pub const RESERVED_PIN: u8 = 28;

/// Name of the built-in simulation driver.
pub const SIMULATION_DRIVER: &str = "simulation";

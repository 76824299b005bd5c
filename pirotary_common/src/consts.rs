//! System-wide constants for the PiRotary workspace.
//!
//! Single source of truth for command codes, buffer limits and default paths.

use static_assertions::const_assert;

/// Restart the dialer to its initial conditions.
pub const CODE_RESET: u32 = 666;

/// Digits of the reset code; the code is also recognised at the tail of a
/// longer run of dialed digits.
pub const CODE_RESET_DIGITS: usize = 3;

/// Play the next track of the playlist.
pub const CODE_NEXT_TRACK: u32 = 321;

/// Play the whole playlist.
pub const CODE_PLAY_ALL: u32 = 123;

/// Speak every title of the playlist.
pub const CODE_LIST_TITLES: u32 = 124;

/// Speak the help sentences.
pub const CODE_HELP: u32 = 111;

/// Speak the weather report of the configured airport.
pub const CODE_WEATHER: u32 = 100;

/// Reboot the host.
pub const CODE_REBOOT: u32 = 999;

/// Base of the per-track selection range (`401` selects the first track).
pub const TRACK_SELECT_BASE: u32 = 400;

/// Largest playlist the selection range can address without reaching other codes.
pub const MAX_TRACKS: usize = 99;

/// Compile-time upper bound of the digit buffer.
pub const MAX_DIGITS: usize = 8;

/// Default number of digits in a command code.
pub const DEFAULT_DIGIT_CAPACITY: usize = 3;

/// Raw edge count produced by ten physical pulses (the digit 0).
pub const RAW_PULSES_FOR_ZERO: u32 = 20;

/// First line of the weather report worth speaking.
pub const DEFAULT_WEATHER_SKIP_LINES: usize = 4;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/pirotary/pirotary.toml";

/// Default playlist file path.
pub const DEFAULT_PLAYLIST_PATH: &str = "/home/pi/smartphone/playlist.json";

/// Default spoken-message catalog path.
pub const DEFAULT_MESSAGES_PATH: &str = "/home/pi/smartphone/comments.json";

const_assert!(DEFAULT_DIGIT_CAPACITY <= MAX_DIGITS);
const_assert!(DEFAULT_DIGIT_CAPACITY > 0);
const_assert!(CODE_RESET_DIGITS <= MAX_DIGITS);

//! Dialer configuration (`pirotary.toml`).
//!
//! Every section is optional; an empty file yields the reference wiring,
//! the deployed catalog paths and the stock amplifier timings.
//!
//! ```toml
//! [shared]
//! log_level = "info"
//!
//! [catalog]
//! playlist = "/home/pi/smartphone/playlist.json"
//! messages = "/home/pi/smartphone/comments.json"
//!
//! [commands]
//! tts = ["/home/pi/smartphone/trans", "-sp"]
//! player = ["mplayer"]
//!
//! [amplifier]
//! power_hold_ms = 5000
//!
//! [dialer]
//! capacity = 3
//! announce_invalid = false
//! ```

use pirotary_common::catalog::{Catalog, CatalogError};
use pirotary_common::config::{ConfigError, ConfigLoader, SharedConfig};
use pirotary_common::consts::{
    DEFAULT_DIGIT_CAPACITY, DEFAULT_MESSAGES_PATH, DEFAULT_PLAYLIST_PATH,
    DEFAULT_WEATHER_SKIP_LINES, MAX_DIGITS,
};
use pirotary_common::gpio::config::GpioPins;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialerConfig {
    /// Logging and instance name.
    pub shared: SharedConfig,
    /// Catalog file locations.
    pub catalog: CatalogPaths,
    /// External programs.
    pub commands: ExternalCommands,
    /// Button-press timings of the amplifier.
    pub amplifier: AmplifierTiming,
    /// Digit buffer and dispatcher options.
    pub dialer: DialerSettings,
    /// Pin assignment.
    pub pins: GpioPins,
}

/// Catalog file locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogPaths {
    /// Playlist JSON.
    pub playlist: PathBuf,
    /// Spoken-message JSON.
    pub messages: PathBuf,
}

impl Default for CatalogPaths {
    fn default() -> Self {
        Self {
            playlist: PathBuf::from(DEFAULT_PLAYLIST_PATH),
            messages: PathBuf::from(DEFAULT_MESSAGES_PATH),
        }
    }
}

/// Argument-vector prefixes of the external programs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExternalCommands {
    /// Text-to-speech; the sentence is appended.
    pub tts: Vec<String>,
    /// Audio player; the file path is appended.
    pub player: Vec<String>,
    /// Reboot, run as is.
    pub reboot: Vec<String>,
    /// Weather query; the ICAO code is appended.
    pub weather: Vec<String>,
}

impl Default for ExternalCommands {
    fn default() -> Self {
        fn argv(parts: &[&str]) -> Vec<String> {
            parts.iter().map(|p| p.to_string()).collect()
        }
        Self {
            tts: argv(&["/home/pi/smartphone/trans", "-sp"]),
            player: argv(&["mplayer"]),
            reboot: argv(&["sudo", "reboot", "now"]),
            weather: argv(&["weather"]),
        }
    }
}

impl ExternalCommands {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, argv) in [
            ("tts", &self.tts),
            ("player", &self.player),
            ("reboot", &self.reboot),
            ("weather", &self.weather),
        ] {
            if argv.first().is_none_or(|program| program.is_empty()) {
                return Err(ConfigError::ValidationError(format!(
                    "commands.{name} needs a program"
                )));
            }
        }
        Ok(())
    }
}

/// Button-press timings of the amplifier relays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AmplifierTiming {
    /// How long the power button is held.
    pub power_hold_ms: u64,
    /// Pause after releasing the power button.
    pub power_settle_ms: u64,
    /// How long the mode button is held.
    pub mode_hold_ms: u64,
}

impl Default for AmplifierTiming {
    fn default() -> Self {
        Self {
            power_hold_ms: 5000,
            power_settle_ms: 2000,
            mode_hold_ms: 500,
        }
    }
}

impl AmplifierTiming {
    /// No waiting at all (tests and dry runs).
    pub const fn immediate() -> Self {
        Self {
            power_hold_ms: 0,
            power_settle_ms: 0,
            mode_hold_ms: 0,
        }
    }

    /// Power button hold.
    pub const fn power_hold(&self) -> Duration {
        Duration::from_millis(self.power_hold_ms)
    }

    /// Pause after the power button.
    pub const fn power_settle(&self) -> Duration {
        Duration::from_millis(self.power_settle_ms)
    }

    /// Mode button hold.
    pub const fn mode_hold(&self) -> Duration {
        Duration::from_millis(self.mode_hold_ms)
    }
}

/// Digit buffer and dispatcher options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialerSettings {
    /// Digits per command code.
    pub capacity: usize,
    /// Speak the invalid-number message when a full code matches nothing.
    pub announce_invalid: bool,
    /// Header lines of the weather report that are not spoken.
    pub weather_skip_lines: usize,
}

impl Default for DialerSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_DIGIT_CAPACITY,
            announce_invalid: false,
            weather_skip_lines: DEFAULT_WEATHER_SKIP_LINES,
        }
    }
}

impl DialerConfig {
    /// Load and validate a configuration file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading configuration from {:?}", path);
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic validation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.pins.validate()?;
        self.commands.validate()?;

        let capacity = self.dialer.capacity;
        if capacity == 0 || capacity > MAX_DIGITS {
            return Err(ConfigError::ValidationError(format!(
                "dialer.capacity must be between 1 and {MAX_DIGITS}, got {capacity}"
            )));
        }
        Ok(())
    }

    /// Load the catalog files named by this configuration.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::load(&self.catalog.playlist, &self.catalog.messages)
    }
}

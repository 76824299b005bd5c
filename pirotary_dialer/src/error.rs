//! Startup and runtime errors of the dialer.
//!
//! Only startup can fail. Inside event handlers every failure is logged and
//! absorbed at the point where it happens.

use pirotary_common::catalog::CatalogError;
use pirotary_common::config::ConfigError;
use pirotary_common::gpio::driver::GpioError;
use thiserror::Error;

/// Errors surfaced to the binary.
#[derive(Debug, Error)]
pub enum DialerError {
    /// Configuration file missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Playlist or message catalog missing or invalid.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// GPIO driver failure during startup or shutdown.
    #[error(transparent)]
    Gpio(#[from] GpioError),

    /// Every event sender was dropped.
    #[error("GPIO event source closed")]
    EventSourceClosed,
}

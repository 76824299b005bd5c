//! Prelude module for common re-exports.
//!
//! ```rust
//! use pirotary_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── Catalog ────────────────────────────────────────────────────────
pub use crate::catalog::{Catalog, CatalogError, MessageCatalog, Playlist};

// ─── GPIO ───────────────────────────────────────────────────────────
pub use crate::gpio::config::GpioPins;
pub use crate::gpio::driver::{DriverFactory, GpioDriver, GpioError};
pub use crate::gpio::types::{EdgeEvent, InputLine, Level, OutputLine};

//! GPIO driver trait and error types.
//!
//! This module defines:
//! - `GpioDriver` trait - Interface for pluggable GPIO backends
//! - `GpioError` enum - Error types for GPIO operations
//! - `DriverFactory` type alias - Factory function type

use crate::gpio::config::GpioPins;
use crate::gpio::types::{EdgeEvent, InputLine, Level, OutputLine};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Error types for GPIO operations.
#[derive(Debug, Clone, Error)]
pub enum GpioError {
    /// Driver initialization failed.
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Driver used before `init()`.
    #[error("Driver not initialized")]
    NotInitialized,

    /// Reading or writing a line failed.
    #[error("GPIO {pin} access failed: {reason}")]
    AccessFailed {
        /// Broadcom pin number.
        pin: u8,
        /// Backend message.
        reason: String,
    },

    /// Driver not found.
    #[error("Driver not found: {0}")]
    DriverNotFound(String),
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn GpioDriver>;

/// Trait defining the interface for GPIO drivers.
///
/// The driver owns electrical concerns (pin modes, pulls, debouncing, edge
/// detection). The dialer sees logical lines only.
///
/// # Lifecycle
///
/// 1. `init()` - pins configured, event sender handed over
/// 2. `read()` / `write()` / `set_edge_detect()` - from the dialer thread
/// 3. `shutdown()` - outputs released, callbacks cancelled
///
/// # Edge delivery
///
/// While edge detection is enabled for an input, every rising and falling
/// edge is sent as an [`EdgeEvent`] stamped with a monotonic tick. Edges of a
/// disabled input are dropped by the driver.
pub trait GpioDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Configure the pins and keep the sender for edge delivery.
    ///
    /// # Errors
    /// Return `GpioError::InitFailed` if the backend cannot be opened.
    fn init(&mut self, pins: &GpioPins, events: Sender<EdgeEvent>) -> Result<(), GpioError>;

    /// Current level of an input.
    fn read(&self, input: InputLine) -> Result<Level, GpioError>;

    /// Drive an output.
    fn write(&mut self, output: OutputLine, level: Level) -> Result<(), GpioError>;

    /// Register or cancel the edge callback of an input.
    fn set_edge_detect(&mut self, input: InputLine, enabled: bool) -> Result<(), GpioError>;

    /// Tick of the most recent edge observed by the driver.
    fn tick(&self) -> u64;

    /// Start background event production, if the backend has any.
    ///
    /// Default: nothing to start.
    fn start(&mut self) -> Result<(), GpioError> {
        Ok(())
    }

    /// Release outputs and cancel every callback.
    fn shutdown(&mut self) -> Result<(), GpioError>;
}

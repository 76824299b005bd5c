//! # PiRotary HAL Library
//!
//! GPIO driver registry and built-in drivers.
//!
//! Drivers implement the `GpioDriver` trait defined in
//! `pirotary_common::gpio::driver`.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - GPIO driver implementations
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                      pirotary_hal                             │
//! │  ┌──────────────────┐        ┌─────────────────────────────┐  │
//! │  │ Driver Registry  │───────►│ GpioDriver (trait object)   │  │
//! │  └──────────────────┘        └──────────────┬──────────────┘  │
//! │                                             │ EdgeEvent       │
//! │                                             ▼                 │
//! │                                   mpsc::Sender → dialer       │
//! └───────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod driver_registry;
pub mod drivers;

pub use crate::driver_registry::DriverRegistry;
pub use crate::drivers::simulation::{SimHandle, SimulationDriver};

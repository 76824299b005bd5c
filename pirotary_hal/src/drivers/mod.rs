//! GPIO driver implementations.
//!
//! - [`simulation`] - In-memory pins for development and testing
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `GpioDriver` trait from `pirotary_common::gpio::driver`
//! 3. Register the factory in [`register_all_drivers`]

pub mod simulation;

use crate::driver_registry::DriverRegistry;
use pirotary_common::gpio::consts::SIMULATION_DRIVER;

/// Register all built-in drivers.
pub fn register_all_drivers(registry: &mut DriverRegistry) {
    registry.register(SIMULATION_DRIVER, simulation::create_driver);
}

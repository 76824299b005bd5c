//! Simulation driver module.
//!
//! In-memory pins driven either by tests through a [`SimHandle`] or by a
//! person typing on stdin (see [`console`]).

pub mod console;
mod driver;
mod io;

pub use driver::SimulationDriver;
pub use io::SimHandle;

use pirotary_common::gpio::driver::GpioDriver;

/// Factory function used by the registry: an interactive simulation.
pub fn create_driver() -> Box<dyn GpioDriver> {
    Box::new(SimulationDriver::interactive())
}

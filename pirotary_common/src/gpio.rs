//! GPIO collaborator contract.
//!
//! The dialer never touches pins directly. It talks to a [`driver::GpioDriver`]
//! that delivers edge events over a channel and accepts output writes.

pub mod config;
pub mod consts;
pub mod driver;
pub mod types;

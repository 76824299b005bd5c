//! PiRotary Common Library
//!
//! This crate provides the shared types every PiRotary crate agrees on.
//!
//! # Module Structure
//!
//! - [`config`] - TOML configuration loading traits and types
//! - [`catalog`] - Playlist and spoken-message catalog (JSON)
//! - [`gpio`] - GPIO driver trait, logical lines and pin defaults
//! - [`consts`] - Command codes and system-wide limits
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```toml
//! [dependencies]
//! pirotary_common = { path = "../pirotary_common" }
//! ```
//!
//! ```rust
//! use pirotary_common::prelude::*;
//! ```

pub mod catalog;
pub mod config;
pub mod consts;
pub mod gpio;
pub mod prelude;

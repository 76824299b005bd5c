//! # PiRotary Dialer Library
//!
//! Turns the edges of a rotary telephone into commands for an announcement
//! and music appliance.
//!
//! ## Flow
//!
//! ```text
//! GpioDriver ──EdgeEvent──► Dialer (cycle) ──► InterruptGate::admits
//!                                 │
//!              ┌──────────────────┴──────────────────┐
//!              ▼                                     ▼
//!        LineMonitor                           PulseDecoder
//!   (pickup / hangup announcements)     (digit → DigitBuffer → dispatch)
//!                                                    │
//!                                                    ▼
//!                              gate suspended ─► ActionExecutor ─► gate resumed
//! ```
//!
//! ## Sequential critical sections
//!
//! Every handler runs to completion on the dialer thread. Before a blocking
//! action the gate cancels the callbacks; on resume it re-arms them at the
//! driver's current tick, so edges queued during the action are discarded
//! instead of being decoded late.

pub mod action;
pub mod command;
pub mod config;
pub mod context;
pub mod cycle;
pub mod error;
pub mod gate;
pub mod state;

pub use crate::context::DialerContext;
pub use crate::cycle::Dialer;
pub use crate::error::DialerError;

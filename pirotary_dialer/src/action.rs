//! Action module root.
//!
//! Long-running effects of the dialer: the external-process boundary and the
//! amplifier-bracketed announcements built on top of it.

pub mod announce;
pub mod executor;

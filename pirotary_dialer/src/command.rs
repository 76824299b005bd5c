//! Command module root.
//!
//! Digits accumulate in a [`DigitBuffer`]; after every digit the buffer's
//! value is matched against the ordered [`CommandTable`] and the first match
//! runs.

pub mod buffer;
pub mod dispatch;
pub mod table;

pub use buffer::DigitBuffer;
pub use table::{CodeMatcher, Command, CommandEntry, CommandKind, CommandTable};

//! Bounded digit accumulator.

use heapless::{Deque, Vec};
use pirotary_common::consts::MAX_DIGITS;
use std::fmt;
use tracing::warn;

/// Digits dialed since the last command.
///
/// Besides the current code, the buffer remembers the most recent digits
/// across full-buffer restarts so a code can be matched at the tail of the
/// dialed run.
#[derive(Debug, Clone)]
pub struct DigitBuffer {
    digits: Vec<u8, MAX_DIGITS>,
    recent: Deque<u8, MAX_DIGITS>,
    capacity: usize,
}

impl DigitBuffer {
    /// Empty buffer holding up to `capacity` digits (clamped to `1..=MAX_DIGITS`).
    pub fn new(capacity: usize) -> Self {
        Self {
            digits: Vec::new(),
            recent: Deque::new(),
            capacity: capacity.clamp(1, MAX_DIGITS),
        }
    }

    /// Maximum number of digits.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Digits held.
    #[inline]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Whether no digit is held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Whether the next push starts a new code.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.digits.len() >= self.capacity
    }

    /// Digits in dialing order.
    pub fn digits(&self) -> &[u8] {
        self.digits.as_slice()
    }

    /// Append a digit. A full buffer is cleared first; returns whether that
    /// happened.
    pub fn push(&mut self, digit: u8) -> bool {
        let cleared = self.is_full();
        if cleared {
            self.digits.clear();
        }
        let digit = digit % 10;
        if self.digits.push(digit).is_err() {
            warn!("digit buffer overflow, {} dropped", digit);
        }
        if self.recent.is_full() {
            self.recent.pop_front();
        }
        // Cannot fail: a slot was freed above.
        let _ = self.recent.push_back(digit);
        cleared
    }

    /// Numeric value of the digits, `None` when empty.
    pub fn value(&self) -> Option<u32> {
        if self.digits.is_empty() {
            return None;
        }
        Some(
            self.digits
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d)),
        )
    }

    /// Value of the last `count` digits dialed, across full-buffer
    /// restarts. `None` until that many digits are remembered.
    pub fn trailing_value(&self, count: usize) -> Option<u32> {
        let len = self.recent.len();
        if count == 0 || count > len {
            return None;
        }
        Some(
            self.recent
                .iter()
                .skip(len - count)
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d)),
        )
    }

    /// Drop the current code; the recent digits are kept.
    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Drop the current code and the recent digits.
    pub fn reset(&mut self) {
        self.digits.clear();
        self.recent.clear();
    }
}

impl fmt::Display for DigitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits.iter() {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

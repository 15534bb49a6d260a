//! Acquisition outcome types.
//!
//! Losing the race for a key is an expected result, not a fault, so it
//! travels the `Ok` channel as an explicit variant. Only genuinely
//! unexpected store failures use the error channel.

/// Outcome of a single lock acquisition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The compare-exchange write was accepted; this process holds the lock
    /// until its TTL elapses.
    Acquired,

    /// Another process already holds the key; no durable state was written.
    Contended,
}

impl AcquireOutcome {
    /// Returns `true` if the lock was acquired.
    pub fn is_acquired(&self) -> bool {
        matches!(self, Self::Acquired)
    }
}

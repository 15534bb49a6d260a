//! The lock-acquisition protocol client.

use std::time::Duration;

use cas_locker_core::error::{LockerError, LockerResult};
use cas_locker_core::outcome::AcquireOutcome;
use cas_locker_core::record::LockRecord;
use cas_locker_core::store::{CompareExchangeStore, ExchangeOutcome};
use tokio::sync::watch;
use tracing::{Span, instrument};

use crate::cancel::cancelled;

/// Client for a CAS-backed distributed lock.
///
/// Wraps a [`CompareExchangeStore`] and implements the acquisition protocol:
/// transform the name, build a fresh record, submit one atomic conditional
/// write, classify the result. Losing the race is an expected outcome; only
/// unexpected store faults surface as errors.
pub struct Locker<S> {
    store: S,
}

impl<S: CompareExchangeStore> Locker<S> {
    /// Creates a locker over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Provisions the store once at startup: the database/namespace and the
    /// expiration sweep the self-healing lease model depends on.
    pub async fn provision(&self, sweep_interval: Duration) -> LockerResult<()> {
        self.store.ensure_database_exists().await?;
        self.store.ensure_expiration_enabled(sweep_interval).await?;
        Ok(())
    }

    /// Attempts to acquire the lock `name` for up to `ttl`.
    ///
    /// Returns [`AcquireOutcome::Acquired`] only if the compare-exchange
    /// write committed with no conflict, meaning this process exclusively
    /// holds the lock until the store reclaims it. No durable state changes
    /// on contention.
    ///
    /// Cancellation is honored before and during the store round-trip. A
    /// call cancelled mid-flight returns [`LockerError::Cancelled`]: the
    /// outcome is unknown at that point and must never be treated as held.
    #[instrument(
        skip(self, cancel),
        fields(
            lock.name = %name,
            ttl = ?ttl,
            acquired = tracing::field::Empty,
            reason = tracing::field::Empty,
        )
    )]
    pub async fn try_acquire(
        &self,
        name: &str,
        ttl: Duration,
        cancel: &watch::Receiver<bool>,
    ) -> LockerResult<AcquireOutcome> {
        if *cancel.borrow() {
            return Err(LockerError::Cancelled);
        }

        let record = LockRecord::new(name)?;
        let expire_at = record.created_at + ttl;

        let mut cancel_rx = cancel.clone();
        let outcome = tokio::select! {
            result = self
                .store
                .compare_exchange_create(&record.transformed_key, &record, expire_at) =>
            {
                result?
            }
            _ = cancelled(&mut cancel_rx) => {
                return Err(LockerError::Cancelled);
            }
        };

        match outcome {
            ExchangeOutcome::Accepted => {
                Span::current().record("acquired", true);
                Ok(AcquireOutcome::Acquired)
            }
            ExchangeOutcome::Conflict => {
                Span::current().record("acquired", false);
                Span::current().record("reason", "lock_held");
                Ok(AcquireOutcome::Contended)
            }
        }
    }
}

//! The external compare-exchange store interface.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::LockerResult;
use crate::record::LockRecord;

/// Result of a compare-exchange create at the store level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The key was absent; the record was written.
    Accepted,

    /// The key already holds a value; nothing was written.
    Conflict,
}

/// Consistency mode used for compare-exchange writes.
///
/// Resolved once when a store is constructed and kept as part of its
/// immutable configuration; it is never re-derived per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionMode {
    /// Writes are agreed upon by a quorum of store nodes before being
    /// considered committed. Required for correctness: a CAS key is a
    /// cluster-level resource, and single-node concurrency checks would let
    /// two nodes both observe the key absent and both write.
    #[default]
    ClusterWide,

    /// Single-node optimistic concurrency. Only safe against a
    /// single-node store.
    SingleNode,
}

/// A cluster-wide compare-and-swap key-value store.
///
/// The store itself (consensus, replication, and the expiration sweep)
/// lives outside this workspace; this trait is the seam the locker client
/// talks through. Implementations must guarantee at most one accepted writer
/// per key at a given time, cluster-wide, and must scope any
/// connection/session state to the single call, releasing it on every exit
/// path.
pub trait CompareExchangeStore: Send + Sync {
    /// Atomically writes `record` under `key` if the key is absent.
    ///
    /// `expire_at` is attached to the written entry as server-side metadata:
    /// the store reclaims the key after that instant even if the owning
    /// process crashes. Returns [`ExchangeOutcome::Conflict`] when the key
    /// already holds a value that the sweep has not yet reclaimed; any other
    /// failure is a store error.
    fn compare_exchange_create(
        &self,
        key: &str,
        record: &LockRecord,
        expire_at: DateTime<Utc>,
    ) -> impl Future<Output = LockerResult<ExchangeOutcome>> + Send;

    /// Idempotently provisions the backing database/namespace.
    ///
    /// Concurrent provisioning by multiple instances is tolerated: a
    /// conflict from a racing winner is swallowed, since the desired end
    /// state already holds.
    fn ensure_database_exists(&self) -> impl Future<Output = LockerResult<()>> + Send;

    /// Idempotently enables the store's expiration sweep.
    ///
    /// A prerequisite for the self-healing lease model: without an active
    /// sweep, expired keys are never reclaimed and abandoned locks block
    /// acquisition forever.
    fn ensure_expiration_enabled(
        &self,
        sweep_interval: Duration,
    ) -> impl Future<Output = LockerResult<()>> + Send;
}

//! In-memory compare-exchange store double.
//!
//! Mimics the observable semantics of the cluster store: an atomic
//! create-if-absent per key, entries reclaimed only when the expiration
//! sweep runs (a lapsed lease that has not been swept still conflicts), and
//! race-tolerant provisioning.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cas_locker::{
    CompareExchangeStore, ExchangeOutcome, LockRecord, LockerError, LockerResult,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
struct StoredEntry {
    record: LockRecord,
    expire_at: DateTime<Utc>,
}

/// Test double for the external CAS store.
#[derive(Default)]
pub struct MemoryExchangeStore {
    entries: Arc<Mutex<HashMap<String, StoredEntry>>>,
    database_provisions: AtomicUsize,
    sweeper_started: AtomicBool,
    write_latency: Option<Duration>,
    always_conflict: bool,
    fail_writes: bool,
}

impl MemoryExchangeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every write, leaving a window to cancel mid-flight.
    pub fn with_write_latency(mut self, latency: Duration) -> Self {
        self.write_latency = Some(latency);
        self
    }

    /// A store on which every key is already held.
    pub fn always_conflict() -> Self {
        Self {
            always_conflict: true,
            ..Self::default()
        }
    }

    /// A store whose writes fail with an infrastructure error.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Number of keys currently held (swept or not yet expired).
    pub fn held_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Record currently stored under `key`, if any.
    pub fn record_for(&self, key: &str) -> Option<LockRecord> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|entry| entry.record.clone())
    }

    /// How many times database provisioning was requested.
    pub fn database_provisions(&self) -> usize {
        self.database_provisions.load(Ordering::SeqCst)
    }

    /// Whether the expiration sweep has been configured.
    pub fn sweeper_running(&self) -> bool {
        self.sweeper_started.load(Ordering::SeqCst)
    }
}

impl CompareExchangeStore for MemoryExchangeStore {
    async fn compare_exchange_create(
        &self,
        key: &str,
        record: &LockRecord,
        expire_at: DateTime<Utc>,
    ) -> LockerResult<ExchangeOutcome> {
        if let Some(latency) = self.write_latency {
            tokio::time::sleep(latency).await;
        }

        if self.fail_writes {
            return Err(LockerError::store(std::io::Error::other(
                "injected store failure",
            )));
        }

        if self.always_conflict {
            return Ok(ExchangeOutcome::Conflict);
        }

        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(key) {
            return Ok(ExchangeOutcome::Conflict);
        }

        entries.insert(
            key.to_string(),
            StoredEntry {
                record: record.clone(),
                expire_at,
            },
        );
        Ok(ExchangeOutcome::Accepted)
    }

    async fn ensure_database_exists(&self) -> LockerResult<()> {
        self.database_provisions.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ensure_expiration_enabled(&self, sweep_interval: Duration) -> LockerResult<()> {
        // Concurrent provisioners race here; exactly one starts the sweep
        // and the rest observe the configured end state.
        if !self.sweeper_started.swap(true, Ordering::SeqCst) {
            let entries = Arc::clone(&self.entries);
            tokio::spawn(async move {
                let mut tick = tokio::time::interval(sweep_interval);
                loop {
                    tick.tick().await;
                    let now = Utc::now();
                    entries.lock().unwrap().retain(|_, entry| entry.expire_at > now);
                }
            });
        }
        Ok(())
    }
}

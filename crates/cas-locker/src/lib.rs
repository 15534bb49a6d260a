//! Distributed mutual-exclusion locker over a cluster-wide compare-and-swap
//! store.
//!
//! Multiple independent processes race to acquire uniquely-named locks; at
//! most one process holds a given name at any time, and a held lock is
//! reclaimed by the store's expiration sweep once its TTL elapses. There is
//! no renewal and no explicit unlock: release is exclusively via expiration.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use cas_locker::{Locker, MongoExchangeStore, MongoStoreOptions};
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Configure and connect the backing store
//!     let options = MongoStoreOptions::new(
//!         vec!["localhost:27017".to_string()],
//!         "locker",
//!     );
//!     let store = MongoExchangeStore::connect(options).await?;
//!
//!     let locker = Locker::new(store);
//!     locker.provision(Duration::from_secs(60)).await?;
//!
//!     // One attempt: either we now hold "my-resource" for up to 60 seconds,
//!     // or another process does.
//!     let (_cancel_tx, cancel_rx) = watch::channel(false);
//!     let outcome = locker
//!         .try_acquire("my-resource", Duration::from_secs(60), &cancel_rx)
//!         .await?;
//!
//!     if outcome.is_acquired() {
//!         println!("holding the lock");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Crate Organization
//!
//! - [`Locker`]: the acquisition protocol over any
//!   [`CompareExchangeStore`]. Name transform, record construction, one
//!   atomic conditional write, outcome classification.
//! - [`AcquisitionRunner`]: a long-lived loop that acquires a fresh lock
//!   name per cycle, holds it, and idles; contention and store failures are
//!   fatal for the run by policy.
//! - Store backends live in their own crates; the MongoDB backend is
//!   re-exported here for convenience.

mod cancel;
pub mod locker;
pub mod runner;

pub use cas_locker_core::prelude::*;
pub use cas_locker_mongo::{MongoExchangeStore, MongoStoreOptions};
pub use locker::Locker;
pub use runner::{AcquisitionRunner, RunnerOptions};

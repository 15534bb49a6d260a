//! The driving acquisition loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use cas_locker_core::error::{LockerError, LockerResult};
use cas_locker_core::outcome::AcquireOutcome;
use cas_locker_core::store::CompareExchangeStore;
use tokio::sync::watch;
use tracing::{error, info};
use uuid::Uuid;

use crate::cancel::cancelled;
use crate::locker::Locker;

/// Timing configuration for [`AcquisitionRunner`].
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Server-enforced lease attached to each acquired lock.
    pub ttl: Duration,

    /// How long the lock is held after a successful acquisition.
    pub hold_interval: Duration,

    /// Idle time between cycles.
    pub cycle_interval: Duration,

    /// Requested cadence of the store's expiration sweep.
    pub sweep_interval: Duration,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            hold_interval: Duration::from_secs(5),
            cycle_interval: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// A long-lived periodic lock holder.
///
/// Each cycle derives a fresh lock name from the runner's run id and an
/// atomically-incremented sequence counter, attempts one acquisition, holds
/// the lock for a short interval, then idles until the next cycle.
///
/// Contention is fatal for the run: cooperating processes are not expected
/// to race for the same names, so losing the race terminates the loop with
/// [`LockerError::AcquisitionFailed`] instead of retrying locally. Store
/// failures likewise terminate the loop. Restarting a failed run is the
/// hosting layer's responsibility.
pub struct AcquisitionRunner<S> {
    locker: Locker<S>,
    run_id: Uuid,
    sequence: AtomicU64,
    options: RunnerOptions,
}

impl<S: CompareExchangeStore> AcquisitionRunner<S> {
    /// Creates a runner with a fresh run id.
    pub fn new(locker: Locker<S>, options: RunnerOptions) -> Self {
        Self {
            locker,
            run_id: Uuid::new_v4(),
            sequence: AtomicU64::new(0),
            options,
        }
    }

    /// The identifier lock names of this run are derived from.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Returns the underlying locker client.
    pub fn locker(&self) -> &Locker<S> {
        &self.locker
    }

    /// Next lock name: unique across cycles within this run, deliberately
    /// collidable across processes that reuse a run id.
    fn next_lock_name(&self) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        format!("lock-{}--{}", self.run_id, sequence)
    }

    /// Runs the loop until cancelled.
    ///
    /// Provisions the store once, then cycles indefinitely. Cancellation is
    /// checked at the top of each cycle and honored at every await point;
    /// it terminates the run cleanly with `Ok(())`.
    pub async fn run(&self, cancel: watch::Receiver<bool>) -> LockerResult<()> {
        self.locker.provision(self.options.sweep_interval).await?;

        while !*cancel.borrow() {
            match self.run_cycle(&cancel).await {
                Ok(()) => {}
                Err(LockerError::Cancelled) => return Ok(()),
                Err(err) => {
                    error!(error = %err, "acquisition cycle failed");
                    return Err(err);
                }
            }
        }

        Ok(())
    }

    async fn run_cycle(&self, cancel: &watch::Receiver<bool>) -> LockerResult<()> {
        let name = self.next_lock_name();
        info!(lock.name = %name, "acquiring lock");

        let started = Instant::now();
        match self
            .locker
            .try_acquire(&name, self.options.ttl, cancel)
            .await?
        {
            AcquireOutcome::Acquired => {
                info!(lock.name = %name, elapsed = ?started.elapsed(), "lock acquired");
                // Hold the lock: work happens here while the lease is live.
                sleep_cancellable(self.options.hold_interval, cancel).await?;
            }
            AcquireOutcome::Contended => {
                return Err(LockerError::AcquisitionFailed(name));
            }
        }

        sleep_cancellable(self.options.cycle_interval, cancel).await
    }
}

/// Sleeps for `duration`, aborting with [`LockerError::Cancelled`] as soon
/// as the cancellation signal fires.
async fn sleep_cancellable(
    duration: Duration,
    cancel: &watch::Receiver<bool>,
) -> LockerResult<()> {
    if *cancel.borrow() {
        return Err(LockerError::Cancelled);
    }

    let mut cancel_rx = cancel.clone();
    tokio::select! {
        _ = tokio::time::sleep(duration) => Ok(()),
        _ = cancelled(&mut cancel_rx) => Err(LockerError::Cancelled),
    }
}

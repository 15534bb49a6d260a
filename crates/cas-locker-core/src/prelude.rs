//! Convenience prelude for locker types.

pub use crate::error::{LockerError, LockerResult};
pub use crate::name::transform_name;
pub use crate::outcome::AcquireOutcome;
pub use crate::record::LockRecord;
pub use crate::store::{CompareExchangeStore, ExchangeOutcome, TransactionMode};

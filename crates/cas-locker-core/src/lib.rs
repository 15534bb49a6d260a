//! Core types and store abstraction for CAS-based distributed lockers.

pub mod error;
pub mod name;
pub mod outcome;
pub mod prelude;
pub mod record;
pub mod store;

pub use error::{LockerError, LockerResult};
pub use prelude::*;

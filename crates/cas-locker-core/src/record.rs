//! The versioned payload stored under a CAS key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LockerResult;
use crate::name::transform_name;

/// The lock record written under a CAS key.
///
/// A record is immutable once constructed; every acquisition attempt builds
/// a fresh one. The `id` is purely descriptive: the store resolves races on
/// the key alone, never on record identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockRecord {
    /// Unique identifier of this attempt.
    pub id: Uuid,

    /// Record creation timestamp, UTC.
    pub created_at: DateTime<Utc>,

    /// Human-readable lock name as supplied by the caller.
    pub name: String,

    /// Transformed name; the actual CAS key the record is stored under.
    pub transformed_key: String,
}

impl LockRecord {
    /// Builds a fresh record for `name`.
    pub fn new(name: &str) -> LockerResult<Self> {
        let transformed_key = transform_name(name)?;

        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            name: name.to_string(),
            transformed_key,
        })
    }
}

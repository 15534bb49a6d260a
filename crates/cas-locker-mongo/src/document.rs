use cas_locker_core::record::LockRecord;
use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};

/// BSON shape of a lock record.
///
/// The transformed key doubles as the `_id`, so the collection's unique
/// primary index is the compare-exchange arbiter. Timestamps are stored as
/// BSON dates (millisecond precision) so the TTL index can act on them.
#[derive(Debug, Serialize, Deserialize)]
pub struct LockerDocument {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "attemptId")]
    pub attempt_id: String,

    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,

    #[serde(rename = "expiresAt")]
    pub expires_at: bson::DateTime,
}

impl LockerDocument {
    /// Builds the document written for one acquisition attempt.
    pub fn from_record(record: &LockRecord, expire_at: DateTime<Utc>) -> Self {
        Self {
            id: record.transformed_key.clone(),
            attempt_id: record.id.to_string(),
            name: record.name.clone(),
            created_at: bson::DateTime::from_millis(record.created_at.timestamp_millis()),
            expires_at: bson::DateTime::from_millis(expire_at.timestamp_millis()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_is_keyed_by_transformed_name() {
        let record = LockRecord::new("lock-a").unwrap();
        let doc = LockerDocument::from_record(&record, record.created_at);
        assert_eq!(doc.id, record.transformed_key);
        assert_eq!(doc.name, "lock-a");
        assert_eq!(doc.attempt_id, record.id.to_string());
    }

    #[test]
    fn test_expiry_survives_bson_precision() {
        let record = LockRecord::new("lock-a").unwrap();
        let expire_at = record.created_at + std::time::Duration::from_secs(60);
        let doc = LockerDocument::from_record(&record, expire_at);
        assert_eq!(doc.expires_at.timestamp_millis(), expire_at.timestamp_millis());
    }
}

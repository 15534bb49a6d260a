//! Compare-exchange store implementation over MongoDB.

use std::time::Duration;

use cas_locker_core::error::{LockerError, LockerResult};
use cas_locker_core::record::LockRecord;
use cas_locker_core::store::{CompareExchangeStore, ExchangeOutcome};
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use tracing::debug;

use crate::document::LockerDocument;
use crate::options::MongoStoreOptions;

/// Server error code for a duplicate key on a unique index.
const DUPLICATE_KEY: i32 = 11000;
/// Server error code when a collection already exists.
const NAMESPACE_EXISTS: i32 = 48;
/// Server error codes when an index already exists with a different spec.
const INDEX_OPTIONS_CONFLICT: i32 = 85;
const INDEX_KEY_SPECS_CONFLICT: i32 = 86;

/// A [`CompareExchangeStore`] backed by MongoDB.
///
/// The compare-exchange create is an `insert_one` against the collection's
/// unique `_id` index; a duplicate-key rejection is the conflict signal.
/// Expired entries are reclaimed by the server's TTL monitor, so a key whose
/// lease has lapsed but has not yet been swept still conflicts.
pub struct MongoExchangeStore {
    client: Client,
    options: MongoStoreOptions,
}

impl MongoExchangeStore {
    /// Validates `options` and connects to the cluster.
    ///
    /// The transaction mode is resolved here, once: cluster-wide mode
    /// requests majority write acknowledgement on the connection itself.
    pub async fn connect(options: MongoStoreOptions) -> LockerResult<Self> {
        options.validate()?;

        let client_options = ClientOptions::parse(options.connection_uri())
            .await
            .map_err(LockerError::store)?;
        let client = Client::with_options(client_options).map_err(LockerError::store)?;

        Ok(Self { client, options })
    }

    /// Collection handle scoped to a single operation.
    fn collection(&self) -> Collection<LockerDocument> {
        self.client
            .database(&self.options.database)
            .collection(&self.options.collection)
    }

    fn command_error_code(err: &mongodb::error::Error) -> Option<i32> {
        match &*err.kind {
            ErrorKind::Command(command_err) => Some(command_err.code),
            _ => None,
        }
    }

    fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
        match &*err.kind {
            ErrorKind::Write(WriteFailure::WriteError(write_err)) => {
                write_err.code == DUPLICATE_KEY
            }
            _ => false,
        }
    }
}

impl CompareExchangeStore for MongoExchangeStore {
    async fn compare_exchange_create(
        &self,
        key: &str,
        record: &LockRecord,
        expire_at: DateTime<Utc>,
    ) -> LockerResult<ExchangeOutcome> {
        let document = LockerDocument::from_record(record, expire_at);
        debug_assert_eq!(document.id, key);

        match self.collection().insert_one(&document).await {
            Ok(_) => Ok(ExchangeOutcome::Accepted),
            Err(err) if Self::is_duplicate_key(&err) => Ok(ExchangeOutcome::Conflict),
            Err(err) => Err(LockerError::store(err)),
        }
    }

    async fn ensure_database_exists(&self) -> LockerResult<()> {
        // MongoDB materializes a database when its first collection is
        // created. A racing instance may win the creation; that conflict is
        // the desired end state already.
        let database = self.client.database(&self.options.database);
        match database.create_collection(&self.options.collection).await {
            Ok(()) => Ok(()),
            Err(err) if Self::command_error_code(&err) == Some(NAMESPACE_EXISTS) => Ok(()),
            Err(err) => Err(LockerError::store(err)),
        }
    }

    async fn ensure_expiration_enabled(&self, sweep_interval: Duration) -> LockerResult<()> {
        // The TTL monitor's cadence is fixed server-side (~60s); the
        // requested interval is recorded for operators but cannot shorten it.
        debug!(
            sweep_interval_secs = sweep_interval.as_secs(),
            "enabling expiration via TTL index"
        );

        let index = IndexModel::builder()
            .keys(doc! { "expiresAt": 1 })
            .options(IndexOptions::builder().expire_after(Duration::ZERO).build())
            .build();

        match self.collection().create_index(index).await {
            Ok(_) => Ok(()),
            Err(err)
                if matches!(
                    Self::command_error_code(&err),
                    Some(INDEX_OPTIONS_CONFLICT) | Some(INDEX_KEY_SPECS_CONFLICT)
                ) =>
            {
                Ok(())
            }
            Err(err) => Err(LockerError::store(err)),
        }
    }
}

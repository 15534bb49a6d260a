//! MongoDB store configuration.

use std::path::PathBuf;

use cas_locker_core::error::{LockerError, LockerResult};
use cas_locker_core::store::TransactionMode;

/// Configuration for [`MongoExchangeStore`](crate::MongoExchangeStore).
///
/// Validated before any connection attempt; startup fails fast on an empty
/// endpoint list or a blank database name.
#[derive(Debug, Clone)]
pub struct MongoStoreOptions {
    /// Server endpoints as `host:port` pairs.
    pub endpoints: Vec<String>,

    /// Database holding the locker collection.
    pub database: String,

    /// Collection lock records are written to.
    pub collection: String,

    /// Optional TLS client certificate (PEM certificate + key) used for
    /// authentication.
    pub certificate: Option<PathBuf>,

    /// Consistency mode for compare-exchange writes. Fixed at construction.
    pub transaction_mode: TransactionMode,
}

impl MongoStoreOptions {
    /// Default collection name for lock records.
    pub const DEFAULT_COLLECTION: &'static str = "lockers";

    /// Creates options for the given endpoints and database, with the
    /// default collection and cluster-wide writes.
    pub fn new(endpoints: Vec<String>, database: impl Into<String>) -> Self {
        Self {
            endpoints,
            database: database.into(),
            collection: Self::DEFAULT_COLLECTION.to_string(),
            certificate: None,
            transaction_mode: TransactionMode::default(),
        }
    }

    /// Checks the options, collecting every failure into one error.
    pub fn validate(&self) -> LockerResult<()> {
        let mut failures = Vec::new();

        if self.endpoints.is_empty() {
            failures.push("endpoints must not be empty".to_string());
        }
        for endpoint in &self.endpoints {
            if endpoint.trim().is_empty() {
                failures.push("endpoints must not contain blank entries".to_string());
                break;
            }
        }

        if self.database.trim().is_empty() {
            failures.push("database cannot be blank".to_string());
        }

        if self.collection.trim().is_empty() {
            failures.push("collection cannot be blank".to_string());
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LockerError::InvalidConfig(failures.join("; ")))
        }
    }

    /// Builds the connection URI for these options.
    ///
    /// The transaction mode and client certificate travel as URI options so
    /// they are fixed for the lifetime of the client.
    pub(crate) fn connection_uri(&self) -> String {
        let mut params = Vec::new();

        if self.transaction_mode == TransactionMode::ClusterWide {
            params.push("w=majority".to_string());
        }

        if let Some(certificate) = &self.certificate {
            params.push("tls=true".to_string());
            params.push(format!(
                "tlsCertificateKeyFile={}",
                certificate.display()
            ));
        }

        let hosts = self.endpoints.join(",");
        if params.is_empty() {
            format!("mongodb://{hosts}/")
        } else {
            format!("mongodb://{hosts}/?{}", params.join("&"))
        }
    }
}

//! Example: running the acquisition loop against MongoDB.
//!
//! Run with: `cargo run --example mongo_locker`

use cas_locker::{AcquisitionRunner, Locker, MongoExchangeStore, MongoStoreOptions, RunnerOptions};
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let endpoint =
        std::env::var("MONGODB_ENDPOINT").unwrap_or_else(|_| "localhost:27017".to_string());
    let options = MongoStoreOptions::new(vec![endpoint], "cas_locker_demo");

    let store = MongoExchangeStore::connect(options).await?;
    let runner = AcquisitionRunner::new(Locker::new(store), RunnerOptions::default());

    // Ctrl-C cancels the run; every delay and in-flight call honors it.
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = cancel_tx.send(true);
    });

    println!("acquisition loop started (run id {})", runner.run_id());
    runner.run(cancel_rx).await?;
    println!("acquisition loop stopped");

    Ok(())
}

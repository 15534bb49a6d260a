//! Cancellation signal helpers.

use tokio::sync::watch;

/// Resolves once the cancellation signal fires.
///
/// If the sender is dropped without ever signalling, cancellation can no
/// longer happen and the future stays pending.
pub(crate) async fn cancelled(rx: &mut watch::Receiver<bool>) {
    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

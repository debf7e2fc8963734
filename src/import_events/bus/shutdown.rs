//! Shutdown operations for the ImportEventBus

use std::sync::atomic::Ordering;

use super::core::ImportEventBus;

impl ImportEventBus {
    /// Signal shutdown to all subscribers
    ///
    /// Idempotent. All clones of this bus share the same shutdown signal.
    /// After shutdown `publish` refuses new events.
    pub fn shutdown(&self) {
        self.shutdown_flag.store(true, Ordering::SeqCst);
        self.shutdown.notify_waiters();
        log::debug!("Import event bus shutdown signaled");
    }

    /// Wait for shutdown signal
    ///
    /// Listeners use this with `tokio::select!` to exit their receive loop.
    pub async fn wait_for_shutdown(&self) {
        let notified = self.shutdown.notified();
        if self.is_shutdown() {
            return;
        }
        notified.await;
    }

    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown_flag.load(Ordering::SeqCst)
    }
}

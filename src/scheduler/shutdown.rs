//! Cooperative shutdown of the import worker

use std::sync::atomic::Ordering;

use super::core::ImportScheduler;

impl ImportScheduler {
    /// Cancel the worker without waiting for it
    ///
    /// Sets the current generation's cancel flag, wakes a parked worker and
    /// hands the join to a detached task, so the caller (typically the
    /// notifier) returns immediately. An import already running finishes
    /// normally. The teardown task stays in the worker slot until the
    /// worker has exited, so a restart waits for it.
    pub fn request_shutdown(&self) {
        if self.cancel_token().swap(true, Ordering::SeqCst) {
            log::debug!("Import scheduler shutdown already requested");
        } else {
            log::info!("Import scheduler shutdown requested");
        }
        self.wake_worker();

        let mut slot = self.inner.worker_handle.lock();
        let Some(worker) = slot.take() else {
            return;
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("No runtime available, leaving import worker to stop on its own");
            *slot = Some(worker);
            return;
        };

        *slot = Some(runtime.spawn(async move {
            match worker.await {
                Ok(Ok(())) => {
                    log::info!("Import scheduler teardown complete");
                    Ok(())
                }
                Ok(Err(e)) => {
                    log::warn!("Import worker had already failed: {e}");
                    Err(e)
                }
                Err(e) => {
                    log::error!("Import worker task panicked or was aborted: {e}");
                    Ok(())
                }
            }
        }));
    }
}

//! The single import worker: per-page execution and the drive loop

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::core::ImportScheduler;
use crate::errors::SchedulerError;
use crate::services::ImportRequest;
use crate::types::{PageId, SiteId};

impl ImportScheduler {
    /// Import one selected page and record the outcome on its queue
    ///
    /// A failed import drops the page; it is not retried. Cancellation is
    /// checked before the importer runs and exposed to it through
    /// [`ImportRequest::is_canceled`], but a running import is never
    /// interrupted.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::WorkerFatal`] if the importer reports an
    /// unrecoverable failure.
    pub async fn perform_import(&self, site: &SiteId, page_id: PageId) -> Result<(), SchedulerError> {
        self.import_page(site, page_id, &self.cancel_token()).await
    }

    async fn import_page(
        &self,
        site: &SiteId,
        page_id: PageId,
        cancel: &Arc<AtomicBool>,
    ) -> Result<(), SchedulerError> {
        let Some(queue) = self.queue(site) else {
            log::debug!("Site {site} was evicted before page {page_id} could be imported");
            return Ok(());
        };

        if cancel.load(Ordering::SeqCst) {
            queue.drop_importing(page_id);
            log::debug!("Skipping page {page_id} of site {site}: scheduler canceled");
            return Ok(());
        }

        let Some(binding) = queue.binding() else {
            queue.drop_importing(page_id);
            log::warn!("Site {site} has no bound user agent, dropping page {page_id}");
            return Ok(());
        };

        let request = ImportRequest::new(
            queue.clone(),
            page_id,
            binding.user_agent,
            binding.context,
            Arc::clone(cancel),
        );

        match self.inner.collaborators.importer.import_page(&request).await {
            Ok(()) => {
                queue.mark_imported(page_id);
                self.inner.metrics.increment_imported();
                log::debug!("Imported page {page_id} of site {site}");
                Ok(())
            }
            Err(e) if e.is_fatal() => {
                queue.drop_importing(page_id);
                self.inner.metrics.increment_failed();
                log::error!("Fatal error importing page {page_id} of site {site}: {e}");
                Err(SchedulerError::WorkerFatal {
                    site: site.clone(),
                    page_id,
                    reason: e.to_string(),
                })
            }
            Err(e) => {
                queue.drop_importing(page_id);
                self.inner.metrics.increment_failed();
                log::error!("Failed to import page {page_id} of site {site}: {e}");
                Ok(())
            }
        }
    }

    /// Drive imports until canceled or a fatal error occurs
    ///
    /// Parks while no site has work; producers wake it. Search indexing is
    /// paused while the worker is busy and resumed when it goes idle.
    ///
    /// # Errors
    ///
    /// Propagates the fatal error that stopped the loop.
    pub async fn run_worker(&self) -> Result<(), SchedulerError> {
        self.drive(self.cancel_token()).await
    }

    /// Worker loop bound to one generation's cancel flag
    async fn drive(&self, cancel: Arc<AtomicBool>) -> Result<(), SchedulerError> {
        self.inner.worker_running.store(true, Ordering::SeqCst);
        log::info!("Import worker started");

        let indexing = &self.inner.collaborators.indexing;
        let idle_wait = self.inner.config.idle_wait();
        let mut busy = false;

        let result = loop {
            if cancel.load(Ordering::SeqCst) {
                break Ok(());
            }

            match self.next_event() {
                Some((site, page_id)) => {
                    if !busy {
                        indexing.pause_indexing();
                        busy = true;
                    }
                    if let Err(e) = self.import_page(&site, page_id, &cancel).await {
                        break Err(e);
                    }
                }
                None => {
                    if busy {
                        indexing.resume_indexing();
                        busy = false;
                    }
                    log::trace!("Import worker idle");
                    if tokio::time::timeout(idle_wait, self.inner.wake.notified())
                        .await
                        .is_err()
                    {
                        log::trace!("Import worker idle wait elapsed, rescanning sites");
                    }
                }
            }
        };

        if busy {
            indexing.resume_indexing();
        }
        // A restarted generation owns the flag from here on
        if Arc::ptr_eq(&cancel, &*self.inner.cancel_token.lock()) {
            self.inner.worker_running.store(false, Ordering::SeqCst);
        }
        log::info!("Import worker stopped");
        result
    }

    /// Spawn the worker if it is not already running
    ///
    /// Starts a new worker generation with a fresh cancel flag. If a
    /// canceled worker is still finishing an in-flight import, the new
    /// worker waits for it before importing anything. Returns false if a
    /// live, uncanceled worker already exists.
    pub fn start_worker(&self) -> bool {
        let mut slot = self.inner.worker_handle.lock();
        let previous = match slot.take() {
            Some(existing) if !existing.is_finished() && !self.is_canceled() => {
                *slot = Some(existing);
                return false;
            }
            previous => previous,
        };

        let cancel = Arc::new(AtomicBool::new(false));
        *self.inner.cancel_token.lock() = Arc::clone(&cancel);
        self.inner.worker_running.store(true, Ordering::SeqCst);

        let scheduler = self.clone();
        *slot = Some(tokio::spawn(async move {
            if let Some(previous) = previous {
                if !previous.is_finished() {
                    log::debug!("Waiting for the previous import worker to stop");
                }
                match previous.await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => log::debug!("Previous import worker had failed: {e}"),
                    Err(e) => log::warn!("Previous import worker panicked or was aborted: {e}"),
                }
            }
            if cancel.load(Ordering::SeqCst) {
                if Arc::ptr_eq(&cancel, &*scheduler.inner.cancel_token.lock()) {
                    scheduler.inner.worker_running.store(false, Ordering::SeqCst);
                }
                return Ok(());
            }

            let result = scheduler.drive(cancel).await;
            if let Err(e) = &result {
                log::error!("Import worker terminated: {e}");
            }
            result
        }));
        true
    }
}

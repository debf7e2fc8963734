//! Site queue registry: lazy creation, eviction and cap propagation

use std::sync::Arc;

use super::core::ImportScheduler;
use crate::errors::SchedulerError;
use crate::site_queue::SiteImportQueue;
use crate::types::SiteId;

impl ImportScheduler {
    /// Get the queue for `site`, creating and seeding it on first use
    ///
    /// The fast path is a plain concurrent lookup. On a miss, creation runs
    /// under `creation_lock` and re-checks the registry first, so racing
    /// producers for a new site end up sharing one queue. If seeding fails
    /// nothing is registered and the next call tries again.
    pub(super) async fn get_or_create_queue(
        &self,
        site: &SiteId,
    ) -> Result<Arc<SiteImportQueue>, SchedulerError> {
        if let Some(queue) = self.queue(site) {
            return Ok(queue);
        }

        let _guard = self.inner.creation_lock.lock().await;
        if let Some(queue) = self.queue(site) {
            return Ok(queue);
        }

        let catalog = &self.inner.collaborators.catalog;
        let cataloged = catalog
            .find_cataloged_page_ids(site)
            .await
            .map_err(|source| SchedulerError::Catalog {
                site: site.clone(),
                source,
            })?;
        let imported = catalog
            .find_imported_page_ids(site)
            .await
            .map_err(|source| SchedulerError::Catalog {
                site: site.clone(),
                source,
            })?;

        let queue = Arc::new(SiteImportQueue::with_link_capacity(
            site.clone(),
            self.inner.system.import_page_max(),
            self.inner.config.link_cache_capacity(),
        ));
        queue.seed(&cataloged, &imported);
        self.inner.registry.insert(site.clone(), Arc::clone(&queue));
        self.inner.metrics.increment_sites_created();

        log::debug!(
            "Created import queue for site {site}: {} cataloged, {} imported",
            cataloged.len(),
            imported.len()
        );
        Ok(queue)
    }

    /// Drop all in-memory state for `site`
    ///
    /// Returns true if the site was cached.
    pub fn evict_site(&self, site: &SiteId) -> bool {
        let removed = self.inner.registry.remove(site).is_some();

        {
            let mut active = self.inner.active_site.lock();
            if active.as_ref() == Some(site) {
                *active = None;
            }
        }

        if removed {
            self.inner.metrics.increment_sites_evicted();
            log::info!("Evicted import queue for deleted site {site}");
        }
        removed
    }

    /// Push the live `import_page_max` into every cached queue
    pub fn apply_import_page_max(&self) {
        let max = self.inner.system.import_page_max();
        for entry in self.inner.registry.iter() {
            entry.value().set_max_import_count(max);
        }
        log::debug!(
            "Applied import_page_max={max} to {} cached sites",
            self.inner.registry.len()
        );
        // A raised cap can unblock a parked site
        self.wake_worker();
    }
}

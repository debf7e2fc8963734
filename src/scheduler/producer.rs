//! Producer-facing operations, called from request handlers

use super::core::ImportScheduler;
use crate::errors::SchedulerError;
use crate::types::{CallerContext, PageId, SiteId};

impl ImportScheduler {
    /// Queue newly cataloged pages for `site` and wake the worker
    ///
    /// The first call for a site binds `user_agent` and `context`; the
    /// worker reuses them for every import of that site. Later calls keep
    /// the original binding.
    ///
    /// Returns the number of ids that were not already cataloged.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Catalog`] if the site's queue had to be
    /// created and the catalog lookup failed.
    pub async fn add_cataloged_page_ids(
        &self,
        site: &SiteId,
        user_agent: &str,
        context: CallerContext,
        ids: &[PageId],
    ) -> Result<usize, SchedulerError> {
        let queue = self.get_or_create_queue(site).await?;

        if queue.bind(user_agent, context) {
            log::debug!("Bound user agent '{user_agent}' to site {site}");
        }

        let added = queue.add_cataloged(ids.iter().copied());
        log::debug!(
            "Cataloged {added} new pages for site {site} ({} submitted)",
            ids.len()
        );

        self.wake_worker();
        Ok(added)
    }

    /// Forget `page_id` on the site named `site_name`
    ///
    /// Unknown or uncached sites are ignored. Returns true if the page was
    /// importing or imported.
    pub fn remove_import_page(&self, site_name: &str, page_id: PageId) -> bool {
        let Some(site) = self.inner.collaborators.resolver.resolve_site(site_name) else {
            log::debug!("Ignoring remove for unknown site name '{site_name}'");
            return false;
        };
        let Some(queue) = self.queue(&site) else {
            return false;
        };
        queue.forget_imported(page_id)
    }
}

//! Sticky-site selection of the next page to import

use super::core::ImportScheduler;
use crate::types::{PageId, SiteId};

impl ImportScheduler {
    /// Pick the next `(site, page)` for the worker, or `None` if nothing is
    /// importable right now
    ///
    /// The active site keeps the worker until it runs dry or hits its cap.
    /// Only then is it dropped and one other waiting site tried. The
    /// returned page has already moved to its queue's importing set.
    pub fn next_event(&self) -> Option<(SiteId, PageId)> {
        let mut active = self.inner.active_site.lock();

        for _ in 0..2 {
            if active.is_none() {
                *active = self.find_waiting_site();
                if let Some(site) = active.as_ref() {
                    log::debug!("Import worker switching to site {site}");
                }
            }

            let site = active.clone()?;
            let next = self
                .inner
                .registry
                .get(&site)
                .and_then(|queue| queue.next_id());

            if let Some(page_id) = next {
                return Some((site, page_id));
            }
            *active = None;
        }

        None
    }

    /// First cached site (in registry order) with importable pages
    fn find_waiting_site(&self) -> Option<SiteId> {
        self.inner
            .registry
            .iter()
            .find(|entry| entry.value().has_pending_work())
            .map(|entry| entry.key().clone())
    }
}

//! The unit of work handed to a [`PageImporter`](super::PageImporter)

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::site_queue::SiteImportQueue;
use crate::types::{CallerContext, LinkRecord, PageId, SiteId};

/// One page import, carrying the site's bound producer identity and
/// access to the site's link-dedupe cache
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub site: SiteId,
    pub page_id: PageId,
    pub user_agent: String,
    pub context: CallerContext,
    queue: Arc<SiteImportQueue>,
    canceled: Arc<AtomicBool>,
}

impl ImportRequest {
    pub(crate) fn new(
        queue: Arc<SiteImportQueue>,
        page_id: PageId,
        user_agent: String,
        context: CallerContext,
        canceled: Arc<AtomicBool>,
    ) -> Self {
        Self {
            site: queue.site().clone(),
            page_id,
            user_agent,
            context,
            queue,
            canceled,
        }
    }

    /// True once the scheduler is shutting down
    ///
    /// Long imports may poll this to stop early; nothing forces them to.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    pub fn record_link(&self, raw_link: &str, record: LinkRecord) {
        self.queue.record_link(raw_link, record);
    }

    #[must_use]
    pub fn lookup_link(&self, raw_link: &str) -> Option<LinkRecord> {
        self.queue.lookup_link(raw_link)
    }

    #[must_use]
    pub fn is_link_recorded(&self, raw_link: &str) -> bool {
        self.queue.is_link_recorded(raw_link)
    }
}

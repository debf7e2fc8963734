//! Per-site import queue
//!
//! Every page id known to a site lives in at most one of three sets:
//! cataloged (waiting, ordered ascending), importing (handed to the worker)
//! and imported (done). All transitions take the same queue lock so no
//! reader ever sees an id half-moved between sets.

use parking_lot::Mutex;
use std::collections::{BTreeSet, HashSet};

use super::link_cache::LinkDedupeCache;
use crate::types::{CallerContext, LinkRecord, PageId, SiteId, SiteQueueSnapshot};
use crate::utils::LINK_CACHE_CAPACITY;

/// Producer identity bound to a site on its first catalog call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBinding {
    pub user_agent: String,
    pub context: CallerContext,
}

#[derive(Debug)]
struct QueueState {
    cataloged: BTreeSet<PageId>,
    importing: HashSet<PageId>,
    imported: HashSet<PageId>,
    max_import_count: i64,
    binding: Option<SiteBinding>,
}

impl QueueState {
    fn is_at_capacity(&self) -> bool {
        self.max_import_count >= 0
            && (self.importing.len() + self.imported.len()) as i64 >= self.max_import_count
    }
}

/// Import state for a single site
#[derive(Debug)]
pub struct SiteImportQueue {
    site: SiteId,
    state: Mutex<QueueState>,
    links: Mutex<LinkDedupeCache>,
}

impl SiteImportQueue {
    /// Create an empty queue
    ///
    /// A negative `max_import_count` means unlimited.
    #[must_use]
    pub fn new(site: SiteId, max_import_count: i64) -> Self {
        Self::with_link_capacity(site, max_import_count, LINK_CACHE_CAPACITY)
    }

    #[must_use]
    pub fn with_link_capacity(site: SiteId, max_import_count: i64, link_capacity: usize) -> Self {
        Self {
            site,
            state: Mutex::new(QueueState {
                cataloged: BTreeSet::new(),
                importing: HashSet::new(),
                imported: HashSet::new(),
                max_import_count,
                binding: None,
            }),
            links: Mutex::new(LinkDedupeCache::with_capacity(link_capacity)),
        }
    }

    /// Load ids the catalog already knows about
    ///
    /// Imported ids win over cataloged ones so the sets stay disjoint.
    pub fn seed(&self, cataloged: &[PageId], imported: &[PageId]) {
        let mut state = self.state.lock();
        state.cataloged.extend(cataloged.iter().copied());
        for id in imported {
            state.cataloged.remove(id);
            state.importing.remove(id);
            state.imported.insert(*id);
        }
    }

    #[must_use]
    pub fn site(&self) -> &SiteId {
        &self.site
    }

    /// Bind the producer identity if none is bound yet
    ///
    /// Returns true if this call performed the binding.
    pub fn bind(&self, user_agent: &str, context: CallerContext) -> bool {
        let mut state = self.state.lock();
        if state.binding.is_some() {
            return false;
        }
        state.binding = Some(SiteBinding {
            user_agent: user_agent.to_string(),
            context,
        });
        true
    }

    #[must_use]
    pub fn binding(&self) -> Option<SiteBinding> {
        self.state.lock().binding.clone()
    }

    /// Union `ids` into the cataloged set
    ///
    /// Ids already importing or imported are not checked; re-cataloging an
    /// imported id queues it again. Returns how many ids were new to the
    /// cataloged set.
    pub fn add_cataloged<I>(&self, ids: I) -> usize
    where
        I: IntoIterator<Item = PageId>,
    {
        let mut state = self.state.lock();
        ids.into_iter()
            .filter(|id| state.cataloged.insert(*id))
            .count()
    }

    /// Take the smallest cataloged id and move it to importing
    ///
    /// Returns `None` without touching anything when the queue is empty or
    /// at capacity.
    pub fn next_id(&self) -> Option<PageId> {
        let mut state = self.state.lock();
        if state.is_at_capacity() {
            return None;
        }
        let id = state.cataloged.pop_first()?;
        state.importing.insert(id);
        Some(id)
    }

    /// Record a successful import
    pub fn mark_imported(&self, id: PageId) {
        let mut state = self.state.lock();
        state.importing.remove(&id);
        state.cataloged.remove(&id);
        state.imported.insert(id);
    }

    /// Record several successful imports under one lock acquisition
    pub fn mark_imported_all(&self, ids: &[PageId]) {
        let mut state = self.state.lock();
        for id in ids {
            state.importing.remove(id);
            state.cataloged.remove(id);
            state.imported.insert(*id);
        }
    }

    /// Drop a failed import; the id ends up in no set
    pub fn drop_importing(&self, id: PageId) -> bool {
        self.state.lock().importing.remove(&id)
    }

    /// Forget an importing or imported id
    ///
    /// Returns true if the id was present in either set.
    pub fn forget_imported(&self, id: PageId) -> bool {
        let mut state = self.state.lock();
        let was_importing = state.importing.remove(&id);
        let was_imported = state.imported.remove(&id);
        was_importing || was_imported
    }

    #[must_use]
    pub fn is_at_capacity(&self) -> bool {
        self.state.lock().is_at_capacity()
    }

    /// True when there is something to import and the worker may take it
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        let state = self.state.lock();
        !state.cataloged.is_empty() && state.binding.is_some() && !state.is_at_capacity()
    }

    #[must_use]
    pub fn max_import_count(&self) -> i64 {
        self.state.lock().max_import_count
    }

    pub fn set_max_import_count(&self, max_import_count: i64) {
        self.state.lock().max_import_count = max_import_count;
    }

    #[must_use]
    pub fn is_cataloged(&self, id: PageId) -> bool {
        self.state.lock().cataloged.contains(&id)
    }

    #[must_use]
    pub fn is_importing(&self, id: PageId) -> bool {
        self.state.lock().importing.contains(&id)
    }

    #[must_use]
    pub fn is_imported(&self, id: PageId) -> bool {
        self.state.lock().imported.contains(&id)
    }

    pub fn record_link(&self, raw_link: &str, record: LinkRecord) {
        self.links.lock().record(raw_link, record);
    }

    #[must_use]
    pub fn lookup_link(&self, raw_link: &str) -> Option<LinkRecord> {
        self.links.lock().lookup(raw_link).cloned()
    }

    #[must_use]
    pub fn is_link_recorded(&self, raw_link: &str) -> bool {
        self.links.lock().contains(raw_link)
    }

    #[must_use]
    pub fn cached_link_count(&self) -> usize {
        self.links.lock().len()
    }

    #[must_use]
    pub fn snapshot(&self) -> SiteQueueSnapshot {
        let cached_links = self.cached_link_count();
        let state = self.state.lock();

        let mut importing: Vec<PageId> = state.importing.iter().copied().collect();
        importing.sort_unstable();
        let mut imported: Vec<PageId> = state.imported.iter().copied().collect();
        imported.sort_unstable();

        SiteQueueSnapshot {
            site: self.site.clone(),
            cataloged: state.cataloged.iter().copied().collect(),
            importing,
            imported,
            max_import_count: state.max_import_count,
            at_capacity: state.is_at_capacity(),
            cached_links,
        }
    }
}

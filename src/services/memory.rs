//! Simple collaborator implementations: one-to-one id mapping, a no-op
//! indexing hook and an in-memory catalog.

use dashmap::DashMap;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{CatalogService, IdResolver, IndexingHook};
use crate::errors::ImportError;
use crate::types::{PageId, PageRef, SiteId};

/// Treats site names as site ids and page keys as decimal page ids
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectIdResolver;

impl IdResolver for DirectIdResolver {
    fn resolve_site(&self, site_name: &str) -> Option<SiteId> {
        let name = site_name.trim();
        if name.is_empty() {
            None
        } else {
            Some(SiteId::new(name))
        }
    }

    fn resolve_page(&self, page: &PageRef) -> Option<(SiteId, PageId)> {
        let site = self.resolve_site(&page.site_name)?;
        let id = page.key.trim().parse::<PageId>().ok()?;
        Some((site, id))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopIndexingHook;

impl IndexingHook for NoopIndexingHook {}

#[derive(Debug, Clone, Default)]
struct CatalogEntry {
    cataloged: Vec<PageId>,
    imported: Vec<PageId>,
}

/// Catalog backed by a concurrent map
///
/// Counts how many times each site was looked up so callers can observe
/// queue (re)seeding.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    sites: DashMap<SiteId, CatalogEntry>,
    lookups: DashMap<SiteId, AtomicUsize>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace what the catalog reports for `site`
    pub fn set_site(&self, site: impl Into<SiteId>, cataloged: Vec<PageId>, imported: Vec<PageId>) {
        self.sites
            .insert(site.into(), CatalogEntry { cataloged, imported });
    }

    /// Forget everything recorded for `site`; later lookups report no pages
    pub fn remove_site(&self, site: &SiteId) {
        self.sites.remove(site);
    }

    /// Number of cataloged-id lookups made for `site`
    #[must_use]
    pub fn lookup_count(&self, site: &SiteId) -> usize {
        self.lookups
            .get(site)
            .map_or(0, |count| count.load(Ordering::SeqCst))
    }
}

impl CatalogService for InMemoryCatalog {
    fn find_cataloged_page_ids<'a>(
        &'a self,
        site: &'a SiteId,
    ) -> BoxFuture<'a, Result<Vec<PageId>, ImportError>> {
        Box::pin(async move {
            self.lookups
                .entry(site.clone())
                .or_default()
                .fetch_add(1, Ordering::SeqCst);
            Ok(self
                .sites
                .get(site)
                .map(|entry| entry.cataloged.clone())
                .unwrap_or_default())
        })
    }

    fn find_imported_page_ids<'a>(
        &'a self,
        site: &'a SiteId,
    ) -> BoxFuture<'a, Result<Vec<PageId>, ImportError>> {
        Box::pin(async move {
            Ok(self
                .sites
                .get(site)
                .map(|entry| entry.imported.clone())
                .unwrap_or_default())
        })
    }
}

//! External collaborators of the import scheduler
//!
//! The scheduler never transforms pages, discovers them, or resolves ids
//! itself. Those concerns are injected through the traits below.

use futures::future::BoxFuture;
use std::sync::Arc;

use crate::errors::ImportError;
use crate::types::{PageId, PageRef, SiteId};

pub mod memory;
pub mod request;

pub use memory::{DirectIdResolver, InMemoryCatalog, NoopIndexingHook};
pub use request::ImportRequest;

/// Performs the actual import of one page
///
/// Returning `ImportError::Fatal` stops the worker; any other error drops
/// the page.
pub trait PageImporter: Send + Sync {
    fn import_page<'a>(&'a self, request: &'a ImportRequest)
    -> BoxFuture<'a, Result<(), ImportError>>;
}

/// Source of the ids a site already has, consulted once per queue creation
pub trait CatalogService: Send + Sync {
    fn find_cataloged_page_ids<'a>(
        &'a self,
        site: &'a SiteId,
    ) -> BoxFuture<'a, Result<Vec<PageId>, ImportError>>;

    fn find_imported_page_ids<'a>(
        &'a self,
        site: &'a SiteId,
    ) -> BoxFuture<'a, Result<Vec<PageId>, ImportError>>;
}

/// Side-effect-free id mapping
pub trait IdResolver: Send + Sync {
    fn resolve_site(&self, site_name: &str) -> Option<SiteId>;

    fn resolve_page(&self, page: &PageRef) -> Option<(SiteId, PageId)>;
}

/// Hook around search indexing while the worker is busy
///
/// Both methods default to doing nothing.
pub trait IndexingHook: Send + Sync {
    fn pause_indexing(&self) {}

    fn resume_indexing(&self) {}
}

/// Bundle of collaborators handed to the scheduler at construction
#[derive(Clone)]
pub struct Collaborators {
    pub importer: Arc<dyn PageImporter>,
    pub catalog: Arc<dyn CatalogService>,
    pub resolver: Arc<dyn IdResolver>,
    pub indexing: Arc<dyn IndexingHook>,
}

impl Collaborators {
    /// Importer and catalog are required; the resolver maps names
    /// one-to-one and the indexing hook does nothing unless replaced.
    #[must_use]
    pub fn new(importer: Arc<dyn PageImporter>, catalog: Arc<dyn CatalogService>) -> Self {
        Self {
            importer,
            catalog,
            resolver: Arc::new(DirectIdResolver),
            indexing: Arc::new(NoopIndexingHook),
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn IdResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub fn with_indexing_hook(mut self, indexing: Arc<dyn IndexingHook>) -> Self {
        self.indexing = indexing;
        self
    }
}

//! Error types for page imports and scheduler operations

use crate::types::{PageId, SiteId};

/// Failure reported by a collaborator while importing or seeding
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportError {
    /// Recoverable failure: the page is dropped and the worker moves on
    #[error("Import failed: {0}")]
    Failed(String),

    /// Unrecoverable failure: the worker loop stops
    #[error("Fatal import failure: {0}")]
    Fatal(String),

    /// Catalog lookup failed
    #[error("Catalog lookup failed: {0}")]
    Catalog(String),
}

impl ImportError {
    /// Returns true if this error must stop the worker loop
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, ImportError::Fatal(_))
    }
}

/// Error type for scheduler operations
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// Seeding a new site queue from the catalog failed; nothing was registered
    #[error("Failed to seed import queue for site {site}: {source}")]
    Catalog {
        site: SiteId,
        #[source]
        source: ImportError,
    },

    /// The worker hit an unrecoverable failure and stopped
    #[error("Worker stopped on site {site}, page {page_id}: {reason}")]
    WorkerFatal {
        site: SiteId,
        page_id: PageId,
        reason: String,
    },
}

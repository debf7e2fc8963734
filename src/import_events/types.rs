//! Notification types consumed by the import scheduler
//!
//! The set of notifications is closed: the scheduler matches on every
//! variant instead of registering per-type listeners.

use serde::{Deserialize, Serialize};

use crate::types::{PageRef, SiteId};

/// Lifecycle notifications delivered over the [`ImportEventBus`](super::ImportEventBus)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ImportEvent {
    /// Server finished starting; the scheduler applies the cap and starts its worker
    ServerInitialized {
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// Server is stopping; the scheduler cancels its worker without blocking
    ServerShutdown {
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// A site was deleted; all in-memory import state for it is discarded
    SiteDeleted {
        site: SiteId,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// A page was deleted; it is forgotten by its site's queue
    PageDeleted {
        page: PageRef,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// System configuration was reloaded; the import cap is re-applied
    ConfigChanged {
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// Helper functions for creating common events
impl ImportEvent {
    #[must_use]
    pub fn server_initialized() -> Self {
        Self::ServerInitialized {
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn server_shutdown() -> Self {
        Self::ServerShutdown {
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn site_deleted(site: impl Into<SiteId>) -> Self {
        Self::SiteDeleted {
            site: site.into(),
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn page_deleted(page: PageRef) -> Self {
        Self::PageDeleted {
            page,
            timestamp: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn config_changed() -> Self {
        Self::ConfigChanged {
            timestamp: chrono::Utc::now(),
        }
    }

    /// Short name of the variant, for logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ServerInitialized { .. } => "server_initialized",
            Self::ServerShutdown { .. } => "server_shutdown",
            Self::SiteDeleted { .. } => "site_deleted",
            Self::PageDeleted { .. } => "page_deleted",
            Self::ConfigChanged { .. } => "config_changed",
        }
    }
}

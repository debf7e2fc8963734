pub mod config;
pub mod errors;
pub mod import_events;
pub mod scheduler;
pub mod services;
pub mod site_queue;
pub mod types;
pub mod utils;

pub use config::{SchedulerConfig, SystemConfig};
pub use errors::{ImportError, SchedulerError};
pub use import_events::{EventBusConfig, EventBusError, ImportEvent, ImportEventBus};
pub use scheduler::{ImportScheduler, SchedulerMetrics, SchedulerMetricsSnapshot};
pub use services::{
    CatalogService, Collaborators, DirectIdResolver, IdResolver, ImportRequest, InMemoryCatalog,
    IndexingHook, NoopIndexingHook, PageImporter,
};
pub use site_queue::{LinkDedupeCache, SiteBinding, SiteImportQueue, normalize_link};
pub use types::{CallerContext, LinkRecord, PageId, PageRef, SiteId, SiteQueueSnapshot};

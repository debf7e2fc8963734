//! Notification bus carrying server, site and page lifecycle events to the
//! import scheduler.

// Sub-modules
pub mod bus;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod types;

// Re-exports for public API
pub use bus::ImportEventBus;
pub use config::EventBusConfig;
pub use errors::EventBusError;
pub use metrics::{EventBusMetrics, EventBusMetricsSnapshot};
pub use types::ImportEvent;

//! Core ImportEventBus struct definition and constructors

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tokio::sync::{Notify, broadcast};

use crate::import_events::config::EventBusConfig;
use crate::import_events::metrics::EventBusMetrics;
use crate::import_events::types::ImportEvent;

/// Event bus for publishing and subscribing to import notifications
///
/// Clones share the same channel, metrics and shutdown signal.
#[derive(Debug, Clone)]
pub struct ImportEventBus {
    pub(super) sender: broadcast::Sender<ImportEvent>,
    pub(super) config: Arc<EventBusConfig>,
    pub(super) metrics: EventBusMetrics,
    pub(super) shutdown: Arc<Notify>,
    pub(super) shutdown_flag: Arc<AtomicBool>,
}

impl ImportEventBus {
    /// Create a new event bus with the specified capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let config = EventBusConfig {
            capacity,
            ..Default::default()
        };
        Self::with_config(config)
    }

    /// Create a new event bus with custom configuration
    #[must_use]
    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.capacity.max(1));
        Self {
            sender,
            config: Arc::new(config),
            metrics: EventBusMetrics::new(),
            shutdown: Arc::new(Notify::new()),
            shutdown_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    #[must_use]
    pub fn metrics(&self) -> &EventBusMetrics {
        &self.metrics
    }
}

impl Default for ImportEventBus {
    fn default() -> Self {
        Self::with_config(EventBusConfig::default())
    }
}

//! Core configuration types for the import scheduler

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::{
    DEFAULT_EVENT_BUS_CAPACITY, DEFAULT_IDLE_WAIT_MS, LINK_CACHE_CAPACITY, UNLIMITED_IMPORTS,
};

/// Static configuration for an [`ImportScheduler`](crate::ImportScheduler)
///
/// `import_page_max` here is only the initial value; the live cap is held by
/// [`SystemConfig`](super::SystemConfig) and can change at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub(crate) import_page_max: i64,
    pub(crate) link_cache_capacity: usize,
    pub(crate) event_bus_capacity: usize,
    /// Upper bound on one idle park of the worker, in milliseconds
    pub(crate) idle_wait_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            import_page_max: UNLIMITED_IMPORTS,
            link_cache_capacity: LINK_CACHE_CAPACITY,
            event_bus_capacity: DEFAULT_EVENT_BUS_CAPACITY,
            idle_wait_ms: DEFAULT_IDLE_WAIT_MS,
        }
    }
}

impl SchedulerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON for this shape.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_import_page_max(mut self, import_page_max: i64) -> Self {
        self.import_page_max = import_page_max;
        self
    }

    #[must_use]
    pub fn with_link_cache_capacity(mut self, capacity: usize) -> Self {
        self.link_cache_capacity = capacity.max(1);
        self
    }

    #[must_use]
    pub fn with_event_bus_capacity(mut self, capacity: usize) -> Self {
        self.event_bus_capacity = capacity.max(1);
        self
    }

    #[must_use]
    pub fn with_idle_wait(mut self, idle_wait: Duration) -> Self {
        self.idle_wait_ms = u64::try_from(idle_wait.as_millis()).unwrap_or(u64::MAX).max(1);
        self
    }

    #[must_use]
    pub fn import_page_max(&self) -> i64 {
        self.import_page_max
    }

    #[must_use]
    pub fn link_cache_capacity(&self) -> usize {
        self.link_cache_capacity
    }

    #[must_use]
    pub fn event_bus_capacity(&self) -> usize {
        self.event_bus_capacity
    }

    #[must_use]
    pub fn idle_wait(&self) -> Duration {
        Duration::from_millis(self.idle_wait_ms.max(1))
    }
}

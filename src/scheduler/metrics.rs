use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for scheduler activity using lock-free atomic operations.
#[derive(Debug, Clone, Default)]
pub struct SchedulerMetrics {
    pub pages_imported: Arc<AtomicU64>,
    pub pages_failed: Arc<AtomicU64>,
    pub sites_created: Arc<AtomicU64>,
    pub sites_evicted: Arc<AtomicU64>,
}

impl SchedulerMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_imported(&self) {
        self.pages_imported.fetch_add(1, Ordering::SeqCst);
    }

    pub fn increment_failed(&self) {
        self.pages_failed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn increment_sites_created(&self) {
        self.sites_created.fetch_add(1, Ordering::SeqCst);
    }

    pub fn increment_sites_evicted(&self) {
        self.sites_evicted.fetch_add(1, Ordering::SeqCst);
    }

    #[must_use]
    pub fn snapshot(&self) -> SchedulerMetricsSnapshot {
        SchedulerMetricsSnapshot {
            pages_imported: self.pages_imported.load(Ordering::SeqCst),
            pages_failed: self.pages_failed.load(Ordering::SeqCst),
            sites_created: self.sites_created.load(Ordering::SeqCst),
            sites_evicted: self.sites_evicted.load(Ordering::SeqCst),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerMetricsSnapshot {
    pub pages_imported: u64,
    pub pages_failed: u64,
    pub sites_created: u64,
    pub sites_evicted: u64,
}

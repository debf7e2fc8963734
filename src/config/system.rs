//! Runtime-reloadable system settings

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Live system configuration shared between the scheduler and whoever
/// reloads settings
///
/// Clones share the same value.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    import_page_max: Arc<AtomicI64>,
}

impl SystemConfig {
    #[must_use]
    pub fn new(import_page_max: i64) -> Self {
        Self {
            import_page_max: Arc::new(AtomicI64::new(import_page_max)),
        }
    }

    /// Current per-site import cap; negative means no cap
    #[must_use]
    pub fn import_page_max(&self) -> i64 {
        self.import_page_max.load(Ordering::Acquire)
    }

    /// Change the cap. Cached site queues only see it once the scheduler
    /// re-applies it (on `ServerInitialized` or `ConfigChanged`).
    pub fn set_import_page_max(&self, import_page_max: i64) {
        let previous = self.import_page_max.swap(import_page_max, Ordering::AcqRel);
        if previous != import_page_max {
            log::info!("import_page_max changed from {previous} to {import_page_max}");
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::new(crate::utils::UNLIMITED_IMPORTS)
    }
}

//! Core ImportScheduler struct definition and constructor

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use super::metrics::SchedulerMetrics;
use crate::config::{SchedulerConfig, SystemConfig};
use crate::errors::SchedulerError;
use crate::import_events::ImportEventBus;
use crate::services::Collaborators;
use crate::site_queue::SiteImportQueue;
use crate::types::{SiteId, SiteQueueSnapshot};

pub(super) struct SchedulerInner {
    pub(super) registry: DashMap<SiteId, Arc<SiteImportQueue>>,
    /// Serializes first-time queue creation
    pub(super) creation_lock: tokio::sync::Mutex<()>,
    /// Site the worker keeps draining until it runs dry
    pub(super) active_site: parking_lot::Mutex<Option<SiteId>>,
    /// Cancel flag of the current worker generation; replaced on restart
    pub(super) cancel_token: parking_lot::Mutex<Arc<AtomicBool>>,
    pub(super) worker_running: AtomicBool,
    /// Current worker task, or the teardown task still awaiting it
    pub(super) worker_handle: parking_lot::Mutex<Option<JoinHandle<Result<(), SchedulerError>>>>,
    pub(super) listener_handle: parking_lot::Mutex<Option<JoinHandle<()>>>,
    pub(super) wake: Notify,
    pub(super) collaborators: Collaborators,
    pub(super) config: SchedulerConfig,
    pub(super) system: SystemConfig,
    pub(super) metrics: SchedulerMetrics,
}

impl Drop for SchedulerInner {
    fn drop(&mut self) {
        if let Some(listener) = self.listener_handle.get_mut().take() {
            listener.abort();
        }
    }
}

/// Schedules page imports across sites with a single serialized worker
///
/// Producers register cataloged pages per site; the worker drains one site
/// at a time in ascending page-id order, honouring each site's cap.
/// Clones share the same registry and worker.
#[derive(Clone)]
pub struct ImportScheduler {
    pub(super) inner: Arc<SchedulerInner>,
}

impl ImportScheduler {
    /// Create a scheduler and subscribe it to `bus`
    ///
    /// Must be called inside a tokio runtime: the notification listener is
    /// spawned here. The worker is not started until `ServerInitialized`
    /// arrives or [`start_worker`](Self::start_worker) is called.
    #[must_use]
    pub fn new(
        collaborators: Collaborators,
        config: SchedulerConfig,
        system: SystemConfig,
        bus: &ImportEventBus,
    ) -> Self {
        let scheduler = Self {
            inner: Arc::new(SchedulerInner {
                registry: DashMap::new(),
                creation_lock: tokio::sync::Mutex::new(()),
                active_site: parking_lot::Mutex::new(None),
                cancel_token: parking_lot::Mutex::new(Arc::new(AtomicBool::new(false))),
                worker_running: AtomicBool::new(false),
                worker_handle: parking_lot::Mutex::new(None),
                listener_handle: parking_lot::Mutex::new(None),
                wake: Notify::new(),
                collaborators,
                config,
                system,
                metrics: SchedulerMetrics::new(),
            }),
        };

        let listener = scheduler.spawn_listener(bus);
        *scheduler.inner.listener_handle.lock() = Some(listener);
        scheduler
    }

    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn system_config(&self) -> &SystemConfig {
        &self.inner.system
    }

    #[must_use]
    pub fn metrics(&self) -> &SchedulerMetrics {
        &self.inner.metrics
    }

    /// True once shutdown was requested and until the worker is restarted
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.cancel_token().load(Ordering::SeqCst)
    }

    pub(super) fn cancel_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&*self.inner.cancel_token.lock())
    }

    #[must_use]
    pub fn is_worker_running(&self) -> bool {
        self.inner.worker_running.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn active_site(&self) -> Option<SiteId> {
        self.inner.active_site.lock().clone()
    }

    /// Cached queue for `site`, without creating one
    #[must_use]
    pub fn queue(&self, site: &SiteId) -> Option<Arc<SiteImportQueue>> {
        self.inner
            .registry
            .get(site)
            .map(|entry| Arc::clone(entry.value()))
    }

    #[must_use]
    pub fn site_snapshot(&self, site: &SiteId) -> Option<SiteQueueSnapshot> {
        self.queue(site).map(|queue| queue.snapshot())
    }

    /// Ids of all cached sites, sorted
    #[must_use]
    pub fn cached_sites(&self) -> Vec<SiteId> {
        let mut sites: Vec<SiteId> = self
            .inner
            .registry
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        sites.sort();
        sites
    }

    /// True while any cached site has importable pages or a page in flight
    #[must_use]
    pub fn has_outstanding_work(&self) -> bool {
        self.inner.registry.iter().any(|entry| {
            let queue = entry.value();
            queue.has_pending_work() || !queue.snapshot().importing.is_empty()
        })
    }

    /// Wake the worker if it is parked
    pub fn wake_worker(&self) {
        self.inner.wake.notify_one();
    }
}

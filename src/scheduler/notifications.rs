//! Reactions to lifecycle notifications and the bus listener task

use std::sync::{Arc, Weak};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::core::{ImportScheduler, SchedulerInner};
use crate::import_events::{EventBusError, ImportEvent, ImportEventBus};

impl ImportScheduler {
    /// Apply one notification
    ///
    /// This is what the bus listener calls for every event; it can also be
    /// called directly. Must run inside a tokio runtime because server
    /// start and stop spawn tasks.
    pub fn handle_event(&self, event: ImportEvent) {
        log::debug!("Import scheduler handling {}", event.kind());

        match event {
            ImportEvent::ServerInitialized { .. } => {
                self.apply_import_page_max();
                if !self.start_worker() {
                    log::debug!("Import worker already running");
                }
            }
            ImportEvent::ServerShutdown { .. } => {
                self.request_shutdown();
            }
            ImportEvent::SiteDeleted { site, .. } => {
                self.evict_site(&site);
            }
            ImportEvent::PageDeleted { page, .. } => {
                let Some((site, page_id)) =
                    self.inner.collaborators.resolver.resolve_page(&page)
                else {
                    log::debug!("Ignoring deletion of unresolvable page {page:?}");
                    return;
                };
                if let Some(queue) = self.queue(&site) {
                    if queue.forget_imported(page_id) {
                        log::debug!("Forgot deleted page {page_id} of site {site}");
                    }
                }
            }
            ImportEvent::ConfigChanged { .. } => {
                self.apply_import_page_max();
            }
        }
    }

    /// Subscribe to `bus` and dispatch its events until the bus shuts down
    /// or the scheduler is dropped
    pub(super) fn spawn_listener(&self, bus: &ImportEventBus) -> JoinHandle<()> {
        let receiver = bus.subscribe();
        let bus = bus.clone();
        let inner = Arc::downgrade(&self.inner);
        tokio::spawn(listen(inner, bus, receiver))
    }
}

async fn listen(
    inner: Weak<SchedulerInner>,
    bus: ImportEventBus,
    mut receiver: broadcast::Receiver<ImportEvent>,
) {
    loop {
        tokio::select! {
            received = ImportEventBus::receive(&mut receiver) => match received {
                Ok(event) => {
                    let Some(inner) = inner.upgrade() else {
                        break;
                    };
                    ImportScheduler { inner }.handle_event(event);
                }
                Err(EventBusError::ReceiverLagged(skipped)) => {
                    log::warn!("Import scheduler missed {skipped} notifications");
                }
                Err(e) => {
                    log::debug!("Import scheduler notification stream ended: {e}");
                    break;
                }
            },
            () = bus.wait_for_shutdown() => break,
        }
    }
    log::debug!("Import scheduler notification listener stopped");
}

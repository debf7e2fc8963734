//! Subscription operations for the ImportEventBus

use tokio::sync::broadcast;

use crate::import_events::errors::EventBusError;
use crate::import_events::types::ImportEvent;

use super::core::ImportEventBus;

impl ImportEventBus {
    /// Subscribe to events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ImportEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        let count = self.sender.receiver_count();
        if self.config.enable_metrics {
            self.metrics.update_subscriber_count(count);
        }
        count
    }

    #[must_use]
    pub fn has_subscribers(&self) -> bool {
        self.subscriber_count() > 0
    }

    /// Receive the next event from `receiver`
    ///
    /// # Returns
    /// * `Err(EventBusError::ReceiverLagged(n))` - `n` events were overwritten
    ///   before this receiver read them; the receiver stays usable
    /// * `Err(EventBusError::Shutdown)` - Every sender is gone
    pub async fn receive(
        receiver: &mut broadcast::Receiver<ImportEvent>,
    ) -> Result<ImportEvent, EventBusError> {
        receiver.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Lagged(skipped) => EventBusError::ReceiverLagged(skipped),
            broadcast::error::RecvError::Closed => EventBusError::Shutdown,
        })
    }
}

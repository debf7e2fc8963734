//! Publishing operations for the ImportEventBus

use crate::import_events::errors::EventBusError;
use crate::import_events::types::ImportEvent;

use super::core::ImportEventBus;

impl ImportEventBus {
    /// Publish an event to all subscribers
    ///
    /// Never blocks: a slow subscriber loses the oldest buffered events and
    /// sees `Lagged` on its next receive.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of active subscribers that received the event
    /// * `Err(EventBusError::NoSubscribers)` - Nobody is listening
    /// * `Err(EventBusError::Shutdown)` - The bus was shut down
    pub fn publish(&self, event: ImportEvent) -> Result<usize, EventBusError> {
        if self.is_shutdown() {
            return Err(EventBusError::Shutdown);
        }

        let kind = event.kind();
        match self.sender.send(event) {
            Ok(subscriber_count) => {
                if self.config.enable_metrics {
                    self.metrics.increment_published();
                    self.metrics.update_subscriber_count(subscriber_count);
                }
                log::trace!("Published {kind} to {subscriber_count} subscribers");
                Ok(subscriber_count)
            }
            Err(_) => {
                if self.config.enable_metrics {
                    self.metrics.increment_dropped();
                }
                log::debug!("Published {kind} but no active subscribers");
                Err(EventBusError::NoSubscribers)
            }
        }
    }
}

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;
use tracing::trace;
use ts_core::ports::{BusSubscription, MessageBusError, MessageBusPort};

pub const DEFAULT_TOPIC_CAPACITY: usize = 64;

/// Message bus shared by every context living in one process.
///
/// Each topic is a tokio broadcast channel created on first use. A
/// subscriber that falls more than `capacity` messages behind loses the
/// oldest ones.
pub struct InProcessMessageBus {
    capacity: usize,
    topics: Mutex<HashMap<String, broadcast::Sender<String>>>,
}

impl InProcessMessageBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            topics: Mutex::new(HashMap::new()),
        }
    }

    fn sender(&self, topic: &str) -> Result<broadcast::Sender<String>, MessageBusError> {
        let mut topics = self
            .topics
            .lock()
            .map_err(|_| MessageBusError::Other("topic registry poisoned".to_string()))?;
        Ok(topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone())
    }
}

impl Default for InProcessMessageBus {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC_CAPACITY)
    }
}

impl MessageBusPort for InProcessMessageBus {
    fn publish(&self, topic: &str, payload: &str) -> Result<(), MessageBusError> {
        match self.sender(topic)?.send(payload.to_string()) {
            Ok(receivers) => trace!(topic, receivers, "bus message published"),
            // nobody listening is not an error
            Err(_) => trace!(topic, "bus message published without subscribers"),
        }
        Ok(())
    }

    fn subscribe(&self, topic: &str) -> BusSubscription {
        match self.sender(topic) {
            Ok(sender) => BusSubscription::new(topic, sender.subscribe()),
            Err(e) => {
                tracing::error!(topic, error = %e, "failed to subscribe, returning closed subscription");
                BusSubscription::closed(topic)
            }
        }
    }
}

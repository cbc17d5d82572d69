use ts_core::ports::{BusSubscription, MessageBusError, MessageBusPort};

/// Bus for a single context: publishing goes nowhere, subscriptions are
/// closed from the start.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMessageBus;

impl MessageBusPort for NoopMessageBus {
    fn publish(&self, _topic: &str, _payload: &str) -> Result<(), MessageBusError> {
        Ok(())
    }

    fn subscribe(&self, topic: &str) -> BusSubscription {
        BusSubscription::closed(topic)
    }
}

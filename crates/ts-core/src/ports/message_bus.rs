//! Message bus port
//!
//! Publish/subscribe between execution contexts that share an origin.
//! Delivery is best-effort and in send order per topic; there is no
//! acknowledgement and no replay for late subscribers.

use thiserror::Error;
use tokio::sync::broadcast;

#[derive(Debug, Error)]
pub enum MessageBusError {
    #[error("message bus closed")]
    Closed,

    #[error("message bus error: {0}")]
    Other(String),
}

pub trait MessageBusPort: Send + Sync {
    /// Publish `payload` to every current subscriber of `topic`, the sender's
    /// own subscriptions included.
    fn publish(&self, topic: &str, payload: &str) -> Result<(), MessageBusError>;

    fn subscribe(&self, topic: &str) -> BusSubscription;
}

/// Receiving end of a topic subscription.
pub struct BusSubscription {
    topic: String,
    receiver: broadcast::Receiver<String>,
}

impl BusSubscription {
    pub fn new(topic: impl Into<String>, receiver: broadcast::Receiver<String>) -> Self {
        Self {
            topic: topic.into(),
            receiver,
        }
    }

    /// A subscription that never delivers anything.
    pub fn closed(topic: impl Into<String>) -> Self {
        let (_, receiver) = broadcast::channel(1);
        Self::new(topic, receiver)
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Next payload, or `None` once the bus side is gone. Messages dropped
    /// because this subscriber fell behind are skipped.
    pub async fn recv(&mut self) -> Option<String> {
        loop {
            match self.receiver.recv().await {
                Ok(payload) => return Some(payload),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(topic = %self.topic, skipped, "bus subscriber lagged");
                    #[cfg(not(feature = "tracing"))]
                    let _ = skipped;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

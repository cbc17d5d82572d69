//! State storage port
//!
//! Key-value contract a store persists itself through. Implementations
//! absorb their own failures: reads degrade to `None`, writes and removals
//! are logged and dropped.

use async_trait::async_trait;

#[async_trait]
pub trait StateStoragePort: Send + Sync {
    async fn get_item(&self, name: &str) -> Option<String>;
    async fn set_item(&self, name: &str, value: String);
    async fn remove_item(&self, name: &str);
}

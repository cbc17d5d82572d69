//! Temp collection actions port
//!
//! Server-executed operations a client may call. Callers only ever pass the
//! client-visible storage name; mapping it to a server collection happens
//! behind this boundary.

use async_trait::async_trait;

use crate::action::ActionResult;

#[async_trait]
pub trait TempCollectionActionsPort: Send + Sync {
    /// Read the stored value, `Ok(None)` when nothing is stored.
    async fn get_temp_collection(&self, name: &str) -> ActionResult<Option<String>>;

    /// Overwrite the stored value.
    async fn set_temp_collection(&self, name: &str, value: &str) -> ActionResult<()>;

    /// Delete the stored value. Deleting nothing succeeds.
    async fn remove_temp_collection(&self, name: &str) -> ActionResult<()>;
}

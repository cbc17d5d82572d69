//! Server-backed storage for client stores.
//!
//! Implements [`StateStoragePort`] on top of the temp collection actions.
//! Reads and removals go straight to the server. Writes are debounced: a
//! burst of `set_item` calls results in a single server write carrying the
//! last value of the burst.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};
use ts_core::ports::{StateStoragePort, TempCollectionActionsPort};

use super::debounce::DebounceSlot;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(5000);

/// Decides, at `set_item` time, whether a write may be scheduled at all.
pub type WriteValidator = Arc<dyn Fn() -> bool + Send + Sync>;

#[derive(Debug, Clone, Default)]
pub struct ServerStorageOptions {
    /// Storage name sent to the server instead of the store's own name.
    pub alt_collection_name: Option<String>,

    /// Quiet period before a write is sent, [`DEFAULT_DEBOUNCE`] when unset.
    /// Zero sends on the next tick.
    pub debounce: Option<Duration>,
}

pub struct ServerStorage {
    actions: Arc<dyn TempCollectionActionsPort>,
    write_validator: WriteValidator,
    options: ServerStorageOptions,
    pending_write: DebounceSlot,
}

/// Build a server storage; without a validator every write is allowed.
pub fn create_server_storage(
    actions: Arc<dyn TempCollectionActionsPort>,
    write_validator: Option<WriteValidator>,
    options: ServerStorageOptions,
) -> ServerStorage {
    ServerStorage {
        actions,
        write_validator: write_validator.unwrap_or_else(|| Arc::new(|| true)),
        options,
        pending_write: DebounceSlot::new(),
    }
}

impl ServerStorage {
    pub fn debounce(&self) -> Duration {
        self.options.debounce.unwrap_or(DEFAULT_DEBOUNCE)
    }

    /// Whether a write is waiting for its quiet period to end.
    pub fn has_pending_write(&self) -> bool {
        self.pending_write.is_pending()
    }

    fn collection_name<'a>(&'a self, name: &'a str) -> &'a str {
        match self.options.alt_collection_name.as_deref() {
            Some(alt) if !alt.is_empty() => alt,
            _ => name,
        }
    }
}

#[async_trait]
impl StateStoragePort for ServerStorage {
    async fn get_item(&self, name: &str) -> Option<String> {
        let collection = self.collection_name(name);
        match self.actions.get_temp_collection(collection).await {
            Ok(value) => value.filter(|value| !value.is_empty()),
            Err(e) => {
                error!(collection, error = %e, "failed to get temp collection");
                None
            }
        }
    }

    async fn set_item(&self, name: &str, value: String) {
        if !(self.write_validator)() {
            debug!(name, "write validator rejected set_item, nothing scheduled");
            return;
        }

        let collection = self.collection_name(name).to_string();
        let actions = Arc::clone(&self.actions);
        self.pending_write.schedule(self.debounce(), async move {
            if let Err(e) = actions.set_temp_collection(&collection, &value).await {
                error!(collection = %collection, error = %e, "failed to set temp collection");
            }
        });
    }

    async fn remove_item(&self, name: &str) {
        let collection = self.collection_name(name);
        if let Err(e) = self.actions.remove_temp_collection(collection).await {
            error!(collection, error = %e, "failed to remove temp collection");
        }
    }
}

//! Server-side collection map.
//!
//! Maps each client-visible storage name onto the collection its data lives
//! in. Nothing here is re-exported: the physical names stay on the server.

use ts_core::StorageKey;

fn physical_name(key: StorageKey) -> &'static str {
    match key {
        StorageKey::Onboarding => "temp-onboarding",
    }
}

/// Physical collection for a client storage name, `None` if unmapped.
pub(crate) fn collection_for_storage(storage_name: &str) -> Option<&'static str> {
    StorageKey::from_storage_name(storage_name).map(physical_name)
}

/// Whether `name` is one of the allow-listed physical collections.
pub(crate) fn is_allowed_collection(name: &str) -> bool {
    StorageKey::ALL
        .into_iter()
        .any(|key| physical_name(key) == name)
}

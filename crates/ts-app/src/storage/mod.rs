//! Storage adapters for client stores.

mod debounce;
pub mod server_storage;

pub use debounce::DebounceSlot;
pub use server_storage::{
    create_server_storage, ServerStorage, ServerStorageOptions, WriteValidator, DEFAULT_DEBOUNCE,
};

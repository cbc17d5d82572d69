//! Document store adapters
//!
//! Implementations of [`ts_core::ports::DocumentStorePort`]: an in-memory
//! store for tests and single-process demos, and a JSON file store.

pub mod file;
pub mod memory;

pub use file::FileDocumentStore;
pub use memory::InMemoryDocumentStore;

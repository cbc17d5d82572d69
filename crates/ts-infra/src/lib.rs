//! Server-side infrastructure for TempSync.
//!
//! Everything here runs behind the client/server boundary: the collection
//! allow-list, the remote collection gateway, document store adapters, the
//! session provider and the server actions built on top of them.

pub mod actions;
mod collections;
pub mod document_store;
pub mod gateway;
pub mod session;

pub use actions::ServerActions;
pub use document_store::{FileDocumentStore, InMemoryDocumentStore};
pub use gateway::{GatewayError, RemoteCollectionGateway};
pub use session::StaticSessionProvider;

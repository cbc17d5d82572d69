//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (stores, use
//! cases) and infrastructure implementations. The client side only depends on
//! [`TempCollectionActionsPort`], [`CompletionEvaluatorPort`],
//! [`StateStoragePort`] and [`MessageBusPort`]; the remaining ports are
//! implemented and consumed behind the server boundary.

pub mod actions;
pub mod document_store;
pub mod evaluator;
pub mod message_bus;
pub mod session;
pub mod state_storage;

pub use actions::TempCollectionActionsPort;
pub use document_store::{Document, DocumentPath, DocumentStoreError, DocumentStorePort};
pub use evaluator::CompletionEvaluatorPort;
pub use message_bus::{BusSubscription, MessageBusError, MessageBusPort};
pub use session::{SessionError, SessionPort};
pub use state_storage::StateStoragePort;

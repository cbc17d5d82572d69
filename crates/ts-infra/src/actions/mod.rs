//! Server actions
//!
//! [`ServerActions`] is the server half of the client/server boundary. It
//! implements both ports a client calls: the temp collection actions and the
//! completion check.

mod completion;
mod temp_collection;

pub use completion::is_onboarding_complete;

use std::sync::Arc;

use ts_core::ports::SessionPort;

use crate::gateway::RemoteCollectionGateway;

pub struct ServerActions {
    sessions: Arc<dyn SessionPort>,
    gateway: Arc<RemoteCollectionGateway>,
}

impl ServerActions {
    pub fn new(sessions: Arc<dyn SessionPort>, gateway: Arc<RemoteCollectionGateway>) -> Self {
        Self { sessions, gateway }
    }
}

use async_trait::async_trait;
use thiserror::Error;

use crate::principal::Principal;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session backend unavailable: {0}")]
    Unavailable(String),
}

/// Resolves the principal attached to the current server call.
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// `Ok(None)` means the caller is not authenticated.
    async fn current_principal(&self) -> Result<Option<Principal>, SessionError>;
}

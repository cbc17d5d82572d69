//! Remote collection gateway
//!
//! Single-value get/set/delete against the document store, scoped to one
//! principal and restricted to allow-listed collections. Three outcomes are
//! kept apart: access rejection (`GatewayError::AccessDenied`), absence
//! (`Ok(None)`), and transport failure.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, warn};
use ts_core::ports::{Document, DocumentPath, DocumentStoreError, DocumentStorePort};
use ts_core::PrincipalId;

use crate::collections::is_allowed_collection;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid server collection: {0}")]
    AccessDenied(String),

    #[error("invalid principal id: {0:?}")]
    InvalidPrincipal(PrincipalId),

    #[error("remote store failure: {0}")]
    Transport(#[from] DocumentStoreError),
}

pub struct RemoteCollectionGateway {
    store: Arc<dyn DocumentStorePort>,
}

impl RemoteCollectionGateway {
    pub fn new(store: Arc<dyn DocumentStorePort>) -> Self {
        Self { store }
    }

    /// Reject any collection outside the allow-list.
    pub fn validate_collection_name(name: &str) -> Result<(), GatewayError> {
        if is_allowed_collection(name) {
            return Ok(());
        }
        warn!(collection = %name, "rejected access to unlisted server collection");
        Err(GatewayError::AccessDenied(name.to_string()))
    }

    fn document_path(principal: &PrincipalId, collection: &str) -> Result<DocumentPath, GatewayError> {
        Self::validate_collection_name(collection)?;
        if !principal.is_path_safe() {
            warn!(principal = %principal, "rejected principal id that is not a single path segment");
            return Err(GatewayError::InvalidPrincipal(principal.clone()));
        }
        Ok(DocumentPath::temp_collection(principal, collection))
    }

    /// Fetch the stored value.
    ///
    /// Fails closed: a store error is logged and reported as `Ok(None)`.
    /// Only access rejections surface as `Err`.
    pub async fn get(
        &self,
        principal: &PrincipalId,
        collection: &str,
    ) -> Result<Option<String>, GatewayError> {
        let path = Self::document_path(principal, collection)?;

        match self.store.get(&path).await {
            Ok(Some(document)) => Ok(Some(document.value)),
            Ok(None) => {
                debug!(path = %path, "temp collection not found");
                Ok(None)
            }
            Err(e) => {
                error!(path = %path, error = %e, "error fetching temp collection, returning none");
                Ok(None)
            }
        }
    }

    /// Overwrite the stored value. Store errors propagate to the caller.
    pub async fn set(
        &self,
        principal: &PrincipalId,
        collection: &str,
        value: &str,
    ) -> Result<(), GatewayError> {
        let path = Self::document_path(principal, collection)?;
        self.store.set(&path, Document::new(value)).await?;
        debug!(path = %path, bytes = value.len(), "temp collection written");
        Ok(())
    }

    /// Delete the stored value. Deleting an absent document succeeds.
    pub async fn remove(&self, principal: &PrincipalId, collection: &str) -> Result<(), GatewayError> {
        let path = Self::document_path(principal, collection)?;

        match self.store.delete(&path).await {
            Ok(()) => Ok(()),
            Err(DocumentStoreError::NotFound(_)) => {
                debug!(path = %path, "temp collection already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

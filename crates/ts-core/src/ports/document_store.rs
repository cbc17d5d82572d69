//! Remote document store port
//!
//! The remote store is treated as an opaque key-value service: one document
//! per path, each holding a single string value.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::PrincipalId;

/// Location of one document in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// `principals/{principal}/temp/{collection}`
    pub fn temp_collection(principal: &PrincipalId, collection: &str) -> Self {
        Self(format!("principals/{principal}/temp/{collection}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a temp-collection document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub value: String,
}

impl Document {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("document not found: {0}")]
    NotFound(DocumentPath),

    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("document store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    /// Fetch a document. A missing document is `Ok(None)`.
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, DocumentStoreError>;

    /// Create or overwrite a document.
    async fn set(&self, path: &DocumentPath, document: Document) -> Result<(), DocumentStoreError>;

    /// Delete a document. Implementations may report a missing document as
    /// [`DocumentStoreError::NotFound`].
    async fn delete(&self, path: &DocumentPath) -> Result<(), DocumentStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_collection_path_is_namespaced_by_principal() {
        let path = DocumentPath::temp_collection(&PrincipalId::from("uid-1"), "temp-onboarding");

        assert_eq!(path.as_str(), "principals/uid-1/temp/temp-onboarding");
        assert_eq!(path.segments().count(), 4);
    }
}

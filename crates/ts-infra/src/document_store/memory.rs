use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use ts_core::ports::{Document, DocumentPath, DocumentStoreError, DocumentStorePort};

#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<BTreeMap<DocumentPath, Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored document, ordered by path.
    pub async fn snapshot(&self) -> BTreeMap<DocumentPath, Document> {
        self.documents.read().await.clone()
    }
}

#[async_trait]
impl DocumentStorePort for InMemoryDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, DocumentStoreError> {
        Ok(self.documents.read().await.get(path).cloned())
    }

    async fn set(&self, path: &DocumentPath, document: Document) -> Result<(), DocumentStoreError> {
        self.documents.write().await.insert(path.clone(), document);
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<(), DocumentStoreError> {
        self.documents.write().await.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_overwrites_and_delete_is_idempotent() {
        let store = InMemoryDocumentStore::new();
        let path = DocumentPath::temp_collection(&"uid".into(), "temp-onboarding");

        store.set(&path, Document::new("one")).await.unwrap();
        store.set(&path, Document::new("two")).await.unwrap();
        assert_eq!(store.get(&path).await.unwrap(), Some(Document::new("two")));

        store.delete(&path).await.unwrap();
        store.delete(&path).await.unwrap();
        assert_eq!(store.get(&path).await.unwrap(), None);
        assert!(store.snapshot().await.is_empty());
    }
}

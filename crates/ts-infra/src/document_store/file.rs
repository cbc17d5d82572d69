//! File-based document store
//!
//! Each document is a pretty-printed JSON file whose location mirrors its
//! document path under a root directory:
//! `<root>/principals/<id>/temp/<collection>.json`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use ts_core::ports::{Document, DocumentPath, DocumentStoreError, DocumentStorePort};

pub const DEFAULT_STORE_DIR: &str = "tempsync";

pub struct FileDocumentStore {
    root: PathBuf,
    tmp_seq: AtomicU64,
}

impl FileDocumentStore {
    /// Create store rooted at a custom directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tmp_seq: AtomicU64::new(0),
        }
    }

    /// Create store under the platform data directory, if one exists
    pub fn with_defaults() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join(DEFAULT_STORE_DIR)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, path: &DocumentPath) -> Result<PathBuf, DocumentStoreError> {
        let mut file = self.root.clone();
        for segment in path.segments() {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(DocumentStoreError::Unavailable(format!(
                    "refusing to map document path {path} onto the file system"
                )));
            }
            file.push(segment);
        }
        file.set_extension("json");
        Ok(file)
    }

    /// Writes through a sibling temp file and renames it into place, so a
    /// reader sees either the old or the new document.
    async fn atomic_write(&self, target: &Path, content: &str) -> Result<(), DocumentStoreError> {
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).await?;
        }

        // concurrent writers to one document each get their own temp file
        let seq = self.tmp_seq.fetch_add(1, Ordering::Relaxed);
        let tmp_path = target.with_extension(format!("json.{seq}.tmp"));
        fs::write(&tmp_path, content).await?;
        fs::rename(&tmp_path, target).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStorePort for FileDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, DocumentStoreError> {
        let file = self.file_path(path)?;
        let content = match fs::read_to_string(&file).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn set(&self, path: &DocumentPath, document: Document) -> Result<(), DocumentStoreError> {
        let file = self.file_path(path)?;
        let content = serde_json::to_string_pretty(&document)?;
        self.atomic_write(&file, &content).await?;
        debug!(file = %file.display(), "document written");
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<(), DocumentStoreError> {
        let file = self.file_path(path)?;
        match fs::remove_file(&file).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DocumentStoreError::NotFound(path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};
use tracing::{debug, info};

use crate::db::Document;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("read/write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted document exists but cannot be parsed.
    #[error("corrupt document {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Whole-document persistence: `load` replaces, `save` overwrites.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self) -> Result<Document, StoreError>;
    async fn save(&self, doc: &Document) -> Result<(), StoreError>;
}

/// Single JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<Document, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(self.io_err(e)),
        };

        if bytes.is_empty() {
            info!(path = %self.path.display(), "no document yet; initialising empty collections");
            let doc = Document::default();
            self.save(&doc).await?;
            return Ok(doc);
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(doc)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_err(e))?;
        }

        // Write to a sibling and rename so readers never see a half-written file
        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp).await.map_err(|e| self.io_err(e))?;
        file.write_all(&data).await.map_err(|e| self.io_err(e))?;
        file.sync_all().await.map_err(|e| self.io_err(e))?;
        drop(file);
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_err(e))?;

        debug!(path = %self.path.display(), bytes = data.len(), "document saved");
        Ok(())
    }
}

/// In-process store holding the serialized document.
///
/// Loads hand out a fresh copy, matching the file store's semantics.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: &Document) -> Result<Self, StoreError> {
        Ok(Self {
            data: Mutex::new(Some(serde_json::to_vec(doc)?)),
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Document, StoreError> {
        let mut data = self.data.lock().await;
        if let Some(bytes) = data.as_deref() {
            return serde_json::from_slice(bytes).map_err(|source| StoreError::Corrupt {
                path: PathBuf::from(":memory:"),
                source,
            });
        }

        let doc = Document::default();
        *data = Some(serde_json::to_vec(&doc)?);
        Ok(doc)
    }

    async fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(doc)?;
        *self.data.lock().await = Some(bytes);
        Ok(())
    }
}

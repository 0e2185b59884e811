use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::db::Db;
use crate::storage::{DocumentStore, JsonFileStore, MemoryStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = if config.in_memory() {
            info!("using in-memory document store");
            Arc::new(MemoryStore::new()) as Arc<dyn DocumentStore>
        } else {
            info!(path = %config.data_file.display(), "using JSON document store");
            Arc::new(JsonFileStore::new(&config.data_file)) as Arc<dyn DocumentStore>
        };

        Ok(Self::from_parts(Db::new(store), config))
    }

    pub fn from_parts(db: Db, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }

    /// Seeded in-memory state for tests.
    pub fn fake() -> Result<Self, StoreError> {
        use crate::db::Document;
        use crate::products::seed::catalog;

        let store = MemoryStore::with_document(&Document {
            products: catalog(),
            ..Document::default()
        })?;
        let config = Arc::new(AppConfig {
            data_file: crate::config::IN_MEMORY.into(),
            host: "127.0.0.1".into(),
            port: 0,
        });
        Ok(Self::from_parts(Db::new(Arc::new(store)), config))
    }
}

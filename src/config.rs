use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

/// `DATA_FILE` value that keeps the document in memory only.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_file = std::env::var("DATA_FILE")
            .unwrap_or_else(|_| "db.json".into())
            .into();
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v
                .parse::<u16>()
                .with_context(|| format!("APP_PORT must be a port number, got {v:?}"))?,
            Err(_) => 8080,
        };
        Ok(Self {
            data_file,
            host,
            port,
        })
    }

    pub fn in_memory(&self) -> bool {
        self.data_file.as_os_str() == IN_MEMORY
    }
}

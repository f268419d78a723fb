//! Client configuration loaded from environment variables.
//!
//! Every setting has a default so the shell starts with zero configuration.

use std::path::PathBuf;

use orgdesk_store::{Database, MemoryStorage, Persistence, StoreError};

use crate::router::normalize_location;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Directory holding `orgdesk.db`.
    /// Env: `ORGDESK_DATA_DIR`
    /// Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing survives the process.
    /// Env: `ORGDESK_IN_MEMORY` (true/false)
    /// Default: `false`
    pub in_memory: bool,

    /// Location routed at startup.
    /// Env: `ORGDESK_START_LOCATION`
    /// Default: `/`
    pub start_location: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            in_memory: false,
            start_location: "/".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("ORGDESK_DATA_DIR") {
            if !dir.trim().is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(val) = lookup("ORGDESK_IN_MEMORY") {
            match val.trim() {
                "true" | "1" => config.in_memory = true,
                "false" | "0" | "" => config.in_memory = false,
                other => {
                    tracing::warn!(value = %other, "Invalid ORGDESK_IN_MEMORY, using default");
                }
            }
        }

        if let Some(location) = lookup("ORGDESK_START_LOCATION") {
            config.start_location = normalize_location(&location);
        }

        config
    }

    /// Open the backing storage this configuration points at.
    pub fn open_persistence(&self) -> Result<Persistence, StoreError> {
        if self.in_memory {
            tracing::info!("using in-memory storage");
            return Ok(Persistence::new(MemoryStorage::new()));
        }

        let db = match &self.data_dir {
            Some(dir) => Database::open_in_dir(dir)?,
            None => Database::new()?,
        };
        tracing::info!(path = ?db.path(), "database opened");
        Ok(Persistence::new(db))
    }
}

use std::sync::Arc;

use tracing::info;

use crate::config::StorageConfig;
use crate::errors::{Result, SnaplinkError};

pub mod backends;
mod kv;
mod link_storage;
pub mod models;

pub use backends::{FileStore, MemoryStore};
pub use kv::KeyValueStore;
pub use link_storage::{CLICKS_KEY, LinkStorage, URLS_KEY};
pub use models::{ClickDetails, ClickEvent, ShortUrlRecord};

pub struct StorageFactory;

impl StorageFactory {
    /// Build the key-value backend named in the storage config.
    pub fn create(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>> {
        let store: Arc<dyn KeyValueStore> = match config.backend.as_str() {
            "file" => Arc::new(FileStore::new(&config.data_dir)?),
            "memory" => match config.quota_bytes {
                Some(quota) => Arc::new(MemoryStore::with_quota(quota)),
                None => Arc::new(MemoryStore::new()),
            },
            other => {
                return Err(SnaplinkError::config(format!(
                    "unknown storage backend '{}', expected 'file' or 'memory'",
                    other
                )));
            }
        };

        info!("Using storage backend: {}", store.backend_name());
        Ok(store)
    }
}

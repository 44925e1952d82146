use dashmap::DashMap;
use tracing::{debug, warn};

use crate::errors::{Result, SnaplinkError};
use crate::storage::KeyValueStore;

/// In-process store, optionally capped at a total number of value bytes.
pub struct MemoryStore {
    items: DashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            quota_bytes: None,
        }
    }

    /// Writes that would push the stored bytes past `quota_bytes` fail.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: DashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes held in values.
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).map(|v| v.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            let others: usize = self
                .items
                .iter()
                .filter(|entry| entry.key() != key)
                .map(|entry| entry.value().len())
                .sum();
            if others + value.len() > quota {
                warn!(key, quota, requested = value.len(), "Memory store quota exceeded");
                return Err(SnaplinkError::storage(format!(
                    "quota of {} bytes exceeded while writing '{}'",
                    quota, key
                )));
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        debug!(key, bytes = value.len(), "Memory store item written");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

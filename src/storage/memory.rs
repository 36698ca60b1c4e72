use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::{check_quota, validate_key, StorageBackend, StorageError};

/// In-process storage backend.
///
/// The quota applies to the total size of all stored values, like a browser's
/// per-origin local storage limit.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    quota: Option<u64>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that refuses writes pushing the total size over `quota_bytes`.
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            quota: Some(quota_bytes),
        }
    }

    /// Total bytes currently stored across all keys
    pub async fn used_bytes(&self) -> u64 {
        let values = self.values.lock().await;
        values.values().map(|v| v.len() as u64).sum()
    }

    /// Overwrite a slot without quota checks (used to seed corrupted data in tests)
    pub async fn insert_raw(&self, key: &str, value: &str) {
        self.values.lock().await.insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut values = self.values.lock().await;

        let others: u64 = values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len() as u64)
            .sum();
        check_quota(others + value.len() as u64, self.quota)?;

        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        Ok(self.values.lock().await.remove(key).is_some())
    }
}

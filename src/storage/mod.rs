//! Local key/value persistence for draft collections
//!
//! The draft store never touches the filesystem directly. It is handed a
//! [`StorageBackend`] and reads/writes a single string value per namespace key:
//! - [`MemoryStorage`] keeps values in process memory (tests, ephemeral stores)
//! - [`FileStorage`] keeps one JSON file per key under a data directory
//!
//! Both backends can enforce a byte quota and report [`StorageError::QuotaExceeded`]
//! instead of writing.

pub mod file;
pub mod memory;

use async_trait::async_trait;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage quota exceeded: {needed} bytes needed, quota is {quota} bytes")]
    QuotaExceeded { needed: u64, quota: u64 },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// String-valued key/value store used to persist draft collections.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Short name used in log messages (e.g. "memory", "file").
    fn name(&self) -> &str;

    /// Read the value stored under `key`, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Returns whether a value existed.
    async fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

/// Reject keys that cannot name a storage slot.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Fail with [`StorageError::QuotaExceeded`] when `needed` is over `quota`.
pub(crate) fn check_quota(needed: u64, quota: Option<u64>) -> Result<(), StorageError> {
    match quota {
        Some(quota) if needed > quota => Err(StorageError::QuotaExceeded { needed, quota }),
        _ => Ok(()),
    }
}

//! Key-value storage seam.
//!
//! The browser exposes its settings storage through two calling conventions
//! (callback and promise). Both collapse into the single asynchronous
//! [`KeyValueStore`] trait here; everything above this module only ever
//! awaits `get`, `set` and `remove`.
//!
//! Values are whole JSON documents. There are no transactions: a caller that
//! reads, modifies and writes back a value can lose a concurrent writer's
//! update (last write wins).

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Key holding the lookup history array.
pub const HISTORY_KEY: &str = "iocHistory";

/// Key holding the service-name to enabled-flag map.
pub const ENABLED_SERVICES_KEY: &str = "enabledServices";

/// Key holding the user-defined combinations array.
pub const COMBINATIONS_KEY: &str = "customCombinations";

/// Asynchronous key-value store holding JSON values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replaces the value stored under `key`.
    ///
    /// A failed `set` must leave the previously stored value in place.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Deletes `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key).await
    }
}

/// Errors reported by a [`KeyValueStore`] implementation.
#[derive(Debug)]
pub enum StoreError {
    /// The store could not be reached or read.
    Unavailable(String),

    /// The store rejected a write.
    WriteFailed(String),

    /// Underlying file I/O failed.
    Io(std::io::Error),

    /// The backing document could not be encoded or decoded.
    Serialization(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
            StoreError::WriteFailed(msg) => write!(f, "Store write failed: {}", msg),
            StoreError::Io(err) => write!(f, "Store I/O error: {}", err),
            StoreError::Serialization(err) => write!(f, "Store serialization error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Serialization(err) => Some(err),
            StoreError::Unavailable(_) | StoreError::WriteFailed(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

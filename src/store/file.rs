//! JSON-file backed key-value store.
//!
//! The whole store is one JSON object on disk, `{ key: value, ... }`. Every
//! write rewrites the document into a temporary file and renames it into
//! place, so a failed write leaves the previous document intact.

use super::{KeyValueStore, StoreError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File name used under the default data directory.
pub const DEFAULT_STORE_FILE: &str = "storage.json";

/// A [`KeyValueStore`] persisted as a single JSON document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serialises read-modify-write of the document within this process.
    guard: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Creates a store at the default location.
    ///
    /// Returns `~/.config/ioc-lookup/storage.json` on Unix-like systems, or
    /// the equivalent under `%USERPROFILE%\AppData\Roaming` on Windows.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if no home directory is known or the data
    /// directory cannot be created.
    pub fn open_default() -> Result<Self, StoreError> {
        let config_dir = if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config")
        } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
            PathBuf::from(user_profile).join("AppData").join("Roaming")
        } else {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine home directory",
            )));
        };

        let data_dir = config_dir.join("ioc-lookup");
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)?;
        }

        Ok(Self::new(data_dir.join(DEFAULT_STORE_FILE)))
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>, StoreError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::Unavailable(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(document)?;

        let temp_path = self.path.with_extension("json.tmp");
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            let mut temp_file = File::create(&temp_path)?;
            temp_file.write_all(json.as_bytes())?;
            temp_file.flush()?;
            drop(temp_file);
            fs::rename(&temp_path, &self.path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StoreError::WriteFailed(format!("{}: {}", self.path.display(), e))
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.guard
            .lock()
            .map_err(|_| StoreError::Unavailable("file store lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let _guard = self.lock()?;
        let document = self.read_document()?;
        Ok(document.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value);
        self.write_document(&document)
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock()?;
        let mut document = self.read_document()?;
        if document.remove(key).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }
}

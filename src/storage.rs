use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("failed to access the storage backend")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize the stored value")]
    Serialization(#[from] serde_json::Error),
    #[error("the storage backend lock was poisoned")]
    Poisoned,
    #[error("the storage task did not complete")]
    Task(#[from] tokio::task::JoinError),
}

/// String key-value storage, the server side counterpart of a browser's
/// local storage.
pub trait Storage: Send + Sync + 'static {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<directory>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.directory)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut items) = storage.items.lock() {
            items.insert(key.to_owned(), value.to_owned());
        }
        storage
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

use crate::core::SessionStorage;
use crate::utils::error::{AppError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// 每個 key 對應 `<base_path>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    base_path: String,
}

impl FileSessionStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        Path::new(&self.base_path).join(format!("{}.json", key))
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.slot_path(key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, value)?;
        tracing::debug!("Session written to {}", full_path.display());
        Ok(())
    }
}

/// Process-local storage; clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().map_err(|_| AppError::StorageError {
            message: "session slots lock poisoned".to_string(),
        })?;
        Ok(slots.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().map_err(|_| AppError::StorageError {
            message: "session slots lock poisoned".to_string(),
        })?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

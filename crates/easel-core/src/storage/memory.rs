//! In-memory storage, mainly for tests and ephemeral sessions.

use super::{Storage, StorageError, StorageResult};
use crate::scene::Scene;
use std::collections::HashMap;
use std::sync::RwLock;

/// Keeps drawings in a map guarded by a read-write lock.
#[derive(Default)]
pub struct MemoryStorage {
    drawings: RwLock<HashMap<String, Scene>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, scene: &Scene) -> StorageResult<()> {
        let mut drawings = self
            .drawings
            .write()
            .map_err(|e| StorageError::Other(e.to_string()))?;
        drawings.insert(id.to_string(), scene.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<Scene> {
        let drawings = self
            .drawings
            .read()
            .map_err(|e| StorageError::Other(e.to_string()))?;
        drawings
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut drawings = self
            .drawings
            .write()
            .map_err(|e| StorageError::Other(e.to_string()))?;
        drawings.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let drawings = self
            .drawings
            .read()
            .map_err(|e| StorageError::Other(e.to_string()))?;
        Ok(drawings.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let drawings = self
            .drawings
            .read()
            .map_err(|e| StorageError::Other(e.to_string()))?;
        Ok(drawings.contains_key(id))
    }
}

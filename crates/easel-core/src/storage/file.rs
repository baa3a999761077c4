//! File-based storage.

use super::{Storage, StorageError, StorageResult};
use crate::scene::Scene;
use std::fs;
use std::path::PathBuf;

/// Stores drawings as JSON files in a directory, one file per id.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `base_path`, creating the
    /// directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("failed to create storage directory: {e}"))
            })?;
        }
        Ok(Self { base_path })
    }

    /// The file path for a drawing id.
    ///
    /// Ids are sanitized for filenames by replacing every character
    /// outside `[A-Za-z0-9_-]` with `_`, so ids that differ only in
    /// such characters (`my/drawing` vs `my_drawing`) map to the same
    /// file. Callers that need distinct documents should use ids that
    /// stay distinct under this mapping.
    fn drawing_path(&self, id: &str) -> PathBuf {
        let safe_id: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{safe_id}.json"))
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, scene: &Scene) -> StorageResult<()> {
        let path = self.drawing_path(id);
        let json = scene
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        log::debug!("saving drawing {id} to {}", path.display());
        fs::write(&path, json)
            .map_err(|e| StorageError::Io(format!("failed to write {}: {e}", path.display())))
    }

    fn load(&self, id: &str) -> StorageResult<Scene> {
        let path = self.drawing_path(id);
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("failed to read {}: {e}", path.display())))?;
        Scene::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("failed to parse {}: {e}", path.display()))
        })
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.drawing_path(id);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("failed to read directory: {e}")))?;

        let mut ids = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self.drawing_path(id).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, Shape};
    use kurbo::Point;
    use tempfile::tempdir;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_shape(Shape::Rectangle(Rectangle::new(
            Point::new(10.0, 10.0),
            50.0,
            50.0,
        )));
        scene
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("test-drawing", &sample_scene()).unwrap();
        let loaded = storage.load("test-drawing").unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_load_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert!(matches!(
            storage.load("nonexistent"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_list() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let scene = sample_scene();
        storage.save("one", &scene).unwrap();
        storage.save("two", &scene).unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"one".to_string()));
        assert!(list.contains(&"two".to_string()));
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("doomed", &sample_scene()).unwrap();
        assert!(storage.exists("doomed").unwrap());

        storage.delete("doomed").unwrap();
        assert!(!storage.exists("doomed").unwrap());

        // Deleting again is a no-op.
        storage.delete("doomed").unwrap();
    }

    #[test]
    fn test_sanitizes_id() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save("my/drawing:v2", &sample_scene()).unwrap();
        let loaded = storage.load("my/drawing:v2").unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_sanitized_ids_can_collide() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        // Ids differing only in sanitized characters share one file.
        storage.save("my/drawing", &sample_scene()).unwrap();
        storage.save("my_drawing", &Scene::new()).unwrap();

        assert_eq!(storage.list().unwrap().len(), 1);
        assert!(storage.load("my/drawing").unwrap().is_empty());
    }
}

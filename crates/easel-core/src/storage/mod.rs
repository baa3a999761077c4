//! Storage abstraction for persisting drawings.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::scene::Scene;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("drawing not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for drawing storage backends.
///
/// Implementations can keep drawings in memory or on the filesystem; the
/// editor only sees named JSON documents.
pub trait Storage: Send + Sync {
    /// Save a drawing under the given id, replacing any existing one.
    fn save(&self, id: &str, scene: &Scene) -> StorageResult<()>;

    /// Load a drawing.
    fn load(&self, id: &str) -> StorageResult<Scene>;

    /// Delete a drawing. Deleting an unknown id is not an error.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all stored drawing ids.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a drawing exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;
}

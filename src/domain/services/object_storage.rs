use async_trait::async_trait;

use crate::domain::error::StorageError;

/// File store addressed by relative, `/`-separated paths.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError>;

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

use async_trait::async_trait;

use super::error::StorageError;

/// A file written by a [`FileStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Public path, relative to the static mount (e.g. `uploads/payments/1700000000000-proof.png`).
    pub public_path: String,
    pub size: u64,
}

/// Storage for user-uploaded files, grouped by category directory.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store bytes under `category/name` and return where they can be fetched from.
    ///
    /// Never replaces an existing file: a taken name fails with
    /// [`StorageError::AlreadyExists`].
    async fn put(
        &self,
        category: &str,
        name: &str,
        data: &[u8],
    ) -> Result<StoredFile, StorageError>;

    /// Delete a previously stored file by its public path.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, public_path: &str) -> Result<bool, StorageError>;
}

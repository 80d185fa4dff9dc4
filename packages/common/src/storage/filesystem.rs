use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::error::StorageError;
use super::traits::{FileStore, StoredFile};

/// Filesystem-backed upload store.
///
/// Files live at `{base_path}/{category}/{name}` and are addressed publicly as
/// `{public_prefix}/{category}/{name}`, matching a static file mount of
/// `base_path` at `/{public_prefix}`.
pub struct FilesystemStore {
    base_path: PathBuf,
    public_prefix: String,
    max_size: u64,
}

impl FilesystemStore {
    /// Create a new filesystem store, creating the base and temp directories.
    pub async fn new(
        base_path: PathBuf,
        public_prefix: &str,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            public_prefix: public_prefix.trim_matches('/').to_string(),
            max_size,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    /// Map a public path back onto the filesystem, refusing anything that
    /// is not exactly `{prefix}/{category}/{name}`.
    fn resolve(&self, public_path: &str) -> Result<PathBuf, StorageError> {
        let invalid = || StorageError::InvalidName(public_path.to_string());
        let rest = public_path
            .trim_start_matches('/')
            .strip_prefix(&self.public_prefix)
            .and_then(|r| r.strip_prefix('/'))
            .ok_or_else(invalid)?;
        let (category, name) = rest.split_once('/').ok_or_else(invalid)?;
        check_segment(category).map_err(|_| invalid())?;
        check_segment(name).map_err(|_| invalid())?;
        Ok(self.base_path.join(category).join(name))
    }
}

fn check_segment(segment: &str) -> Result<(), StorageError> {
    if segment.is_empty()
        || segment.starts_with('.')
        || segment.contains(['/', '\\', '\0'])
        || segment.chars().any(|c| c.is_ascii_control())
    {
        return Err(StorageError::InvalidName(segment.to_string()));
    }
    Ok(())
}

#[async_trait]
impl FileStore for FilesystemStore {
    async fn put(
        &self,
        category: &str,
        name: &str,
        data: &[u8],
    ) -> Result<StoredFile, StorageError> {
        check_segment(category)?;
        check_segment(name)?;

        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let dir = self.base_path.join(category);
        fs::create_dir_all(&dir).await?;

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        // Linking fails if the target exists, unlike rename.
        let published = fs::hard_link(&temp_path, dir.join(name)).await;
        let _ = fs::remove_file(&temp_path).await;
        match published {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(format!("{category}/{name}")));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::debug!(category, name, size = data.len(), "Stored upload");

        Ok(StoredFile {
            public_path: format!("{}/{}/{}", self.public_prefix, category, name),
            size: data.len() as u64,
        })
    }

    async fn delete(&self, public_path: &str) -> Result<bool, StorageError> {
        let path = self.resolve(public_path)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

use thiserror::Error;

/// Errors that can occur while storing uploaded files.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested file was not found.
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A file with the same name is already stored.
    #[error("file already exists: {0}")]
    AlreadyExists(String),
    /// The stored name would escape the storage root.
    #[error("invalid file name: {0}")]
    InvalidName(String),
    /// The file exceeds the configured size limit.
    #[error("file exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },
}

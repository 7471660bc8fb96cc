use thiserror::Error;

/// Errors related to the core types of the redirect service.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short key: {0}")]
    InvalidShortKey(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("repeated path: {0}")]
    DuplicatePath(String),
    #[error("malformed path mappings: {0}")]
    MalformedMappings(String),
}

/// Errors reported by a storage backend.
///
/// [`StorageError::MissingKey`] is the only condition callers are expected
/// to branch on; every other variant is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("key not found")]
    MissingKey,
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Returns `true` when the key is absent or has expired.
    pub fn is_missing_key(&self) -> bool {
        matches!(self, StorageError::MissingKey)
    }
}

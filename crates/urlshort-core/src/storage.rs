use crate::destination::Destination;
use crate::error::StorageError;
use crate::short_key::ShortKey;
use async_trait::async_trait;
use std::sync::Arc;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// What a set-if-absent save did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The key was free and now maps to the given destination.
    Inserted,
    /// The key was already taken; the existing mapping was left untouched.
    AlreadyExists,
}

/// A read-only view of a storage backend.
#[async_trait]
pub trait ReadStorage: Send + Sync + 'static {
    /// Returns the destination URL stored under `key`.
    ///
    /// Fails with [`StorageError::MissingKey`] when the key was never saved
    /// or its TTL has elapsed.
    async fn get(&self, key: &ShortKey) -> Result<String>;
}

/// A storage backend for short-key redirects.
///
/// Entries expire after a horizon fixed when the backend is constructed;
/// there is no explicit delete.
#[async_trait]
pub trait Storage: ReadStorage {
    /// Persists `key -> url` only if `key` is not already present.
    ///
    /// An occupied key is not an error: the existing value is kept and
    /// [`SaveOutcome::AlreadyExists`] is returned.
    async fn save(&self, key: &ShortKey, url: &Destination) -> Result<SaveOutcome>;
}

#[async_trait]
impl<T: ReadStorage + ?Sized> ReadStorage for Arc<T> {
    async fn get(&self, key: &ShortKey) -> Result<String> {
        (**self).get(key).await
    }
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for Arc<T> {
    async fn save(&self, key: &ShortKey, url: &Destination) -> Result<SaveOutcome> {
        (**self).save(key, url).await
    }
}

//! Write and read paths of the dynamic redirect mode.
//!
//! [`ShortenerService`] validates destinations, mints keys with a
//! [`Generator`](urlshort_generator::Generator) and persists them through a
//! [`Storage`](urlshort_core::Storage) backend.

pub mod error;
pub mod service;

pub use error::{Result, ShortenerError};
pub use service::{ShortenerService, DEFAULT_MAX_ATTEMPTS};

use async_trait::async_trait;
use std::sync::Arc;
use urlshort_core::ShortKey;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Validates `url`, stores it under a fresh key and returns that key.
    async fn shorten(&self, url: &str) -> Result<ShortKey>;

    /// Looks up the destination stored under `key`.
    ///
    /// Keys that are malformed, unknown or expired all yield
    /// [`ShortenerError::NotFound`].
    async fn resolve(&self, key: &str) -> Result<String>;
}

#[async_trait]
impl<T: Shortener + ?Sized> Shortener for Arc<T> {
    async fn shorten(&self, url: &str) -> Result<ShortKey> {
        (**self).shorten(url).await
    }

    async fn resolve(&self, key: &str) -> Result<String> {
        (**self).resolve(key).await
    }
}

use thiserror::Error;
use urlshort_core::StorageError;

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("short url not found")]
    NotFound,
    #[error("no free short key after {attempts} attempts")]
    KeysExhausted { attempts: u32 },
    #[error("storage error: {0}")]
    Storage(#[source] StorageError),
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::MissingKey => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

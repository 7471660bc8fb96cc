use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Number of characters in every short key.
pub const KEY_LENGTH: usize = 6;

/// The 62-symbol alphabet short keys are drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Path segment under which shortened URLs are served.
pub const SHORT_PATH_PREFIX: &str = "short";

/// A validated short key identifying a stored redirect.
///
/// Keys are exactly [`KEY_LENGTH`] characters from `[A-Za-z0-9]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortKey(String);

impl ShortKey {
    /// Creates a new `ShortKey` after validating the input.
    pub fn new(key: impl Into<String>) -> std::result::Result<Self, CoreError> {
        let key = key.into();
        Self::validate(&key)?;
        Ok(Self(key))
    }

    /// Creates a `ShortKey` without validation.
    ///
    /// Use this only for keys produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Composes the public short URL, `{base_url}/short/{key}`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            SHORT_PATH_PREFIX,
            self.0
        )
    }

    /// Returns the short key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(key: &str) -> std::result::Result<(), CoreError> {
        if key.len() != KEY_LENGTH {
            return Err(CoreError::InvalidShortKey(format!(
                "length must be {}, got {}",
                KEY_LENGTH,
                key.len()
            )));
        }

        if !key.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidShortKey(format!(
                "must contain only alphanumeric characters: '{}'",
                key
            )));
        }

        Ok(())
    }
}

impl TryFrom<String> for ShortKey {
    type Error = CoreError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortKey> for String {
    fn from(key: ShortKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ShortKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ShortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

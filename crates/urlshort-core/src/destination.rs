use crate::error::CoreError;
use std::fmt::Display;
use url::Url;

/// A destination URL that passed syntax validation.
///
/// Only absolute URIs carrying at least a scheme and a host are accepted.
/// Storage backends take a `Destination` on save, so nothing unvalidated
/// ever reaches a store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination(String);

impl Destination {
    /// Validates `raw` and wraps it. The original text is kept verbatim.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.is_empty() {
            return Err(CoreError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let parsed = Url::parse(raw)
            .map_err(|e| CoreError::InvalidUrl(format!("'{}': {}", raw, e)))?;

        match parsed.host_str() {
            Some(host) if !host.is_empty() => Ok(Self(raw.to_string())),
            _ => Err(CoreError::InvalidUrl(format!(
                "URL must have a scheme and host: '{}'",
                raw
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

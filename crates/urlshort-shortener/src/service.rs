use crate::error::{Result, ShortenerError};
use crate::Shortener;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, trace, warn};
use urlshort_core::{Destination, SaveOutcome, ShortKey, Storage};
use urlshort_generator::Generator;

/// Number of keys tried before a shorten request gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Storage` backend and a `Generator`. Generated keys
/// are not guaranteed unique, so a save that reports
/// [`SaveOutcome::AlreadyExists`] is retried with a fresh key, up to
/// `max_attempts` times. The existing mapping is never overwritten.
#[derive(Debug)]
pub struct ShortenerService<S, G> {
    storage: Arc<S>,
    generator: Arc<G>,
    max_attempts: u32,
}

impl<S, G> Clone for ShortenerService<S, G> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            generator: Arc::clone(&self.generator),
            max_attempts: self.max_attempts,
        }
    }
}

impl<S: Storage, G: Generator> ShortenerService<S, G> {
    pub fn new(storage: S, generator: G) -> Self {
        Self {
            storage: Arc::new(storage),
            generator: Arc::new(generator),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the collision retry bound. Values below one are raised to one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

#[async_trait]
impl<S: Storage, G: Generator> Shortener for ShortenerService<S, G> {
    async fn shorten(&self, url: &str) -> Result<ShortKey> {
        let destination =
            Destination::parse(url).map_err(|e| ShortenerError::InvalidUrl(e.to_string()))?;

        for attempt in 1..=self.max_attempts {
            let key = self.generator.generate();
            trace!(key = %key, attempt, "trying generated key");

            match self
                .storage
                .save(&key, &destination)
                .await
                .map_err(ShortenerError::Storage)?
            {
                SaveOutcome::Inserted => {
                    debug!(key = %key, url = %destination, "shortened url");
                    return Ok(key);
                }
                SaveOutcome::AlreadyExists => {
                    debug!(key = %key, attempt, "generated key already taken");
                }
            }
        }

        warn!(attempts = self.max_attempts, "gave up looking for a free short key");
        Err(ShortenerError::KeysExhausted {
            attempts: self.max_attempts,
        })
    }

    async fn resolve(&self, key: &str) -> Result<String> {
        let Ok(key) = ShortKey::new(key) else {
            trace!(key, "malformed short key");
            return Err(ShortenerError::NotFound);
        };

        let url = self.storage.get(&key).await?;
        debug!(key = %key, url = %url, "resolved short key");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use urlshort_core::{ReadStorage, StorageError};
    use urlshort_generator::SeqGenerator;
    use urlshort_storage::InMemoryStore;

    /// Replays a fixed list of keys, repeating the last one.
    struct ScriptedGenerator {
        keys: Vec<&'static str>,
        next: AtomicUsize,
    }

    impl ScriptedGenerator {
        fn new(keys: Vec<&'static str>) -> Self {
            Self {
                keys,
                next: AtomicUsize::new(0),
            }
        }
    }

    impl Generator for ScriptedGenerator {
        fn generate(&self) -> ShortKey {
            let i = self.next.fetch_add(1, Ordering::SeqCst);
            let key = self.keys[i.min(self.keys.len() - 1)];
            ShortKey::new_unchecked(key)
        }
    }

    struct BrokenStorage;

    #[async_trait]
    impl ReadStorage for BrokenStorage {
        async fn get(&self, _key: &ShortKey) -> urlshort_core::storage::Result<String> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl Storage for BrokenStorage {
        async fn save(
            &self,
            _key: &ShortKey,
            _url: &Destination,
        ) -> urlshort_core::storage::Result<SaveOutcome> {
            Err(StorageError::Unavailable("connection refused".to_string()))
        }
    }

    fn test_service() -> ShortenerService<InMemoryStore, SeqGenerator> {
        ShortenerService::new(InMemoryStore::new(5).unwrap(), SeqGenerator::new())
    }

    #[tokio::test]
    async fn shorten_then_resolve() {
        let service = test_service();

        let key = service.shorten("https://example.com").await.unwrap();
        assert_eq!(key.as_str(), "aaaaaa");

        let url = service.resolve(key.as_str()).await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn shorten_issues_distinct_keys() {
        let service = test_service();

        let first = service.shorten("https://example.com").await.unwrap();
        let second = service.shorten("https://example.com").await.unwrap();

        assert_eq!(first.as_str(), "aaaaaa");
        assert_eq!(second.as_str(), "aaaaab");
    }

    #[tokio::test]
    async fn shorten_rejects_invalid_url() {
        let service = test_service();

        for raw in ["", "not-a-url", "google.com"] {
            let err = service.shorten(raw).await.unwrap_err();
            assert!(matches!(err, ShortenerError::InvalidUrl(_)), "accepted {raw:?}");
        }
    }

    #[tokio::test]
    async fn shorten_retries_on_collision() {
        let store = InMemoryStore::new(5).unwrap();
        store
            .save(
                &ShortKey::new("taken1").unwrap(),
                &Destination::parse("https://first.com").unwrap(),
            )
            .await
            .unwrap();
        let service =
            ShortenerService::new(store, ScriptedGenerator::new(vec!["taken1", "fresh1"]));

        let key = service.shorten("https://second.com").await.unwrap();

        assert_eq!(key.as_str(), "fresh1");
        assert_eq!(service.resolve("taken1").await.unwrap(), "https://first.com");
        assert_eq!(service.resolve("fresh1").await.unwrap(), "https://second.com");
    }

    #[tokio::test]
    async fn shorten_gives_up_after_max_attempts() {
        let service = ShortenerService::new(
            InMemoryStore::new(5).unwrap(),
            ScriptedGenerator::new(vec!["same00"]),
        )
        .with_max_attempts(3);

        service.shorten("https://first.com").await.unwrap();
        let err = service.shorten("https://second.com").await.unwrap_err();

        assert_eq!(err, ShortenerError::KeysExhausted { attempts: 3 });
        assert_eq!(service.resolve("same00").await.unwrap(), "https://first.com");
    }

    #[test]
    fn max_attempts_is_at_least_one() {
        let service = test_service().with_max_attempts(0);
        assert_eq!(service.max_attempts(), 1);
    }

    #[tokio::test]
    async fn resolve_unknown_key() {
        let service = test_service();

        let err = service.resolve("nope00").await.unwrap_err();
        assert_eq!(err, ShortenerError::NotFound);
    }

    #[tokio::test]
    async fn resolve_malformed_key_is_not_found() {
        let service = test_service();

        for raw in ["", "abc", "toolong1", "ab-cd!"] {
            let err = service.resolve(raw).await.unwrap_err();
            assert_eq!(err, ShortenerError::NotFound, "key {raw:?}");
        }
    }

    #[tokio::test]
    async fn storage_failures_pass_through() {
        let service = ShortenerService::new(BrokenStorage, SeqGenerator::new());

        let err = service.shorten("https://example.com").await.unwrap_err();
        assert!(matches!(err, ShortenerError::Storage(StorageError::Unavailable(_))));

        let err = service.resolve("abc123").await.unwrap_err();
        assert!(matches!(err, ShortenerError::Storage(StorageError::Unavailable(_))));
    }
}

use crate::error::{ttl_seconds, ConfigError};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};
use urlshort_core::storage::Result;
use urlshort_core::{
    Clock, Destination, ReadStorage, SaveOutcome, ShortKey, Storage, StorageError, SystemClock,
};

/// In-memory storage record for a redirect.
#[derive(Debug, Clone)]
struct Record {
    destination: String,
    expire_at: Timestamp,
}

impl Record {
    fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expire_at
    }
}

/// Saves between two sweeps of expired entries.
pub const DEFAULT_SWEEP_INTERVAL: u64 = 1024;

/// In-process implementation of [`Storage`] using DashMap.
///
/// Entries expire `ttl` after they are saved. Expired entries are treated
/// as absent and are evicted on the next access to their key, and every
/// `sweep_interval` saves the whole map is swept.
/// Set-if-absent goes through the DashMap entry API, which holds the shard
/// lock for the whole check-and-insert.
#[derive(Debug)]
pub struct InMemoryStore<C = SystemClock> {
    storage: DashMap<String, Record>,
    ttl: SignedDuration,
    clock: C,
    saves: AtomicU64,
    sweep_interval: u64,
}

impl InMemoryStore<SystemClock> {
    /// Creates a store whose entries live for `ttl_minutes`.
    pub fn new(ttl_minutes: u64) -> std::result::Result<Self, ConfigError> {
        Self::with_clock(ttl_minutes, SystemClock)
    }
}

impl<C: Clock> InMemoryStore<C> {
    /// Creates a store that reads the time from `clock`.
    pub fn with_clock(ttl_minutes: u64, clock: C) -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            storage: DashMap::new(),
            ttl: SignedDuration::from_secs(ttl_seconds(ttl_minutes)?),
            clock,
            saves: AtomicU64::new(0),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        })
    }

    /// Sweeps expired entries every `interval` saves. Zero is raised to one.
    pub fn with_sweep_interval(mut self, interval: u64) -> Self {
        self.sweep_interval = interval.max(1);
        self
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.storage.len();
        self.storage.retain(|_, record| !record.is_expired(now));
        let removed = before.saturating_sub(self.storage.len());
        if removed > 0 {
            debug!(removed, "swept expired keys");
        }
        removed
    }

    /// Number of entries currently held, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl<C: Clock> ReadStorage for InMemoryStore<C> {
    async fn get(&self, key: &ShortKey) -> Result<String> {
        let now = self.clock.now();

        let Some(record) = self.storage.get(key.as_str()) else {
            trace!(key = %key, "key not found");
            return Err(StorageError::MissingKey);
        };

        if record.is_expired(now) {
            drop(record);
            self.storage
                .remove_if(key.as_str(), |_, record| record.is_expired(now));
            debug!(key = %key, "evicted expired key");
            return Err(StorageError::MissingKey);
        }

        Ok(record.destination.clone())
    }
}

#[async_trait]
impl<C: Clock> Storage for InMemoryStore<C> {
    async fn save(&self, key: &ShortKey, url: &Destination) -> Result<SaveOutcome> {
        if (self.saves.fetch_add(1, Ordering::Relaxed) + 1) % self.sweep_interval == 0 {
            self.purge_expired();
        }

        let now = self.clock.now();
        let expire_at = now
            .checked_add(self.ttl)
            .map_err(|e| StorageError::Operation(format!("expiry out of range: {}", e)))?;
        let record = Record {
            destination: url.as_str().to_owned(),
            expire_at,
        };

        match self.storage.entry(key.as_str().to_owned()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.insert(record);
                    debug!(key = %key, "replaced expired key");
                    Ok(SaveOutcome::Inserted)
                } else {
                    debug!(key = %key, "key already present, keeping existing mapping");
                    Ok(SaveOutcome::AlreadyExists)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(record);
                trace!(key = %key, "saved key");
                Ok(SaveOutcome::Inserted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct ManualClock {
        now: Arc<Mutex<Timestamp>>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Arc::new(Mutex::new(Timestamp::from_second(1_700_000_000).unwrap())),
            }
        }

        fn advance(&self, by: SignedDuration) {
            let mut now = self.now.lock().expect("clock lock should not be poisoned");
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Timestamp {
            *self.now.lock().expect("clock lock should not be poisoned")
        }
    }

    fn key(s: &str) -> ShortKey {
        ShortKey::new(s).unwrap()
    }

    fn dest(s: &str) -> Destination {
        Destination::parse(s).unwrap()
    }

    #[test]
    fn zero_ttl_is_rejected() {
        assert_eq!(InMemoryStore::new(0).unwrap_err(), ConfigError::ZeroTtl);
    }

    #[test]
    fn oversized_ttl_is_rejected() {
        for minutes in [crate::MAX_TTL_MINUTES + 1, 10_000_000_000, u64::MAX] {
            assert!(matches!(
                InMemoryStore::new(minutes).unwrap_err(),
                ConfigError::TtlTooLarge { .. }
            ));
        }
    }

    #[tokio::test]
    async fn longest_ttl_still_saves() {
        let store = InMemoryStore::new(crate::MAX_TTL_MINUTES).unwrap();

        let outcome = store
            .save(&key("abc123"), &dest("https://example.com"))
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Inserted);
    }

    fn numbered_key(prefix: char, i: usize) -> ShortKey {
        ShortKey::new(format!("{}{:05}", prefix, i)).unwrap()
    }

    #[tokio::test]
    async fn unread_expired_keys_are_swept() {
        let clock = ManualClock::new();
        let store = InMemoryStore::with_clock(1, clock.clone())
            .unwrap()
            .with_sweep_interval(100);
        let url = dest("https://example.com");

        for i in 0..1000 {
            store.save(&numbered_key('a', i), &url).await.unwrap();
        }
        assert_eq!(store.len(), 1000);

        clock.advance(SignedDuration::from_mins(10));
        for i in 0..1000 {
            store.save(&numbered_key('b', i), &url).await.unwrap();
        }

        assert_eq!(store.len(), 1000);
        assert!(store.get(&numbered_key('a', 0)).await.is_err());
        assert_eq!(store.get(&numbered_key('b', 999)).await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn purge_keeps_live_entries() {
        let clock = ManualClock::new();
        let store = InMemoryStore::with_clock(1, clock.clone()).unwrap();

        store.save(&key("old000"), &dest("https://old.com")).await.unwrap();
        clock.advance(SignedDuration::from_secs(30));
        store.save(&key("new000"), &dest("https://new.com")).await.unwrap();
        clock.advance(SignedDuration::from_secs(30));

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key("new000")).await.unwrap(), "https://new.com");
    }

    #[tokio::test]
    async fn save_and_get() {
        let store = InMemoryStore::new(1).unwrap();

        let outcome = store
            .save(&key("abc123"), &dest("https://example.com"))
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Inserted);

        let url = store.get(&key("abc123")).await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let store = InMemoryStore::new(1).unwrap();

        let err = store.get(&key("nope00")).await.unwrap_err();
        assert_eq!(err, StorageError::MissingKey);
    }

    #[tokio::test]
    async fn save_does_not_overwrite() {
        let store = InMemoryStore::new(1).unwrap();

        store
            .save(&key("abc123"), &dest("https://example.com"))
            .await
            .unwrap();
        let outcome = store
            .save(&key("abc123"), &dest("https://other.com"))
            .await
            .unwrap();

        assert_eq!(outcome, SaveOutcome::AlreadyExists);
        assert_eq!(store.get(&key("abc123")).await.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn entry_expires_after_ttl() {
        let clock = ManualClock::new();
        let store = InMemoryStore::with_clock(1, clock.clone()).unwrap();

        store
            .save(&key("abc123"), &dest("https://example.com"))
            .await
            .unwrap();

        clock.advance(SignedDuration::from_secs(59));
        assert_eq!(store.get(&key("abc123")).await.unwrap(), "https://example.com");

        clock.advance(SignedDuration::from_secs(1));
        assert_eq!(
            store.get(&key("abc123")).await.unwrap_err(),
            StorageError::MissingKey
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn save_over_expired_entry() {
        let clock = ManualClock::new();
        let store = InMemoryStore::with_clock(1, clock.clone()).unwrap();

        store
            .save(&key("abc123"), &dest("https://old.com"))
            .await
            .unwrap();
        clock.advance(SignedDuration::from_mins(2));

        let outcome = store
            .save(&key("abc123"), &dest("https://new.com"))
            .await
            .unwrap();
        assert_eq!(outcome, SaveOutcome::Inserted);
        assert_eq!(store.get(&key("abc123")).await.unwrap(), "https://new.com");
    }

    #[tokio::test]
    async fn concurrent_saves_of_same_key_keep_first_writer() {
        let store = Arc::new(InMemoryStore::new(5).unwrap());
        let mut handles = vec![];

        for i in 0..16u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let url = Destination::parse(&format!("https://example{}.com", i)).unwrap();
                store.save(&key("same00"), &url).await.unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() == SaveOutcome::Inserted {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(store.len(), 1);
    }
}

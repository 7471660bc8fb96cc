//! Storage backends for the dynamic redirect mode.
//!
//! Both backends implement [`urlshort_core::Storage`] with set-if-absent
//! saves and a TTL fixed at construction time.

pub mod error;
pub mod memory;
pub mod redis;

pub use error::{ConfigError, ConnectError, MAX_TTL_MINUTES};
pub use memory::InMemoryStore;
pub use self::redis::{RedisStore, RedisStoreConfig};
pub use urlshort_core::{ReadStorage, SaveOutcome, Storage, StorageError};

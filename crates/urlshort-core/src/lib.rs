//! Core types and traits for the urlshort redirect service.
//!
//! This crate provides the pieces shared by the static and dynamic
//! deployments: the short key and destination types, the immutable
//! path table used by config-driven redirects, and the storage contract
//! that every dynamic backend implements.

pub mod clock;
pub mod destination;
pub mod error;
pub mod mapping;
pub mod short_key;
pub mod storage;

pub use clock::{Clock, SystemClock};
pub use destination::Destination;
pub use error::{CoreError, StorageError};
pub use mapping::{PathMapping, RouteTable};
pub use short_key::ShortKey;
pub use storage::{ReadStorage, SaveOutcome, Storage};

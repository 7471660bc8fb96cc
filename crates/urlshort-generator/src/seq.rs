use crate::Generator;
use std::sync::atomic::{AtomicU64, Ordering};
use urlshort_core::short_key::{ALPHABET, KEY_LENGTH};
use urlshort_core::ShortKey;

/// Number of distinct keys a six-symbol base62 counter can express.
const KEY_SPACE: u64 = 62u64.pow(KEY_LENGTH as u32);

/// A short key generator using a sequential counter.
///
/// Produces the base62 encoding of the counter, left-padded to six symbols:
/// "aaaaaa", "aaaaab", ... The counter wraps after 62^6 keys. Keys are unique
/// within a single instance without any storage round-trip.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
        }
    }
}

impl SeqGenerator {
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Creates a generator starting from a specific counter value.
    ///
    /// Useful for resuming from a known state.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
        }
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> ShortKey {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortKey::new_unchecked(encode_base62(count % KEY_SPACE))
    }
}

fn encode_base62(mut value: u64) -> String {
    let mut buf = [ALPHABET[0]; KEY_LENGTH];
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(value % 62) as usize];
        value /= 62;
    }
    buf.iter().map(|&b| b as char).collect()
}

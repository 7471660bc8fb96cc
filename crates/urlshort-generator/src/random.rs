use crate::Generator;
use jiff::Timestamp;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use urlshort_core::short_key::{ALPHABET, KEY_LENGTH};
use urlshort_core::ShortKey;

/// Generates keys by sampling the alphanumeric alphabet uniformly,
/// with replacement.
///
/// The generator owns a process-local PRNG seeded from the high-resolution
/// wall clock. The stream is reused across calls rather than reseeded, so
/// two requests landing in the same clock tick still get different keys.
#[derive(Debug)]
pub struct RandomGenerator {
    rng: Mutex<StdRng>,
}

impl RandomGenerator {
    /// Creates a generator seeded from the current time in nanoseconds.
    pub fn new() -> Self {
        Self::with_seed(clock_seed())
    }

    /// Creates a generator with a fixed seed, producing a reproducible sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortKey {
        let mut rng = self.rng.lock();
        let key: String = (0..KEY_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortKey::new_unchecked(key)
    }
}

fn clock_seed() -> u64 {
    // Low 64 bits of the nanosecond clock.
    Timestamp::now().as_nanosecond() as u64
}

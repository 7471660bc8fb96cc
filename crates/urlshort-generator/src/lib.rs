pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use std::sync::Arc;
use urlshort_core::ShortKey;

/// Trait for generating short keys.
///
/// Implementations are pure generators that don't interact with storage,
/// so a generated key may already be taken. Callers decide what to do on
/// a collision.
pub trait Generator: Send + Sync + 'static {
    /// Produces a key of exactly six characters from `[A-Za-z0-9]`.
    fn generate(&self) -> ShortKey;
}

impl<G: Generator + ?Sized> Generator for Arc<G> {
    fn generate(&self) -> ShortKey {
        (**self).generate()
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&self) -> ShortKey {
        (**self).generate()
    }
}

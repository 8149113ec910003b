//! Deterministic seeded randomness.
//!
//! One world seed drives everything. Each consumer draws from its own stream,
//! and column-based generation derives one RNG per grid column, so a column
//! always generates the same way no matter which query range contains it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Independent random streams derived from the world seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeedStream {
    /// Terrain noise lattice.
    Noise,
    /// Per-block ground colors.
    GroundColor,
    /// Tree, leaf and fruit placement.
    Flora,
    /// Repaints and sweeps triggered by events.
    Appearance,
}

/// Derive a u64 seed for one stream and grid column.
///
/// Uses SipHash (via std's `DefaultHasher`) to combine the inputs into a
/// well-distributed u64.
pub fn derive_seed(world_seed: u64, stream: SeedStream, column: i64) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    stream.hash(&mut hasher);
    column.hash(&mut hasher);
    hasher.finish()
}

/// Deterministic RNG for one stream and grid column.
pub fn column_rng(world_seed: u64, stream: SeedStream, column: i64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(world_seed, stream, column))
}

/// Deterministic RNG for a stream that is not tied to a column.
pub fn stream_rng(world_seed: u64, stream: SeedStream) -> ChaCha8Rng {
    column_rng(world_seed, stream, 0)
}

/// Fresh seed for sessions that were not given one.
pub fn random_seed() -> u64 {
    rand::random()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_derive_seed_deterministic() {
        let a = derive_seed(999, SeedStream::Flora, 30);
        let b = derive_seed(999, SeedStream::Flora, 30);
        assert_eq!(a, b, "Same inputs must produce same derived seed");
    }

    #[test]
    fn test_derive_seed_different_columns() {
        assert_ne!(
            derive_seed(42, SeedStream::Flora, 0),
            derive_seed(42, SeedStream::Flora, 30),
            "Adjacent columns should produce different seeds"
        );
    }

    #[test]
    fn test_derive_seed_different_streams() {
        assert_ne!(
            derive_seed(42, SeedStream::Flora, 60),
            derive_seed(42, SeedStream::GroundColor, 60),
            "Streams must not share seeds"
        );
    }

    #[test]
    fn test_derive_seed_different_world_seeds() {
        assert_ne!(
            derive_seed(0, SeedStream::Noise, 5),
            derive_seed(1, SeedStream::Noise, 5),
            "Different world seeds should produce different seeds"
        );
    }

    #[test]
    fn test_column_rng_deterministic() {
        let mut rng_a = column_rng(42, SeedStream::Flora, -90);
        let mut rng_b = column_rng(42, SeedStream::Flora, -90);
        for _ in 0..1000 {
            assert_eq!(
                rng_a.next_u64(),
                rng_b.next_u64(),
                "ChaCha8Rng sequences must match for same seed"
            );
        }
    }
}

//! Seeded random sources.
//!
//! There is no process-wide generator: every sampling entry point takes an
//! explicit `&mut R where R: Rng + ?Sized`. These helpers build the concrete
//! generator used by the CLI and the corpus runner, and derive independent
//! per-instance streams from one base seed.

use rand::{SeedableRng, rngs::SmallRng};

/// SplitMix64 increment (the 64-bit golden ratio) used to space derived
/// streams.
const STREAM_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Returns a small, fast generator seeded with `seed`.
#[must_use]
pub fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Derives the seed of stream `stream` from `base_seed`.
///
/// The mapping is a pure function, so stream `i` sees the same seed no matter
/// which thread or in which order it is evaluated.
///
/// # Examples
/// ```
/// use gamegen_core::rng::derive_seed;
///
/// assert_eq!(derive_seed(7, 3), derive_seed(7, 3));
/// assert_ne!(derive_seed(7, 3), derive_seed(7, 4));
/// ```
#[inline]
#[must_use]
pub fn derive_seed(base_seed: u64, stream: usize) -> u64 {
    splitmix64(base_seed ^ ((stream as u64).wrapping_add(1)).wrapping_mul(STREAM_SPACING))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(STREAM_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::Rng;

    use super::*;

    #[test]
    fn seeded_generators_repeat() {
        let mut first = seeded(42);
        let mut second = seeded(42);
        let a: Vec<u64> = (0..8).map(|_| first.r#gen()).collect();
        let b: Vec<u64> = (0..8).map(|_| second.r#gen()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn derived_streams_are_distinct() {
        let seeds: HashSet<u64> = (0..1_000).map(|stream| derive_seed(0, stream)).collect();
        assert_eq!(seeds.len(), 1_000);
    }

    #[test]
    fn splitmix_matches_reference_output() {
        // First output of SplitMix64 seeded with zero.
        assert_eq!(splitmix64(0), 0xE220_A839_7B1D_CDAF);
    }
}

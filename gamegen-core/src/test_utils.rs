//! Shared test utilities for `gamegen-core`.

use gamegen_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;
use rand::{SeedableRng, rngs::SmallRng};

use crate::graph::Graph;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROPTEST_CASES` and
/// `GAMEGEN_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Deterministic RNG for unit tests.
#[must_use]
pub(crate) fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Returns every directed edge as an `(origin, target)` pair in adjacency
/// order.
#[must_use]
pub(crate) fn edge_list<N, E>(graph: &Graph<N, E>) -> Vec<(usize, usize)> {
    graph.edges().map(|edge| edge.endpoints()).collect()
}

/// Returns the sorted neighbour set of `node`.
#[must_use]
pub(crate) fn sorted_neighbours<N, E>(graph: &Graph<N, E>, node: usize) -> Vec<usize> {
    let mut neighbours: Vec<_> = graph.neighbours(node).collect();
    neighbours.sort_unstable();
    neighbours
}

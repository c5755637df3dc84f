//! Ring of rings.

use rand::Rng;

use super::{GenerationOutcome, GeneratorError, GraphGenerator, MAX_NODES, check_range, link};
use crate::graph::{EdgePolicy, Graph};

/// An inner cycle of hubs, each hub anchoring an outer cycle.
///
/// Node `i * outer` is the hub of ring `i`; the ring occupies nodes
/// `i * outer .. (i + 1) * outer`. Degenerate cycles (a single hub or a
/// single-node ring) would close onto themselves and are left without the
/// self-loop.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RingOfRings {
    inner: usize,
    outer: usize,
}

impl RingOfRings {
    /// Accepted range for both ring sizes.
    pub const RING_SIZE: std::ops::RangeInclusive<usize> = 1..=50;
    /// Ring-size ceiling used by [`Self::sample`].
    pub const SAMPLE_MAX_RING_SIZE: usize = 6;

    /// Validates `inner` hubs each anchoring a ring of `outer` nodes.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when either size lies
    /// outside [`Self::RING_SIZE`].
    pub fn new(inner: usize, outer: usize) -> Result<Self, GeneratorError> {
        check_range("inner_nodes", inner, Self::RING_SIZE)?;
        check_range("outer_nodes", outer, Self::RING_SIZE)?;
        check_range("nodes", inner * outer, 1..=MAX_NODES)?;
        Ok(Self { inner, outer })
    }

    /// Draws a random valid configuration.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            inner: rng.gen_range(1..=Self::SAMPLE_MAX_RING_SIZE),
            outer: rng.gen_range(1..=Self::SAMPLE_MAX_RING_SIZE),
        }
    }
}

impl GraphGenerator for RingOfRings {
    fn name(&self) -> &'static str {
        "ring-of-rings"
    }

    fn policy(&self) -> EdgePolicy {
        EdgePolicy::UNDIRECTED
    }

    fn node_count(&self) -> usize {
        self.inner * self.outer
    }

    fn populate<N, E, R>(
        &self,
        graph: &mut Graph<N, E>,
        _rng: &mut R,
    ) -> Result<GenerationOutcome, GeneratorError>
    where
        R: Rng + ?Sized,
    {
        for ring in 0..self.inner {
            let hub = ring * self.outer;
            let next_hub = ((ring + 1) % self.inner) * self.outer;
            if next_hub != hub {
                link(graph, hub, next_hub)?;
            }
            let last = hub + self.outer - 1;
            for node in hub..last {
                link(graph, node, node + 1)?;
            }
            if last != hub {
                link(graph, last, hub)?;
            }
        }
        Ok(GenerationOutcome::Complete)
    }
}

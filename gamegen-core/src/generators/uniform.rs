//! Uniform random graphs under the G(n, m) model.

use rand::Rng;
use tracing::trace;

use super::{
    GenerationOutcome, GeneratorError, GraphGenerator, MAX_NODES, check_range,
    record_rejected_draws,
};
use crate::graph::{EdgePolicy, Graph};

/// Returns the largest edge count a simple graph on `nodes` nodes can hold.
///
/// Symmetric graphs count unordered pairs (a self-loop is one pair); directed
/// graphs count ordered pairs.
///
/// # Examples
/// ```
/// use gamegen_core::{EdgePolicy, max_edges};
///
/// assert_eq!(max_edges(4, EdgePolicy::new(true, false)), 6);
/// assert_eq!(max_edges(4, EdgePolicy::new(true, true)), 10);
/// assert_eq!(max_edges(4, EdgePolicy::new(false, false)), 12);
/// assert_eq!(max_edges(4, EdgePolicy::new(false, true)), 16);
/// ```
#[must_use]
pub fn max_edges(nodes: usize, policy: EdgePolicy) -> usize {
    let ordered = nodes.saturating_mul(nodes.saturating_sub(1));
    let pairs = if policy.symmetric { ordered / 2 } else { ordered };
    if policy.reflexive {
        pairs.saturating_add(nodes)
    } else {
        pairs
    }
}

/// Uniform random graph with exactly `edges` edges (pairs when symmetric).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UniformRandom {
    nodes: usize,
    edges: usize,
    policy: EdgePolicy,
}

impl UniformRandom {
    /// Node-count ceiling used by [`Self::sample`].
    pub const SAMPLE_MAX_NODES: usize = 20;

    /// Validates a G(n, m) configuration.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when `nodes` or `edges`
    /// is zero or `nodes` exceeds [`MAX_NODES`](crate::MAX_NODES), and
    /// [`GeneratorError::TooManyEdges`] when `edges` exceeds
    /// [`max_edges`] for the policy.
    pub fn new(nodes: usize, edges: usize, policy: EdgePolicy) -> Result<Self, GeneratorError> {
        check_range("nodes", nodes, 1..=MAX_NODES)?;
        if edges == 0 {
            return Err(GeneratorError::invalid("edges", "must be at least 1"));
        }
        let max = max_edges(nodes, policy);
        if edges > max {
            return Err(GeneratorError::TooManyEdges {
                requested: edges,
                max,
            });
        }
        Ok(Self {
            nodes,
            edges,
            policy,
        })
    }

    /// Draws a random valid configuration: random policy flags, at most
    /// [`Self::SAMPLE_MAX_NODES`] nodes and any admissible edge count.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let policy = EdgePolicy::new(rng.gen_bool(0.5), rng.gen_bool(0.5));
        let nodes = rng.gen_range(2..=Self::SAMPLE_MAX_NODES);
        let edges = rng.gen_range(1..=max_edges(nodes, policy));
        Self {
            nodes,
            edges,
            policy,
        }
    }

    /// Returns the requested edge count.
    #[must_use]
    pub fn edges(&self) -> usize {
        self.edges
    }
}

impl GraphGenerator for UniformRandom {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn policy(&self) -> EdgePolicy {
        self.policy
    }

    fn node_count(&self) -> usize {
        self.nodes
    }

    fn populate<N, E, R>(
        &self,
        graph: &mut Graph<N, E>,
        rng: &mut R,
    ) -> Result<GenerationOutcome, GeneratorError>
    where
        R: Rng + ?Sized,
    {
        let mut placed = 0;
        let mut rejected = 0_u64;
        while placed < self.edges {
            let a = rng.gen_range(0..self.nodes);
            let b = rng.gen_range(0..self.nodes);
            if graph.are_neighbours(a, b) || (a == b && !self.policy.reflexive) {
                rejected += 1;
                continue;
            }
            graph.add_edge(a, b)?;
            if self.policy.symmetric && a != b {
                graph.add_edge(b, a)?;
            }
            placed += 1;
        }
        trace!(rejected, "uniform sampling finished");
        record_rejected_draws(rejected);
        Ok(GenerationOutcome::Complete)
    }
}

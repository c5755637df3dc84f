//! Watts–Strogatz small-world graphs.
//!
//! A ring lattice where every node links to its `K` nearest neighbours on
//! each side is rewired edge by edge. Rewiring visits lattice offsets
//! `1..=K` in order and, within an offset, nodes in increasing order; the
//! visiting order is part of the reproducibility contract for a given seed.

use rand::Rng;
use tracing::trace;

use super::{
    GenerationOutcome, GeneratorError, GraphGenerator, MAX_NODES, check_range, link, unlink,
};
use crate::graph::{EdgePolicy, Graph};

/// Small-world generator over `nodes` nodes with lattice half-degree `K` and
/// rewiring probability `p`.
#[derive(Clone, Debug, PartialEq)]
pub struct SmallWorld {
    nodes: usize,
    half_degree: usize,
    rewire_probability: f64,
}

impl SmallWorld {
    /// Default lattice half-degree `K`.
    pub const DEFAULT_HALF_DEGREE: usize = 2;
    /// Default rewiring probability `p`.
    pub const DEFAULT_REWIRE_PROBABILITY: f64 = 0.5;
    /// Accepted range for `K`.
    pub const HALF_DEGREE: std::ops::RangeInclusive<usize> = 1..=10;
    /// Accepted range for `p`.
    pub const REWIRE_PROBABILITY: std::ops::RangeInclusive<f64> = 0.0..=1.0;
    /// Node-count ceiling used by [`Self::sample`].
    pub const SAMPLE_MAX_NODES: usize = 20;

    /// Validates a configuration.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when `K` or `p` lies
    /// outside its declared range or when `2K >= nodes`, which would make
    /// lattice offsets collide.
    ///
    /// # Examples
    /// ```
    /// use gamegen_core::SmallWorld;
    ///
    /// assert!(SmallWorld::new(10, 2, 0.3).is_ok());
    /// assert!(SmallWorld::new(4, 2, 0.3).is_err());
    /// ```
    pub fn new(nodes: usize, half_degree: usize, rewire_probability: f64) -> Result<Self, GeneratorError> {
        check_range("nodes", nodes, 1..=MAX_NODES)?;
        check_range("K", half_degree, Self::HALF_DEGREE)?;
        check_range("p", rewire_probability, Self::REWIRE_PROBABILITY)?;
        if half_degree.saturating_mul(2) >= nodes {
            return Err(GeneratorError::invalid(
                "K",
                format!("2K must be below the node count ({nodes})"),
            ));
        }
        Ok(Self {
            nodes,
            half_degree,
            rewire_probability,
        })
    }

    /// Draws a random valid configuration: at most
    /// [`Self::SAMPLE_MAX_NODES`] nodes, `K <= max(n / 2 - 1, 1)` and a
    /// uniform `p`.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let nodes = rng.gen_range(3..=Self::SAMPLE_MAX_NODES);
        let half_degree = rng.gen_range(1..=(nodes / 2).saturating_sub(1).max(1));
        let rewire_probability = rng.gen_range(0.0..=1.0);
        Self {
            nodes,
            half_degree,
            rewire_probability,
        }
    }

    /// Returns the lattice half-degree `K`.
    #[must_use]
    pub fn half_degree(&self) -> usize {
        self.half_degree
    }

    /// Returns the rewiring probability `p`.
    #[must_use]
    pub fn rewire_probability(&self) -> f64 {
        self.rewire_probability
    }
}

impl GraphGenerator for SmallWorld {
    fn name(&self) -> &'static str {
        "small-world"
    }

    fn policy(&self) -> EdgePolicy {
        EdgePolicy::UNDIRECTED
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
        let n = self.nodes;
        for offset in 1..=self.half_degree {
            for node in 0..n {
                link(graph, node, (node + offset) % n)?;
            }
        }

        let mut rewired = 0_usize;
        for offset in 1..=self.half_degree {
            for node in 0..n {
                let rewire = rng.gen_bool(self.rewire_probability);
                if graph.degree(node) >= n - 1 || !rewire {
                    continue;
                }
                let target = loop {
                    let candidate = (node + rng.gen_range(1..n)) % n;
                    if !graph.are_neighbours(node, candidate) {
                        break candidate;
                    }
                };
                let lattice_target = (node + offset) % n;
                unlink(graph, node, lattice_target)?;
                link(graph, node, target)?;
                trace!(node, lattice_target, replacement = target, "lattice edge rewired");
                rewired += 1;
            }
        }
        trace!(rewired, "small-world rewiring finished");
        Ok(GenerationOutcome::Complete)
    }
}

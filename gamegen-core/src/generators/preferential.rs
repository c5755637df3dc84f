//! Barabási–Albert preferential attachment.
//!
//! Growth starts from `m0` isolated nodes, each seeded with degree 1 so the
//! first arrivals have something to attach to. Every later node draws `m`
//! targets with probability proportional to their current degree. The
//! resulting degree distribution has a power-law tail with exponent near -3.

use rand::Rng;
use tracing::trace;

use super::{GenerationOutcome, GeneratorError, GraphGenerator, check_range, link};
use crate::graph::{EdgePolicy, Graph};

/// Preferential attachment with `m0` seed nodes, `m` links per arrival and
/// `t` arrivals.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PreferentialAttachment {
    seed_nodes: usize,
    links_per_node: usize,
    steps: usize,
}

impl PreferentialAttachment {
    /// Accepted range for `m0`.
    pub const SEED_NODES: std::ops::RangeInclusive<usize> = 1..=100;
    /// Accepted range for `m`.
    pub const LINKS_PER_NODE: std::ops::RangeInclusive<usize> = 1..=100;
    /// Accepted range for `t`.
    pub const STEPS: std::ops::RangeInclusive<usize> = 1..=1_000_000;
    /// Total node ceiling used by [`Self::sample`].
    pub const SAMPLE_MAX_NODES: usize = 20;

    /// Validates a configuration.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when a value lies outside
    /// its declared range or when `m > m0`.
    ///
    /// # Examples
    /// ```
    /// use gamegen_core::{GraphGenerator, PreferentialAttachment};
    ///
    /// let model = PreferentialAttachment::new(5, 1, 95)?;
    /// assert_eq!(model.node_count(), 100);
    /// assert!(PreferentialAttachment::new(2, 3, 10).is_err());
    /// # Ok::<(), gamegen_core::GeneratorError>(())
    /// ```
    pub fn new(seed_nodes: usize, links_per_node: usize, steps: usize) -> Result<Self, GeneratorError> {
        check_range("m0", seed_nodes, Self::SEED_NODES)?;
        check_range("m", links_per_node, Self::LINKS_PER_NODE)?;
        check_range("t", steps, Self::STEPS)?;
        if links_per_node > seed_nodes {
            return Err(GeneratorError::invalid(
                "m",
                format!("{links_per_node} exceeds m0 ({seed_nodes})"),
            ));
        }
        Ok(Self {
            seed_nodes,
            links_per_node,
            steps,
        })
    }

    /// Draws a random valid configuration with at most
    /// [`Self::SAMPLE_MAX_NODES`] nodes in total.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let seed_nodes = rng.gen_range(1..=5);
        let links_per_node = rng.gen_range(1..=seed_nodes);
        let steps = rng.gen_range(1..=Self::SAMPLE_MAX_NODES - seed_nodes);
        Self {
            seed_nodes,
            links_per_node,
            steps,
        }
    }
}

impl GraphGenerator for PreferentialAttachment {
    fn name(&self) -> &'static str {
        "preferential"
    }

    fn policy(&self) -> EdgePolicy {
        EdgePolicy::UNDIRECTED
    }

    fn node_count(&self) -> usize {
        self.seed_nodes + self.steps
    }

    fn populate<N, E, R>(
        &self,
        graph: &mut Graph<N, E>,
        rng: &mut R,
    ) -> Result<GenerationOutcome, GeneratorError>
    where
        R: Rng + ?Sized,
    {
        let total = self.node_count();
        let mut degrees = vec![1_usize; total];
        let mut cumulative = Vec::with_capacity(total);
        let mut repeats = 0_usize;
        for arrival in self.seed_nodes..total {
            cumulative.clear();
            let mut running = 0;
            for &degree in &degrees[..arrival] {
                running += degree;
                cumulative.push(running);
            }
            for _ in 0..self.links_per_node {
                let draw = rng.gen_range(1..=running);
                let target = cumulative.partition_point(|&bound| bound < draw);
                if !link(graph, arrival, target)? {
                    repeats += 1;
                }
                degrees[target] += 1;
                degrees[arrival] += 1;
            }
        }
        trace!(repeats, "preferential attachment finished");
        Ok(GenerationOutcome::Complete)
    }
}

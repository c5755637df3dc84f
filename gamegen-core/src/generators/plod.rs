//! Power-law out-degree (PLOD) graphs.
//!
//! Each node receives a degree budget `round(beta * x^-alpha)` for a uniform
//! rank `x` in `[1, n]`. Edges are then placed by rejection sampling between
//! nodes that still have budget. When budgets concentrate on a few nodes of a
//! large graph, blind draws rarely hit an admissible pair; after a stall the
//! next edge is picked uniformly from the admissible pairs instead, which is
//! the distribution rejection sampling converges to. Running out of budget
//! before reaching the requested edge count is an accepted outcome: the run
//! stops, logs a warning and reports [`GenerationOutcome::Partial`].

use rand::Rng;
use tracing::{debug, warn};

use super::{
    GenerationOutcome, GeneratorError, GraphGenerator, MAX_NODES, check_range, max_edges,
    record_rejected_draws,
};
use crate::graph::{EdgePolicy, Graph};

/// Consecutive rejected draws per node tolerated before the next edge is
/// picked from an enumeration of the admissible pairs.
const STALL_DRAWS_PER_NODE: usize = 64;

/// PLOD generator over `nodes` nodes requesting `edges` edges (pairs when
/// symmetric).
#[derive(Clone, Debug, PartialEq)]
pub struct PowerLawOutDegree {
    nodes: usize,
    edges: usize,
    alpha: f64,
    beta: f64,
    symmetric: bool,
}

impl PowerLawOutDegree {
    /// Default power-law exponent.
    pub const DEFAULT_ALPHA: f64 = 2.1;
    /// Default power-law multiplier.
    pub const DEFAULT_BETA: f64 = 5.0;
    /// Accepted range for `alpha`.
    pub const ALPHA: std::ops::RangeInclusive<f64> = 1.0..=5.0;
    /// Accepted range for `beta`.
    pub const BETA: std::ops::RangeInclusive<f64> = 1.0..=100_000.0;
    /// Accepted range for `edges`.
    pub const EDGES: std::ops::RangeInclusive<usize> = 1..=10_000;
    /// Node-count ceiling used by [`Self::sample`].
    pub const SAMPLE_MAX_NODES: usize = 20;

    /// Validates a configuration using the default `alpha` and `beta`.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when `nodes` lies outside
    /// `1..=`[`MAX_NODES`](crate::MAX_NODES) or `edges` lies outside [`Self::EDGES`], and
    /// [`GeneratorError::TooManyEdges`] when `edges` exceeds the simple-graph
    /// maximum for the node count.
    pub fn new(nodes: usize, edges: usize, symmetric: bool) -> Result<Self, GeneratorError> {
        check_range("nodes", nodes, 1..=MAX_NODES)?;
        check_range("edges", edges, Self::EDGES)?;
        let max = max_edges(nodes, EdgePolicy::new(symmetric, false));
        if edges > max {
            return Err(GeneratorError::TooManyEdges {
                requested: edges,
                max,
            });
        }
        Ok(Self {
            nodes,
            edges,
            alpha: Self::DEFAULT_ALPHA,
            beta: Self::DEFAULT_BETA,
            symmetric,
        })
    }

    /// Overrides the power-law exponent.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when `alpha` lies outside
    /// [`Self::ALPHA`].
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self, GeneratorError> {
        self.alpha = check_range("alpha", alpha, Self::ALPHA)?;
        Ok(self)
    }

    /// Overrides the power-law multiplier.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when `beta` lies outside
    /// [`Self::BETA`].
    pub fn with_beta(mut self, beta: f64) -> Result<Self, GeneratorError> {
        self.beta = check_range("beta", beta, Self::BETA)?;
        Ok(self)
    }

    /// Draws a random valid configuration with default `alpha` and `beta`.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let symmetric = rng.gen_bool(0.5);
        let nodes = rng.gen_range(2..=Self::SAMPLE_MAX_NODES);
        let edges = rng.gen_range(1..=max_edges(nodes, EdgePolicy::new(symmetric, false)));
        Self {
            nodes,
            edges,
            alpha: Self::DEFAULT_ALPHA,
            beta: Self::DEFAULT_BETA,
            symmetric,
        }
    }

    /// Returns the requested edge count.
    #[must_use]
    pub fn edges(&self) -> usize {
        self.edges
    }

    fn draw_budgets<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        (0..self.nodes)
            .map(|_| {
                let rank = rng.gen_range(1..=self.nodes) as f64;
                (self.beta * rank.powf(-self.alpha)).round() as usize
            })
            .collect()
    }

    fn admissible<N, E>(&self, graph: &Graph<N, E>, budgets: &[usize], s: usize, t: usize) -> bool {
        s != t
            && budgets[s] > 0
            && (!self.symmetric || budgets[t] > 0)
            && !graph.are_neighbours(s, t)
    }

    /// Picks uniformly among the pairs a blind draw would accept.
    fn pick_admissible<N, E, R>(
        &self,
        graph: &Graph<N, E>,
        budgets: &[usize],
        rng: &mut R,
    ) -> Option<(usize, usize)>
    where
        R: Rng + ?Sized,
    {
        let pairs: Vec<(usize, usize)> = (0..self.nodes)
            .filter(|&s| budgets[s] > 0)
            .flat_map(|s| (0..self.nodes).map(move |t| (s, t)))
            .filter(|&(s, t)| self.admissible(graph, budgets, s, t))
            .collect();
        if pairs.is_empty() {
            return None;
        }
        pairs.get(rng.gen_range(0..pairs.len())).copied()
    }

    fn stop_early(&self, produced: usize, reason: &str) -> GenerationOutcome {
        warn!(
            requested = self.edges,
            produced, reason, "PLOD stopped before reaching the requested edge count"
        );
        GenerationOutcome::Partial {
            requested: self.edges,
            produced,
        }
    }
}

impl GraphGenerator for PowerLawOutDegree {
    fn name(&self) -> &'static str {
        "plod"
    }

    fn policy(&self) -> EdgePolicy {
        EdgePolicy::new(self.symmetric, false)
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
        let mut budgets = self.draw_budgets(rng);
        let mut remaining: usize = budgets.iter().sum();
        let per_edge = if self.symmetric { 2 } else { 1 };
        let stall_limit = STALL_DRAWS_PER_NODE.saturating_mul(self.nodes);
        debug!(budget = remaining, "PLOD degree budgets drawn");

        let mut rejected_total = 0_u64;
        for placed in 0..self.edges {
            if remaining < per_edge {
                record_rejected_draws(rejected_total);
                return Ok(self.stop_early(placed, "degree budget exhausted"));
            }
            let mut stalled = 0;
            let pair = loop {
                let s = rng.gen_range(0..self.nodes);
                let t = rng.gen_range(0..self.nodes);
                if self.admissible(graph, &budgets, s, t) {
                    break Some((s, t));
                }
                rejected_total += 1;
                stalled += 1;
                if stalled >= stall_limit {
                    break self.pick_admissible(graph, &budgets, rng);
                }
            };
            let Some((s, t)) = pair else {
                record_rejected_draws(rejected_total);
                return Ok(self.stop_early(placed, "no admissible pair remains"));
            };
            graph.add_edge(s, t)?;
            budgets[s] -= 1;
            if self.symmetric {
                graph.add_edge(t, s)?;
                budgets[t] -= 1;
            }
            remaining -= per_edge;
        }
        record_rejected_draws(rejected_total);
        Ok(GenerationOutcome::Complete)
    }
}

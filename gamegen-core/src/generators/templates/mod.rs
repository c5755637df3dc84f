//! Deterministic structural templates.
//!
//! Templates ignore the random source; the same parameters always produce
//! the same graph with the same adjacency order. Every template is
//! symmetric and, apart from a complete graph with self-loops enabled,
//! free of self-loops.

mod grid;
mod rings;
mod tree;

use rand::Rng;

use super::{GenerationOutcome, GeneratorError, GraphGenerator, MAX_NODES, check_range, link};
use crate::graph::{EdgePolicy, Graph};

pub use self::{grid::NDimensionalGrid, rings::RingOfRings, tree::NAryTree};

/// Node-count ceiling used by the `sample` constructors of node-count
/// driven templates.
const SAMPLE_MAX_NODES: usize = 20;

/// Every ordered pair of nodes, optionally with self-loops.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompleteGraph {
    nodes: usize,
    self_loops: bool,
}

impl CompleteGraph {
    /// Validates a complete graph on `nodes` nodes without self-loops.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when `nodes` lies outside
    /// `1..=`[`MAX_NODES`](crate::MAX_NODES).
    pub fn new(nodes: usize) -> Result<Self, GeneratorError> {
        check_range("nodes", nodes, 1..=MAX_NODES)?;
        Ok(Self {
            nodes,
            self_loops: false,
        })
    }

    /// Enables or disables self-loops.
    #[must_use]
    pub fn with_self_loops(mut self, self_loops: bool) -> Self {
        self.self_loops = self_loops;
        self
    }

    /// Draws a random valid configuration.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            self_loops: rng.gen_bool(0.5),
            nodes: rng.gen_range(1..=SAMPLE_MAX_NODES),
        }
    }
}

impl GraphGenerator for CompleteGraph {
    fn name(&self) -> &'static str {
        "complete"
    }

    fn policy(&self) -> EdgePolicy {
        EdgePolicy::new(true, self.self_loops)
    }

    fn node_count(&self) -> usize {
        self.nodes
    }

    fn populate<N, E, R>(
        &self,
        graph: &mut Graph<N, E>,
        _rng: &mut R,
    ) -> Result<GenerationOutcome, GeneratorError>
    where
        R: Rng + ?Sized,
    {
        for a in 0..self.nodes {
            for b in 0..self.nodes {
                if a != b || self.self_loops {
                    graph.add_edge(a, b)?;
                }
            }
        }
        Ok(GenerationOutcome::Complete)
    }
}

/// Hub node 0 linked in both directions to every other node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StarGraph {
    nodes: usize,
}

impl StarGraph {
    /// Validates a star on `nodes` nodes, hub included.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when `nodes` lies outside
    /// `1..=`[`MAX_NODES`](crate::MAX_NODES).
    pub fn new(nodes: usize) -> Result<Self, GeneratorError> {
        check_range("nodes", nodes, 1..=MAX_NODES)?;
        Ok(Self { nodes })
    }

    /// Draws a random valid configuration.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            nodes: rng.gen_range(1..=SAMPLE_MAX_NODES),
        }
    }
}

impl GraphGenerator for StarGraph {
    fn name(&self) -> &'static str {
        "star"
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
        _rng: &mut R,
    ) -> Result<GenerationOutcome, GeneratorError>
    where
        R: Rng + ?Sized,
    {
        for spoke in 1..self.nodes {
            link(graph, 0, spoke)?;
        }
        Ok(GenerationOutcome::Complete)
    }
}

/// Two parallel lanes: node `i` links to `i ± 2`, and each even node is
/// joined to the following odd node by a rung.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoadGraph {
    nodes: usize,
}

impl RoadGraph {
    /// Validates a road on `nodes` nodes.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when `nodes` lies outside
    /// `1..=`[`MAX_NODES`](crate::MAX_NODES).
    pub fn new(nodes: usize) -> Result<Self, GeneratorError> {
        check_range("nodes", nodes, 1..=MAX_NODES)?;
        Ok(Self { nodes })
    }

    /// Draws a random valid configuration.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            nodes: rng.gen_range(1..=SAMPLE_MAX_NODES),
        }
    }
}

impl GraphGenerator for RoadGraph {
    fn name(&self) -> &'static str {
        "road"
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
        _rng: &mut R,
    ) -> Result<GenerationOutcome, GeneratorError>
    where
        R: Rng + ?Sized,
    {
        for node in 0..self.nodes {
            if node >= 2 {
                graph.add_edge(node, node - 2)?;
            }
            if node + 2 < self.nodes {
                graph.add_edge(node, node + 2)?;
            }
            if node % 2 == 0 {
                if node + 1 < self.nodes {
                    graph.add_edge(node, node + 1)?;
                }
            } else {
                graph.add_edge(node, node - 1)?;
            }
        }
        Ok(GenerationOutcome::Complete)
    }
}

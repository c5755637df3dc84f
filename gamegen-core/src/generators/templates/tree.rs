//! Complete N-ary trees.

use rand::Rng;

use super::{GenerationOutcome, GeneratorError, GraphGenerator, check_range, link};
use crate::graph::{EdgePolicy, Graph};

/// Complete tree where every internal node has `branching` children and
/// the tree spans `depth` levels.
///
/// Nodes are numbered breadth-first: the parent of node `c > 0` is
/// `(c - 1) / branching`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NAryTree {
    branching: usize,
    depth: usize,
    nodes: usize,
}

impl NAryTree {
    /// Accepted range for the branching factor.
    pub const BRANCHING: std::ops::RangeInclusive<usize> = 1..=5;
    /// Accepted range for the depth.
    pub const DEPTH: std::ops::RangeInclusive<usize> = 1..=8;

    /// Validates a tree shape.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when either value lies
    /// outside its declared range.
    ///
    /// # Examples
    /// ```
    /// use gamegen_core::{GraphGenerator, NAryTree};
    ///
    /// assert_eq!(NAryTree::new(2, 3)?.node_count(), 7);
    /// assert_eq!(NAryTree::new(3, 1)?.node_count(), 1);
    /// # Ok::<(), gamegen_core::GeneratorError>(())
    /// ```
    pub fn new(branching: usize, depth: usize) -> Result<Self, GeneratorError> {
        check_range("n", branching, Self::BRANCHING)?;
        check_range("depth", depth, Self::DEPTH)?;
        let nodes = (0..depth).map(|level| branching.pow(level as u32)).sum();
        Ok(Self {
            branching,
            depth,
            nodes,
        })
    }

    /// Draws a random configuration with branching at most 3 and depth at
    /// most 4.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let branching = rng.gen_range(1..=3);
        let depth = rng.gen_range(1..=4);
        Self {
            branching,
            depth,
            nodes: (0..depth).map(|level| branching.pow(level as u32)).sum(),
        }
    }

    /// Returns the depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl GraphGenerator for NAryTree {
    fn name(&self) -> &'static str {
        "tree"
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
        for child in 1..self.nodes {
            link(graph, (child - 1) / self.branching, child)?;
        }
        Ok(GenerationOutcome::Complete)
    }
}

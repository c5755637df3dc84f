//! Structural invariant checks for generated graphs.
//!
//! Generators declare an [`EdgePolicy`]; these checks confirm that the edge
//! set they produced honours it so property tests can assert the promise
//! without reimplementing traversal logic.

use thiserror::Error;
use tracing::{debug, trace};

use super::{EdgePolicy, Graph};

/// Enumerates the structural invariants a graph can be checked against.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphInvariant {
    /// Every edge has a matching reverse edge.
    Symmetry,
    /// No node links to itself.
    NoSelfLoops,
}

impl GraphInvariant {
    /// Returns all invariants in evaluation order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::Symmetry, Self::NoSelfLoops]
    }

    /// Returns the invariants promised by `policy`.
    #[must_use]
    pub fn required_by(policy: EdgePolicy) -> Vec<Self> {
        let mut required = Vec::with_capacity(2);
        if policy.symmetric {
            required.push(Self::Symmetry);
        }
        if !policy.reflexive {
            required.push(Self::NoSelfLoops);
        }
        required
    }
}

/// Reports an invariant violation found in a graph.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum InvariantViolation {
    /// A directed edge has no counterpart.
    #[error("edge {origin}->{target} is missing the reverse edge")]
    MissingReverse {
        /// Node exposing the one-way edge.
        origin: usize,
        /// Node lacking the reverse edge.
        target: usize,
    },
    /// A node links to itself.
    #[error("node {node} has a self-loop")]
    SelfLoop {
        /// Node carrying the loop.
        node: usize,
    },
}

enum EvaluationMode<'a> {
    FailFast,
    Collect(&'a mut Vec<InvariantViolation>),
}

impl EvaluationMode<'_> {
    fn record(&mut self, violation: InvariantViolation) -> Result<(), InvariantViolation> {
        match self {
            Self::FailFast => Err(violation),
            Self::Collect(sink) => {
                sink.push(violation);
                Ok(())
            }
        }
    }
}

impl<N, E> Graph<N, E> {
    /// Checks every invariant promised by the graph's declared policy,
    /// returning the first violation encountered.
    ///
    /// # Errors
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_policy(&self) -> Result<(), InvariantViolation> {
        self.check_many(GraphInvariant::required_by(self.policy()))
    }

    /// Runs a single invariant.
    ///
    /// # Errors
    /// Returns the first [`InvariantViolation`] found.
    pub fn check(&self, invariant: GraphInvariant) -> Result<(), InvariantViolation> {
        self.check_many([invariant])
    }

    /// Runs the selected invariants in order, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_many(
        &self,
        invariants: impl IntoIterator<Item = GraphInvariant>,
    ) -> Result<(), InvariantViolation> {
        let mut mode = EvaluationMode::FailFast;
        for invariant in invariants {
            self.dispatch(invariant, &mut mode)?;
        }
        Ok(())
    }

    /// Runs the invariants promised by the declared policy and returns every
    /// violation discovered.
    #[must_use]
    pub fn collect_policy_violations(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();
        let mut mode = EvaluationMode::Collect(&mut violations);
        for invariant in GraphInvariant::required_by(self.policy()) {
            if self.dispatch(invariant, &mut mode).is_err() {
                break;
            }
        }
        violations
    }

    fn dispatch(
        &self,
        invariant: GraphInvariant,
        mode: &mut EvaluationMode<'_>,
    ) -> Result<(), InvariantViolation> {
        trace!(?invariant, edges = self.edge_count(), "checking graph invariant");
        match invariant {
            GraphInvariant::Symmetry => self.check_symmetry(mode),
            GraphInvariant::NoSelfLoops => self.check_self_loops(mode),
        }
    }

    fn check_symmetry(&self, mode: &mut EvaluationMode<'_>) -> Result<(), InvariantViolation> {
        for edge in self.edges() {
            let (origin, target) = edge.endpoints();
            if !self.are_neighbours(target, origin) {
                debug!(origin, target, "missing reverse edge");
                mode.record(InvariantViolation::MissingReverse { origin, target })?;
            }
        }
        Ok(())
    }

    fn check_self_loops(&self, mode: &mut EvaluationMode<'_>) -> Result<(), InvariantViolation> {
        for node in 0..self.node_count() {
            if self.are_neighbours(node, node) {
                debug!(node, "self-loop");
                mode.record(InvariantViolation::SelfLoop { node })?;
            }
        }
        Ok(())
    }
}

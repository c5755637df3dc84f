//! Graph generation algorithms.
//!
//! Every generator is a validated parameter object: construction checks the
//! declared ranges, so an instance that exists is guaranteed to be runnable.
//! Generation then populates a fresh graph with `node_count()` nodes and
//! records the declared [`EdgePolicy`] on it. Randomness is always supplied
//! by the caller.

mod error;
mod plod;
mod preferential;
mod registry;
mod small_world;
mod templates;
mod uniform;

#[cfg(test)]
mod tests;

use rand::Rng;
use tracing::{Span, debug, instrument};

use crate::graph::{EdgePolicy, Graph};

pub(crate) use self::error::check_range;
pub use self::{
    error::{GeneratorError, GeneratorErrorCode},
    plod::PowerLawOutDegree,
    preferential::PreferentialAttachment,
    registry::Topology,
    small_world::SmallWorld,
    templates::{CompleteGraph, NAryTree, NDimensionalGrid, RingOfRings, RoadGraph, StarGraph},
    uniform::{UniformRandom, max_edges},
};

/// Largest node count any generator accepts.
pub const MAX_NODES: usize = 1 << 20;

/// How a generation run ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GenerationOutcome {
    /// The generator produced everything it was asked for.
    Complete,
    /// The generator stopped early with a smaller but otherwise valid graph.
    Partial {
        /// Edges requested, counted the way the generator counts them.
        requested: usize,
        /// Edges actually produced, counted the same way.
        produced: usize,
    },
}

impl GenerationOutcome {
    /// Returns whether the run produced everything requested.
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Result of a generation run.
#[derive(Clone, Debug)]
pub struct Generated<N = (), E = ()> {
    /// The populated graph, carrying the generator's edge policy.
    pub graph: Graph<N, E>,
    /// Whether the run completed or stopped early.
    pub outcome: GenerationOutcome,
}

/// A graph-generation algorithm bound to validated parameters.
pub trait GraphGenerator {
    /// Returns the model's registry name.
    fn name(&self) -> &'static str;

    /// Returns the structural promises the generated edges honour.
    fn policy(&self) -> EdgePolicy;

    /// Returns the number of nodes the generated graph holds.
    fn node_count(&self) -> usize;

    /// Adds the model's edges to `graph`.
    ///
    /// `graph` must hold exactly [`Self::node_count`] nodes and no edges.
    ///
    /// # Errors
    /// Returns [`GeneratorError::Graph`] if the graph rejects a mutation,
    /// which only happens when the precondition above is broken.
    fn populate<N, E, R>(
        &self,
        graph: &mut Graph<N, E>,
        rng: &mut R,
    ) -> Result<GenerationOutcome, GeneratorError>
    where
        R: Rng + ?Sized;

    /// Builds a fresh graph and populates it.
    ///
    /// # Errors
    /// Propagates failures from [`Self::populate`].
    ///
    /// # Examples
    /// ```
    /// use gamegen_core::{GraphGenerator, StarGraph};
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let mut rng = SmallRng::seed_from_u64(7);
    /// let generated = StarGraph::new(5)?.generate::<(), (), _>(&mut rng)?;
    /// assert_eq!(generated.graph.edge_count(), 8);
    /// assert!(generated.outcome.is_complete());
    /// # Ok::<(), gamegen_core::GeneratorError>(())
    /// ```
    #[instrument(
        name = "generator.generate",
        err,
        skip(self, rng),
        fields(model = self.name(), nodes = self.node_count(), edges),
    )]
    fn generate<N, E, R>(&self, rng: &mut R) -> Result<Generated<N, E>, GeneratorError>
    where
        R: Rng + ?Sized,
    {
        let mut graph = Graph::with_nodes(self.node_count()).with_policy(self.policy());
        let outcome = self.populate(&mut graph, rng)?;
        let edges = graph.edge_count();
        Span::current().record("edges", edges);
        record_generated_edges(edges);
        debug!(edges, ?outcome, "graph generated");
        Ok(Generated { graph, outcome })
    }
}

/// Adds `a -> b` and `b -> a`, returning whether `a -> b` was new.
pub(crate) fn link<N, E>(graph: &mut Graph<N, E>, a: usize, b: usize) -> Result<bool, GeneratorError> {
    let added = graph.add_edge(a, b)?;
    graph.add_edge(b, a)?;
    Ok(added)
}

/// Removes `a -> b` and `b -> a`.
pub(crate) fn unlink<N, E>(graph: &mut Graph<N, E>, a: usize, b: usize) -> Result<(), GeneratorError> {
    graph.remove_edge(a, b)?;
    graph.remove_edge(b, a)?;
    Ok(())
}

#[cfg(feature = "metrics")]
pub(crate) fn record_rejected_draws(count: u64) {
    metrics::counter!("gamegen_rejected_draws").increment(count);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_rejected_draws(_count: u64) {}

#[cfg(feature = "metrics")]
fn record_generated_edges(count: usize) {
    metrics::counter!("gamegen_generated_edges").increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_generated_edges(_count: usize) {}

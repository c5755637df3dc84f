//! Compile-time registry of graph models.

use rand::{Rng, RngCore};

use super::{
    CompleteGraph, GenerationOutcome, GeneratorError, GraphGenerator, NAryTree, NDimensionalGrid,
    PowerLawOutDegree, PreferentialAttachment, RingOfRings, RoadGraph, SmallWorld, StarGraph,
    UniformRandom,
};
use crate::graph::{EdgePolicy, Graph};

type Factory = fn(&mut dyn RngCore) -> Topology;

/// Registry names paired with factories that draw a random valid
/// configuration of the model.
const MODELS: &[(&str, Factory)] = &[
    ("uniform", |rng| Topology::Uniform(UniformRandom::sample(rng))),
    ("preferential", |rng| {
        Topology::Preferential(PreferentialAttachment::sample(rng))
    }),
    ("plod", |rng| Topology::Plod(PowerLawOutDegree::sample(rng))),
    ("small-world", |rng| Topology::SmallWorld(SmallWorld::sample(rng))),
    ("complete", |rng| Topology::Complete(CompleteGraph::sample(rng))),
    ("star", |rng| Topology::Star(StarGraph::sample(rng))),
    ("ring-of-rings", |rng| {
        Topology::RingOfRings(RingOfRings::sample(rng))
    }),
    ("road", |rng| Topology::Road(RoadGraph::sample(rng))),
    ("tree", |rng| Topology::Tree(NAryTree::sample(rng))),
    ("grid", |rng| Topology::Grid(NDimensionalGrid::sample(rng))),
    ("wrapped-grid", |rng| {
        Topology::Grid(NDimensionalGrid::sample(rng).with_wrap(true))
    }),
];

/// Every known graph model with its validated parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Topology {
    /// Uniform G(n, m).
    Uniform(UniformRandom),
    /// Barabási–Albert preferential attachment.
    Preferential(PreferentialAttachment),
    /// Power-law out-degree.
    Plod(PowerLawOutDegree),
    /// Watts–Strogatz small world.
    SmallWorld(SmallWorld),
    /// Complete graph.
    Complete(CompleteGraph),
    /// Star around node 0.
    Star(StarGraph),
    /// Ring of rings.
    RingOfRings(RingOfRings),
    /// Two-lane road.
    Road(RoadGraph),
    /// Complete N-ary tree.
    Tree(NAryTree),
    /// N-dimensional grid, wrapped or not.
    Grid(NDimensionalGrid),
}

macro_rules! dispatch {
    ($topology:expr, $model:ident => $body:expr) => {
        match $topology {
            Topology::Uniform($model) => $body,
            Topology::Preferential($model) => $body,
            Topology::Plod($model) => $body,
            Topology::SmallWorld($model) => $body,
            Topology::Complete($model) => $body,
            Topology::Star($model) => $body,
            Topology::RingOfRings($model) => $body,
            Topology::Road($model) => $body,
            Topology::Tree($model) => $body,
            Topology::Grid($model) => $body,
        }
    };
}

impl Topology {
    /// Draws a random valid configuration of the model registered as
    /// `name`.
    ///
    /// # Errors
    /// Returns [`GeneratorError::UnknownModel`] when no model has that name.
    ///
    /// # Examples
    /// ```
    /// use gamegen_core::{GraphGenerator, Topology};
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let mut rng = SmallRng::seed_from_u64(3);
    /// let topology = Topology::from_name("star", &mut rng)?;
    /// assert_eq!(topology.name(), "star");
    /// assert!(Topology::from_name("hypercube", &mut rng).is_err());
    /// # Ok::<(), gamegen_core::GeneratorError>(())
    /// ```
    pub fn from_name(name: &str, rng: &mut dyn RngCore) -> Result<Self, GeneratorError> {
        MODELS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, factory)| factory(rng))
            .ok_or_else(|| GeneratorError::UnknownModel {
                name: name.to_owned(),
            })
    }

    /// Lists every registered model name.
    pub fn names() -> impl Iterator<Item = &'static str> {
        MODELS.iter().map(|(name, _)| *name)
    }
}

impl GraphGenerator for Topology {
    fn name(&self) -> &'static str {
        dispatch!(self, model => model.name())
    }

    fn policy(&self) -> EdgePolicy {
        dispatch!(self, model => model.policy())
    }

    fn node_count(&self) -> usize {
        dispatch!(self, model => model.node_count())
    }

    fn populate<N, E, R>(
        &self,
        graph: &mut Graph<N, E>,
        rng: &mut R,
    ) -> Result<GenerationOutcome, GeneratorError>
    where
        R: Rng + ?Sized,
    {
        dispatch!(self, model => model.populate(graph, rng))
    }
}

macro_rules! impl_from_model {
    ($($model:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$model> for Topology {
                fn from(model: $model) -> Self {
                    Self::$variant(model)
                }
            }
        )+
    };
}

impl_from_model! {
    UniformRandom => Uniform,
    PreferentialAttachment => Preferential,
    PowerLawOutDegree => Plod,
    SmallWorld => SmallWorld,
    CompleteGraph => Complete,
    StarGraph => Star,
    RingOfRings => RingOfRings,
    RoadGraph => Road,
    NAryTree => Tree,
    NDimensionalGrid => Grid,
}

//! Gamegen core library.
//!
//! Building blocks for synthetic multi-player games: action-profile
//! enumeration, dense payoff tensors, payload-carrying graphs, topology
//! generators and the rules that compose graph payloads into payoffs.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod corpus;
mod error;
pub mod generators;
mod graph;
mod payoff;
mod profile;
pub mod rng;
mod tensor;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{
        GraphError, GraphErrorCode, ProfileError, ProfileErrorCode, TensorError, TensorErrorCode,
    },
    generators::{
        CompleteGraph, GenerationOutcome, Generated, GeneratorError, GeneratorErrorCode,
        GraphGenerator, MAX_NODES, NAryTree, NDimensionalGrid, PowerLawOutDegree,
        PreferentialAttachment, RingOfRings, RoadGraph, SmallWorld, StarGraph, Topology,
        UniformRandom, max_edges,
    },
    graph::{Arity, Edge, EdgePolicy, Graph, GraphInvariant, InvariantViolation},
    payoff::{Effect, GraphicalPayoffs, LocalEffectPayoffs, PayoffError, PayoffErrorCode},
    profile::{ActionProfile, Profiles},
    tensor::Tensor,
};

//! Errors raised while composing payoffs over a graph.

use thiserror::Error;

use crate::{
    error::{GraphError, ProfileError, TensorError, define_error_codes},
    graph::{EdgePolicy, InvariantViolation},
};

/// An error produced while configuring or evaluating a payoff composer.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PayoffError {
    /// The graph has a different number of nodes than there are players.
    #[error("graph has {nodes} nodes but the game has {players} players")]
    PlayerCountMismatch {
        /// Players declared by the game.
        players: usize,
        /// Nodes present in the graph.
        nodes: usize,
    },
    /// A payoff tensor did not match the shape its position requires.
    #[error("payoff tensor has shape {got:?} but {expected:?} is required")]
    ShapeMismatch {
        /// Shape implied by the player's action count and neighbourhood.
        expected: Vec<usize>,
        /// Shape of the supplied tensor.
        got: Vec<usize>,
    },
    /// A player index was outside the game.
    #[error("player {player} does not exist in a game with {player_count} players")]
    UnknownPlayer {
        /// Requested player.
        player: usize,
        /// Number of players in the game.
        player_count: usize,
    },
    /// Random edge payoffs were requested for a graph lacking a reverse edge.
    #[error("edge {origin}->{target} has no reverse edge")]
    MissingReverse {
        /// Source of the one-way edge.
        origin: usize,
        /// Destination of the one-way edge.
        target: usize,
    },
    /// A sampling range was empty or not finite.
    #[error("payoff range {low}..={high} is empty or not finite")]
    EmptyRange {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
    /// The graph's declared edge policy allows more than the composer
    /// supports.
    #[error("graph declares {declared:?} but the payoffs require {required:?}")]
    PolicyMismatch {
        /// Strictest policy the composer accepts.
        required: EdgePolicy,
        /// Policy the graph declares.
        declared: EdgePolicy,
    },
    /// The graph's edges break its own declared policy.
    #[error(transparent)]
    PolicyViolation {
        /// First violation found.
        #[from]
        source: InvariantViolation,
    },
    /// The supplied action profile was invalid.
    #[error(transparent)]
    Profile {
        /// Profile validation failure.
        #[from]
        source: ProfileError,
    },
    /// A payoff tensor rejected an index or shape.
    #[error(transparent)]
    Tensor {
        /// Tensor failure.
        #[from]
        source: TensorError,
    },
    /// The graph rejected a payload.
    #[error(transparent)]
    Graph {
        /// Graph failure.
        #[from]
        source: GraphError,
    },
}

define_error_codes! {
    /// Stable codes describing [`PayoffError`] variants.
    enum PayoffErrorCode for PayoffError {
        /// Node count and player count differ.
        PlayerCountMismatch => PlayerCountMismatch { .. } => "PAYOFF_PLAYER_COUNT_MISMATCH",
        /// A tensor had the wrong shape.
        ShapeMismatch => ShapeMismatch { .. } => "PAYOFF_SHAPE_MISMATCH",
        /// A player index was out of range.
        UnknownPlayer => UnknownPlayer { .. } => "PAYOFF_UNKNOWN_PLAYER",
        /// A reverse edge was missing.
        MissingReverse => MissingReverse { .. } => "PAYOFF_MISSING_REVERSE",
        /// A sampling range was unusable.
        EmptyRange => EmptyRange { .. } => "PAYOFF_EMPTY_RANGE",
        /// The declared edge policy was too loose.
        PolicyMismatch => PolicyMismatch { .. } => "PAYOFF_POLICY_MISMATCH",
        /// An edge broke the declared policy.
        PolicyViolation => PolicyViolation { .. } => "PAYOFF_POLICY_VIOLATION",
        /// The action profile was invalid.
        Profile => Profile { .. } => "PAYOFF_PROFILE",
        /// A tensor operation failed.
        Tensor => Tensor { .. } => "PAYOFF_TENSOR",
        /// A graph operation failed.
        Graph => Graph { .. } => "PAYOFF_GRAPH",
    }
}

pub(super) fn check_range(range: &std::ops::RangeInclusive<f64>) -> Result<(), PayoffError> {
    let (low, high) = (*range.start(), *range.end());
    if low.is_finite() && high.is_finite() && low <= high {
        Ok(())
    } else {
        Err(PayoffError::EmptyRange { low, high })
    }
}

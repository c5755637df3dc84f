//! Error types for the gamegen core library.
//!
//! Defines the enumeration, tensor, and graph error enums exposed by the
//! public API together with the macro that attaches stable error codes to
//! every error enum in the crate.

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl ::std::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// An error produced while building or advancing an [`crate::ActionProfile`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ProfileError {
    /// The profile was created without any players.
    #[error("an action profile requires at least one player")]
    NoPlayers,
    /// A player was given an empty action set.
    #[error("player {player} must have at least one action")]
    ZeroActions {
        /// Player whose action count was zero.
        player: usize,
    },
    /// A supplied action vector did not cover every player.
    #[error("expected actions for {expected} players but got {got}")]
    LengthMismatch {
        /// Number of players in the profile.
        expected: usize,
        /// Length of the supplied vector.
        got: usize,
    },
    /// A supplied action lay outside `[1, count]`.
    #[error("action {action} for player {player} is outside 1..={count}")]
    ActionOutOfRange {
        /// Player whose action was invalid.
        player: usize,
        /// Offending one-based action.
        action: usize,
        /// Number of actions available to the player.
        count: usize,
    },
    /// The cursor was advanced after every profile had been visited.
    #[error("no more action profiles remain")]
    Exhausted,
    /// The number of profiles does not fit in `usize`.
    #[error("the number of action profiles overflows usize")]
    Overflow,
}

define_error_codes! {
    /// Stable codes describing [`ProfileError`] variants.
    enum ProfileErrorCode for ProfileError {
        /// The profile was created without any players.
        NoPlayers => NoPlayers => "PROFILE_NO_PLAYERS",
        /// A player was given an empty action set.
        ZeroActions => ZeroActions { .. } => "PROFILE_ZERO_ACTIONS",
        /// A supplied action vector did not cover every player.
        LengthMismatch => LengthMismatch { .. } => "PROFILE_LENGTH_MISMATCH",
        /// A supplied action lay outside its range.
        ActionOutOfRange => ActionOutOfRange { .. } => "PROFILE_ACTION_OUT_OF_RANGE",
        /// The cursor was advanced past the final profile.
        Exhausted => Exhausted => "PROFILE_EXHAUSTED",
        /// The profile count overflowed.
        Overflow => Overflow => "PROFILE_OVERFLOW",
    }
}

/// An error produced by [`crate::Tensor`] construction or indexing.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TensorError {
    /// The shape contained no dimensions.
    #[error("tensor shape must have at least one dimension")]
    EmptyShape,
    /// A dimension was declared with size zero.
    #[error("tensor dimension {axis} has size zero")]
    ZeroDimension {
        /// Axis whose size was zero.
        axis: usize,
    },
    /// The shape describes more cells than fit in memory addressing.
    #[error("tensor shape overflows usize")]
    Overflow,
    /// An index vector had the wrong number of components.
    #[error("index has {got} components but the tensor has rank {expected}")]
    RankMismatch {
        /// Rank of the tensor.
        expected: usize,
        /// Length of the supplied index vector.
        got: usize,
    },
    /// An index component lay outside `[1, size]`.
    #[error("index {index} on axis {axis} is outside 1..={size}")]
    IndexOutOfRange {
        /// Axis holding the invalid component.
        axis: usize,
        /// Offending one-based index.
        index: usize,
        /// Declared size of the axis.
        size: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`TensorError`] variants.
    enum TensorErrorCode for TensorError {
        /// The shape contained no dimensions.
        EmptyShape => EmptyShape => "TENSOR_EMPTY_SHAPE",
        /// A dimension was declared with size zero.
        ZeroDimension => ZeroDimension { .. } => "TENSOR_ZERO_DIMENSION",
        /// The shape overflowed.
        Overflow => Overflow => "TENSOR_OVERFLOW",
        /// An index vector had the wrong number of components.
        RankMismatch => RankMismatch { .. } => "TENSOR_RANK_MISMATCH",
        /// An index component lay outside its axis.
        IndexOutOfRange => IndexOutOfRange { .. } => "TENSOR_INDEX_OUT_OF_RANGE",
    }
}

/// An error produced by [`crate::Graph`] mutation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// A node identifier was not present in the graph.
    #[error("node {node} does not exist in a graph with {node_count} nodes")]
    UnknownNode {
        /// Requested node identifier.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// The addressed edge is not present.
    #[error("edge {origin}->{target} does not exist")]
    MissingEdge {
        /// Source node of the missing edge.
        origin: usize,
        /// Destination node of the missing edge.
        target: usize,
    },
    /// Node data declared an arity that disagrees with the node's out-degree.
    #[error("node {node} has {degree} outgoing edge(s) but its payload has arity {arity}")]
    ArityMismatch {
        /// Node receiving the payload.
        node: usize,
        /// Arity declared by the payload.
        arity: usize,
        /// Outgoing edges already attached to the node.
        degree: usize,
    },
    /// An edge mutation touched a node whose payload is already attached.
    #[error("node {node} carries node data and its edge set is frozen")]
    FrozenNode {
        /// Frozen node touched by the mutation.
        node: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A node identifier was not present in the graph.
        UnknownNode => UnknownNode { .. } => "GRAPH_UNKNOWN_NODE",
        /// The addressed edge is not present.
        MissingEdge => MissingEdge { .. } => "GRAPH_MISSING_EDGE",
        /// Node data arity disagreed with the node's out-degree.
        ArityMismatch => ArityMismatch { .. } => "GRAPH_ARITY_MISMATCH",
        /// An edge mutation touched a frozen node.
        FrozenNode => FrozenNode { .. } => "GRAPH_FROZEN_NODE",
    }
}

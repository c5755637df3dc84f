//! Errors raised by graph generators.

use thiserror::Error;

use crate::error::{GraphError, define_error_codes};

/// An error produced while configuring or running a graph generator.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GeneratorError {
    /// A parameter lay outside its declared range or broke a cross-parameter
    /// constraint.
    #[error("invalid {parameter}: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Human-friendly explanation.
        reason: String,
    },
    /// More edges were requested than a simple graph of this shape can hold.
    #[error("{requested} edges requested but at most {max} fit")]
    TooManyEdges {
        /// Requested edge count.
        requested: usize,
        /// Maximum for the node count and edge policy.
        max: usize,
    },
    /// The registry has no model with the requested name.
    #[error("unknown graph model `{name}`")]
    UnknownModel {
        /// Name that failed to resolve.
        name: String,
    },
    /// The underlying graph rejected a mutation.
    #[error(transparent)]
    Graph {
        /// Graph error raised during population.
        #[from]
        source: GraphError,
    },
}

impl GeneratorError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }
}

define_error_codes! {
    /// Stable codes describing [`GeneratorError`] variants.
    enum GeneratorErrorCode for GeneratorError {
        /// A parameter was out of range.
        InvalidParameter => InvalidParameter { .. } => "GENERATOR_INVALID_PARAMETER",
        /// Too many edges were requested.
        TooManyEdges => TooManyEdges { .. } => "GENERATOR_TOO_MANY_EDGES",
        /// The model name did not resolve.
        UnknownModel => UnknownModel { .. } => "GENERATOR_UNKNOWN_MODEL",
        /// The graph rejected a mutation.
        Graph => Graph { .. } => "GENERATOR_GRAPH",
    }
}

/// Ensures `value` lies in `range`, naming `parameter` on failure.
pub(crate) fn check_range<T>(
    parameter: &'static str,
    value: T,
    range: std::ops::RangeInclusive<T>,
) -> Result<T, GeneratorError>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(GeneratorError::invalid(
            parameter,
            format!(
                "{value} is outside {}..={}",
                range.start(),
                range.end()
            ),
        ))
    }
}

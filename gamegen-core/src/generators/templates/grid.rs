//! N-dimensional grids, optionally wrapped into a torus.

use rand::Rng;

use super::{GenerationOutcome, GeneratorError, GraphGenerator, MAX_NODES, check_range, link};
use crate::graph::{EdgePolicy, Graph};

/// Grid of `side^dimensions` nodes where every node links to its ±1
/// neighbour along each axis.
///
/// Node identifiers are mixed-radix coordinates with axis 0 most
/// significant. In the wrapped variant the last coordinate on an axis also
/// links back to the first; a side of 1 adds no self-loop and a side of 2
/// produces no extra edge because the wrap coincides with the step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NDimensionalGrid {
    dimensions: usize,
    side: usize,
    wrapped: bool,
}

impl NDimensionalGrid {
    /// Accepted range for the number of axes.
    pub const DIMENSIONS: std::ops::RangeInclusive<usize> = 1..=10;
    /// Accepted range for the side length.
    pub const SIDE: std::ops::RangeInclusive<usize> = 1..=20;
    /// Ceiling used by [`Self::sample`] for both values.
    pub const SAMPLE_MAX: usize = 4;

    /// Validates an unwrapped grid.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidParameter`] when either value lies
    /// outside its declared range or the grid would exceed
    /// [`MAX_NODES`](crate::MAX_NODES) nodes.
    pub fn new(dimensions: usize, side: usize) -> Result<Self, GeneratorError> {
        check_range("num_dimensions", dimensions, Self::DIMENSIONS)?;
        check_range("dim_size", side, Self::SIDE)?;
        if side
            .checked_pow(dimensions as u32)
            .is_none_or(|nodes| nodes > MAX_NODES)
        {
            return Err(GeneratorError::invalid(
                "dim_size",
                format!("{side}^{dimensions} nodes exceeds {MAX_NODES}"),
            ));
        }
        Ok(Self {
            dimensions,
            side,
            wrapped: false,
        })
    }

    /// Validates a wrapped (toroidal) grid.
    ///
    /// # Errors
    /// Fails exactly as [`Self::new`] does.
    pub fn wrapped(dimensions: usize, side: usize) -> Result<Self, GeneratorError> {
        Ok(Self::new(dimensions, side)?.with_wrap(true))
    }

    /// Enables or disables wrap-around.
    #[must_use]
    pub fn with_wrap(mut self, wrapped: bool) -> Self {
        self.wrapped = wrapped;
        self
    }

    /// Draws a random unwrapped configuration with at most
    /// [`Self::SAMPLE_MAX`] axes of at most [`Self::SAMPLE_MAX`] nodes.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            dimensions: rng.gen_range(1..=Self::SAMPLE_MAX),
            side: rng.gen_range(1..=Self::SAMPLE_MAX),
            wrapped: false,
        }
    }

    /// Returns whether the grid wraps around.
    #[must_use]
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Returns the identifier of the node at `coordinates`.
    ///
    /// Returns `None` when the slice has the wrong length or a coordinate is
    /// outside `0..side`.
    #[must_use]
    pub fn node_at(&self, coordinates: &[usize]) -> Option<usize> {
        if coordinates.len() != self.dimensions {
            return None;
        }
        coordinates.iter().try_fold(0, |id, &coordinate| {
            (coordinate < self.side).then_some(id * self.side + coordinate)
        })
    }
}

impl GraphGenerator for NDimensionalGrid {
    fn name(&self) -> &'static str {
        if self.wrapped { "wrapped-grid" } else { "grid" }
    }

    fn policy(&self) -> EdgePolicy {
        EdgePolicy::UNDIRECTED
    }

    fn node_count(&self) -> usize {
        self.side.pow(self.dimensions as u32)
    }

    fn populate<N, E, R>(
        &self,
        graph: &mut Graph<N, E>,
        _rng: &mut R,
    ) -> Result<GenerationOutcome, GeneratorError>
    where
        R: Rng + ?Sized,
    {
        let strides: Vec<usize> = (0..self.dimensions)
            .map(|axis| self.side.pow((self.dimensions - 1 - axis) as u32))
            .collect();
        for node in 0..self.node_count() {
            for &stride in &strides {
                let coordinate = (node / stride) % self.side;
                let neighbour = if coordinate + 1 < self.side {
                    node + stride
                } else if self.wrapped {
                    node - coordinate * stride
                } else {
                    continue;
                };
                if neighbour != node {
                    link(graph, node, neighbour)?;
                }
            }
        }
        Ok(GenerationOutcome::Complete)
    }
}

//! Directed edge with an optional payload slot.

/// Edge `origin -> target` owned by the origin's adjacency list.
///
/// The endpoints are fixed at creation; only the payload may change. The
/// reverse direction is a distinct edge that the graph may or may not hold.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<E = ()> {
    origin: usize,
    target: usize,
    data: Option<E>,
}

impl<E> Edge<E> {
    pub(super) fn new(origin: usize, target: usize, data: Option<E>) -> Self {
        Self {
            origin,
            target,
            data,
        }
    }

    /// Returns the node the edge leaves.
    #[must_use]
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Returns the node the edge enters.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Returns the `(origin, target)` pair.
    #[must_use]
    pub fn endpoints(&self) -> (usize, usize) {
        (self.origin, self.target)
    }

    /// Returns the attached payload.
    #[must_use]
    pub fn data(&self) -> Option<&E> {
        self.data.as_ref()
    }

    /// Returns the attached payload for in-place mutation.
    pub fn data_mut(&mut self) -> Option<&mut E> {
        self.data.as_mut()
    }

    /// Attaches `data`, returning the previous payload.
    pub fn replace_data(&mut self, data: E) -> Option<E> {
        self.data.replace(data)
    }

    /// Detaches and returns the payload.
    pub fn take_data(&mut self) -> Option<E> {
        self.data.take()
    }
}

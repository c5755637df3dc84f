//! Directed topology with optional node and edge payloads.
//!
//! Nodes are dense identifiers starting at zero and are never removed. Each
//! node owns the adjacency list of its outgoing edges, kept in insertion
//! order; payoff composition relies on that order when it lines up node
//! tensor axes with neighbours. Attaching node data freezes the node: from
//! then on no edge touching it may be added or removed.

mod edge;
mod invariants;


pub use self::{
    edge::Edge,
    invariants::{GraphInvariant, InvariantViolation},
};

use crate::{Tensor, error::GraphError};

/// Reports how many axes a node payload spans.
///
/// A node payload with arity `a` may only be attached to a node with exactly
/// `a - 1` outgoing edges. Payloads without a fixed arity return `None` and
/// skip the check.
pub trait Arity {
    /// Returns the declared arity, if any.
    fn arity(&self) -> Option<usize>;
}

impl Arity for () {
    fn arity(&self) -> Option<usize> {
        None
    }
}

impl<T> Arity for Tensor<T> {
    fn arity(&self) -> Option<usize> {
        Some(self.rank())
    }
}

/// Structural promises a generator makes about the edges it produces.
///
/// The graph carries the policy as metadata; [`Graph::check_policy`] verifies
/// that the edge set honours it.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct EdgePolicy {
    /// Every edge `(a, b)` has a matching `(b, a)`.
    pub symmetric: bool,
    /// Self-loops `(a, a)` may appear.
    pub reflexive: bool,
}

impl EdgePolicy {
    /// Policy shared by every undirected topology: symmetric, no self-loops.
    pub const UNDIRECTED: Self = Self {
        symmetric: true,
        reflexive: false,
    };

    /// Policy that promises nothing.
    pub const UNCONSTRAINED: Self = Self {
        symmetric: false,
        reflexive: true,
    };

    /// Builds a policy from its two flags.
    #[must_use]
    pub const fn new(symmetric: bool, reflexive: bool) -> Self {
        Self {
            symmetric,
            reflexive,
        }
    }
}

#[derive(Clone, Debug)]
struct NodeSlot<N, E> {
    edges: Vec<Edge<E>>,
    data: Option<N>,
}

impl<N, E> NodeSlot<N, E> {
    fn new() -> Self {
        Self {
            edges: Vec::new(),
            data: None,
        }
    }

    fn position(&self, target: usize) -> Option<usize> {
        self.edges.iter().position(|edge| edge.target() == target)
    }
}

/// Adjacency-list graph with node payloads `N` and edge payloads `E`.
///
/// # Examples
/// ```
/// use gamegen_core::{EdgePolicy, Graph};
///
/// let mut graph: Graph = Graph::with_nodes(3).with_policy(EdgePolicy::UNDIRECTED);
/// assert!(graph.add_edge(0, 1)?);
/// assert!(graph.add_edge(1, 0)?);
/// assert!(!graph.add_edge(0, 1)?);
/// assert_eq!(graph.edge_count(), 2);
/// assert!(graph.check_policy().is_ok());
/// # Ok::<(), gamegen_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Graph<N = (), E = ()> {
    nodes: Vec<NodeSlot<N, E>>,
    edge_count: usize,
    policy: EdgePolicy,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    /// Creates an empty graph with [`EdgePolicy::UNCONSTRAINED`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edge_count: 0,
            policy: EdgePolicy::UNCONSTRAINED,
        }
    }

    /// Creates a graph holding `node_count` isolated nodes.
    #[must_use]
    pub fn with_nodes(node_count: usize) -> Self {
        let mut graph = Self::new();
        graph.nodes.resize_with(node_count, NodeSlot::new);
        graph
    }

    /// Replaces the declared edge policy.
    #[must_use]
    pub fn with_policy(mut self, policy: EdgePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the declared edge policy.
    #[must_use]
    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    /// Appends an isolated node and returns its identifier.
    pub fn add_node(&mut self) -> usize {
        self.nodes.push(NodeSlot::new());
        self.nodes.len() - 1
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the out-degree of `node`, or zero for an unknown node.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.nodes.get(node).map_or(0, |slot| slot.edges.len())
    }

    /// Adds the edge `origin -> target` without a payload.
    ///
    /// Returns `Ok(false)` when the edge already exists; the existing edge and
    /// its payload are left untouched.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] for an endpoint outside the graph
    /// and [`GraphError::FrozenNode`] when either endpoint carries node data.
    pub fn add_edge(&mut self, origin: usize, target: usize) -> Result<bool, GraphError> {
        self.insert_edge(origin, target, None)
    }

    /// Adds the edge `origin -> target` carrying `data`.
    ///
    /// An existing edge keeps its payload and `data` is dropped.
    ///
    /// # Errors
    /// Fails exactly as [`Self::add_edge`] does.
    pub fn add_edge_with(
        &mut self,
        origin: usize,
        target: usize,
        data: E,
    ) -> Result<bool, GraphError> {
        self.insert_edge(origin, target, Some(data))
    }

    fn insert_edge(
        &mut self,
        origin: usize,
        target: usize,
        data: Option<E>,
    ) -> Result<bool, GraphError> {
        self.ensure_mutable(origin, target)?;
        let slot = &mut self.nodes[origin];
        if slot.position(target).is_some() {
            return Ok(false);
        }
        slot.edges.push(Edge::new(origin, target, data));
        self.edge_count += 1;
        Ok(true)
    }

    /// Removes the edge `origin -> target`, returning whether it existed.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] for an endpoint outside the graph
    /// and [`GraphError::FrozenNode`] when either endpoint carries node data.
    pub fn remove_edge(&mut self, origin: usize, target: usize) -> Result<bool, GraphError> {
        self.ensure_mutable(origin, target)?;
        let slot = &mut self.nodes[origin];
        let Some(position) = slot.position(target) else {
            return Ok(false);
        };
        slot.edges.remove(position);
        self.edge_count -= 1;
        Ok(true)
    }

    /// Replaces the payload of an existing edge, returning the previous one.
    ///
    /// The adjacency order is preserved.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] for an endpoint outside the graph
    /// and [`GraphError::MissingEdge`] when the edge is absent.
    pub fn set_edge_data(
        &mut self,
        origin: usize,
        target: usize,
        data: E,
    ) -> Result<Option<E>, GraphError> {
        self.ensure_node(origin)?;
        self.ensure_node(target)?;
        let edge = self
            .edge_mut(origin, target)
            .ok_or(GraphError::MissingEdge { origin, target })?;
        Ok(edge.replace_data(data))
    }

    /// Returns the edge `origin -> target`, if present.
    #[must_use]
    pub fn edge(&self, origin: usize, target: usize) -> Option<&Edge<E>> {
        let slot = self.nodes.get(origin)?;
        slot.position(target).map(|position| &slot.edges[position])
    }

    /// Returns the edge `origin -> target` for payload mutation.
    pub fn edge_mut(&mut self, origin: usize, target: usize) -> Option<&mut Edge<E>> {
        let slot = self.nodes.get_mut(origin)?;
        let position = slot.position(target)?;
        Some(&mut slot.edges[position])
    }

    /// Returns whether the edge `origin -> target` exists.
    #[must_use]
    pub fn are_neighbours(&self, origin: usize, target: usize) -> bool {
        self.edge(origin, target).is_some()
    }

    /// Returns the outgoing edges of `node` in insertion order.
    ///
    /// Unknown nodes have no edges.
    #[must_use]
    pub fn edges_from(&self, node: usize) -> &[Edge<E>] {
        self.nodes
            .get(node)
            .map(|slot| slot.edges.as_slice())
            .unwrap_or_default()
    }

    /// Iterates over the targets of `node`'s outgoing edges in insertion
    /// order.
    pub fn neighbours(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges_from(node).iter().map(Edge::target)
    }

    /// Iterates over every edge, grouped by origin in node order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> + '_ {
        self.nodes.iter().flat_map(|slot| slot.edges.iter())
    }

    /// Returns the payload attached to `node`.
    #[must_use]
    pub fn node_data(&self, node: usize) -> Option<&N> {
        self.nodes.get(node).and_then(|slot| slot.data.as_ref())
    }

    /// Returns whether `node` carries node data and therefore rejects edge
    /// mutations.
    #[must_use]
    pub fn is_frozen(&self, node: usize) -> bool {
        self.node_data(node).is_some()
    }

    /// Attaches `data` to `node`, freezing its edge set, and returns the
    /// previous payload.
    ///
    /// Add every edge touching the node first: the payload's arity must equal
    /// one plus the node's out-degree at the time of the call.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] for a node outside the graph and
    /// [`GraphError::ArityMismatch`] when the arity disagrees with the
    /// out-degree.
    pub fn set_node_data(&mut self, node: usize, data: N) -> Result<Option<N>, GraphError>
    where
        N: Arity,
    {
        self.ensure_node(node)?;
        let slot = &mut self.nodes[node];
        let degree = slot.edges.len();
        if let Some(arity) = data.arity() {
            if arity != degree + 1 {
                return Err(GraphError::ArityMismatch {
                    node,
                    arity,
                    degree,
                });
            }
        }
        Ok(slot.data.replace(data))
    }

    fn ensure_node(&self, node: usize) -> Result<(), GraphError> {
        if node < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownNode {
                node,
                node_count: self.nodes.len(),
            })
        }
    }

    fn ensure_mutable(&self, origin: usize, target: usize) -> Result<(), GraphError> {
        self.ensure_node(origin)?;
        self.ensure_node(target)?;
        for node in [origin, target] {
            if self.is_frozen(node) {
                return Err(GraphError::FrozenNode { node });
            }
        }
        Ok(())
    }
}

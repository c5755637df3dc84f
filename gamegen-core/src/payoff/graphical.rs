//! Graphical and polymatrix payoffs: nodes are players.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::{debug, instrument};

use super::{PayoffError, ensure_player, ensure_policy, error::check_range, tabulate};
use crate::{ActionProfile, EdgePolicy, Graph, Tensor, profile::check_actions};

/// Payoffs attached to a player graph.
///
/// Node `p` may carry a tensor of shape `[a_p, a_n1, a_n2, ...]` where the
/// trailing axes follow `edges_from(p)`; each edge `p -> q` may carry a
/// `[a_p, a_q]` tensor. A player's payoff is the node lookup plus every edge
/// lookup, and a player with neither contributes 0.
#[derive(Clone, Debug)]
pub struct GraphicalPayoffs {
    graph: Graph<Tensor, Tensor>,
    action_counts: Vec<usize>,
}

impl GraphicalPayoffs {
    /// Players never neighbour themselves; edges may be one-way.
    pub const REQUIRED_POLICY: EdgePolicy = EdgePolicy::new(false, false);

    /// Binds `graph` to a game whose player `p` has `action_counts[p]`
    /// actions.
    ///
    /// # Errors
    /// Returns [`PayoffError::Profile`] when `action_counts` is empty or
    /// contains zero, [`PayoffError::PlayerCountMismatch`] when the graph
    /// does not have one node per player, [`PayoffError::PolicyMismatch`]
    /// when the graph declares self-loops, and
    /// [`PayoffError::PolicyViolation`] when its edges break the declared
    /// policy.
    ///
    /// # Examples
    /// ```
    /// use gamegen_core::{GraphGenerator, GraphicalPayoffs, StarGraph, Tensor};
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let mut rng = SmallRng::seed_from_u64(1);
    /// let star = StarGraph::new(3)?.generate::<Tensor, Tensor, _>(&mut rng)?;
    /// let payoffs = GraphicalPayoffs::new(star.graph, &[2, 2, 2])?;
    /// assert_eq!(payoffs.payoff(&[1, 2, 2], 0)?, 0.0);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(graph: Graph<Tensor, Tensor>, action_counts: &[usize]) -> Result<Self, PayoffError> {
        ActionProfile::new(action_counts)?;
        if graph.node_count() != action_counts.len() {
            return Err(PayoffError::PlayerCountMismatch {
                players: action_counts.len(),
                nodes: graph.node_count(),
            });
        }
        ensure_policy(&graph, Self::REQUIRED_POLICY)?;
        Ok(Self {
            graph,
            action_counts: action_counts.to_vec(),
        })
    }

    /// Returns the underlying graph.
    #[must_use]
    pub fn graph(&self) -> &Graph<Tensor, Tensor> {
        &self.graph
    }

    /// Consumes the composer and returns its graph.
    #[must_use]
    pub fn into_graph(self) -> Graph<Tensor, Tensor> {
        self.graph
    }

    /// Returns the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.action_counts.len()
    }

    /// Returns every player's action count.
    #[must_use]
    pub fn action_counts(&self) -> &[usize] {
        &self.action_counts
    }

    /// Returns the shape a node tensor for `player` must have: its own
    /// action count followed by each neighbour's in `edges_from` order.
    ///
    /// # Errors
    /// Returns [`PayoffError::UnknownPlayer`] for a player outside the game.
    pub fn node_shape(&self, player: usize) -> Result<Vec<usize>, PayoffError> {
        ensure_player(player, self.player_count())?;
        let mut shape = Vec::with_capacity(self.graph.degree(player) + 1);
        shape.push(self.action_counts[player]);
        shape.extend(
            self.graph
                .neighbours(player)
                .map(|neighbour| self.action_counts[neighbour]),
        );
        Ok(shape)
    }

    /// Attaches a node tensor to `player`, freezing its edge set.
    ///
    /// Returns the tensor it replaced, if any.
    ///
    /// # Errors
    /// Returns [`PayoffError::ShapeMismatch`] unless the tensor's shape equals
    /// [`Self::node_shape`].
    pub fn set_node_tensor(
        &mut self,
        player: usize,
        tensor: Tensor,
    ) -> Result<Option<Tensor>, PayoffError> {
        let expected = self.node_shape(player)?;
        ensure_shape(expected, &tensor)?;
        Ok(self.graph.set_node_data(player, tensor)?)
    }

    /// Attaches a `[a_origin, a_target]` tensor to the edge
    /// `origin -> target`.
    ///
    /// # Errors
    /// Returns [`PayoffError::ShapeMismatch`] for a tensor of the wrong shape
    /// and [`PayoffError::Graph`] when the edge does not exist.
    pub fn set_edge_tensor(
        &mut self,
        origin: usize,
        target: usize,
        tensor: Tensor,
    ) -> Result<Option<Tensor>, PayoffError> {
        ensure_player(origin, self.player_count())?;
        ensure_player(target, self.player_count())?;
        let expected = vec![self.action_counts[origin], self.action_counts[target]];
        ensure_shape(expected, &tensor)?;
        Ok(self.graph.set_edge_data(origin, target, tensor)?)
    }

    /// Returns `player`'s payoff when everyone plays `actions`.
    ///
    /// # Errors
    /// Returns [`PayoffError::UnknownPlayer`] for a player outside the game
    /// and [`PayoffError::Profile`] when `actions` is not a valid profile.
    pub fn payoff(&self, actions: &[usize], player: usize) -> Result<f64, PayoffError> {
        ensure_player(player, self.player_count())?;
        check_actions(&self.action_counts, actions)?;
        let own = actions[player];
        let edges = self.graph.edges_from(player);
        let mut total = 0.0;
        if let Some(tensor) = self.graph.node_data(player) {
            let mut index = Vec::with_capacity(edges.len() + 1);
            index.push(own);
            index.extend(edges.iter().map(|edge| actions[edge.target()]));
            total += tensor.get(&index)?;
        }
        for edge in edges {
            if let Some(tensor) = edge.data() {
                total += tensor.get(&[own, actions[edge.target()]])?;
            }
        }
        Ok(total)
    }

    /// Tabulates `player`'s payoff over every action profile.
    ///
    /// # Errors
    /// Propagates [`Self::payoff`] failures and tensor allocation failures.
    #[instrument(name = "payoff.graphical_table", err, skip(self), fields(players = self.player_count()))]
    pub fn payoff_table(&self, player: usize) -> Result<Tensor, PayoffError> {
        ensure_player(player, self.player_count())?;
        tabulate(&self.action_counts, |actions| self.payoff(actions, player))
    }

    /// Attaches a uniformly random node tensor to every player, producing a
    /// random graphical game.
    ///
    /// # Errors
    /// Returns [`PayoffError::EmptyRange`] for an unusable range.
    #[instrument(name = "payoff.fill_node_tensors", err, skip(self, rng))]
    pub fn fill_random_node_tensors<R>(
        &mut self,
        rng: &mut R,
        range: RangeInclusive<f64>,
    ) -> Result<(), PayoffError>
    where
        R: Rng + ?Sized,
    {
        check_range(&range)?;
        for player in 0..self.player_count() {
            let shape = self.node_shape(player)?;
            let tensor = Tensor::from_fn(&shape, |_| rng.gen_range(range.clone()))?;
            self.graph.set_node_data(player, tensor)?;
        }
        debug!(players = self.player_count(), "node tensors attached");
        Ok(())
    }

    /// Attaches a uniformly random tensor to every edge, producing a random
    /// polymatrix game.
    ///
    /// # Errors
    /// Returns [`PayoffError::MissingReverse`] when an edge lacks its reverse,
    /// before any tensor is attached, and [`PayoffError::EmptyRange`] for an
    /// unusable range.
    #[instrument(name = "payoff.fill_edge_tensors", err, skip(self, rng))]
    pub fn fill_random_edge_tensors<R>(
        &mut self,
        rng: &mut R,
        range: RangeInclusive<f64>,
    ) -> Result<(), PayoffError>
    where
        R: Rng + ?Sized,
    {
        check_range(&range)?;
        let endpoints: Vec<(usize, usize)> = self.graph.edges().map(|edge| edge.endpoints()).collect();
        if let Some(&(origin, target)) = endpoints
            .iter()
            .find(|&&(origin, target)| !self.graph.are_neighbours(target, origin))
        {
            return Err(PayoffError::MissingReverse { origin, target });
        }
        for (origin, target) in endpoints {
            let shape = [self.action_counts[origin], self.action_counts[target]];
            let tensor = Tensor::from_fn(&shape, |_| rng.gen_range(range.clone()))?;
            self.graph.set_edge_data(origin, target, tensor)?;
        }
        debug!(edges = self.graph.edge_count(), "edge tensors attached");
        Ok(())
    }
}

fn ensure_shape(expected: Vec<usize>, tensor: &Tensor) -> Result<(), PayoffError> {
    if tensor.shape() == expected.as_slice() {
        Ok(())
    } else {
        Err(PayoffError::ShapeMismatch {
            expected,
            got: tensor.shape().to_vec(),
        })
    }
}

//! Local-effect payoffs: nodes are actions shared by every player.

use std::{fmt, ops::RangeInclusive, sync::Arc};

use rand::Rng;
use tracing::instrument;

use super::{PayoffError, ensure_player, ensure_policy, error::check_range, tabulate};
use crate::{EdgePolicy, Graph, Tensor, error::ProfileError, graph::Arity, profile::check_actions};

/// A cost function of how many players occupy an action.
///
/// Effects carry no fixed arity, so attaching one never freezes a node
/// against its degree.
#[derive(Clone)]
pub struct Effect(Arc<dyn Fn(usize) -> f64 + Send + Sync>);

impl Effect {
    /// Wraps an arbitrary function of the occupancy count.
    pub fn new<F>(effect: F) -> Self
    where
        F: Fn(usize) -> f64 + Send + Sync + 'static,
    {
        Self(Arc::new(effect))
    }

    /// An effect that ignores occupancy.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(move |_| value)
    }

    /// An effect of the form `slope * count + intercept`.
    #[must_use]
    pub fn linear(slope: f64, intercept: f64) -> Self {
        Self::new(move |count| slope * count as f64 + intercept)
    }

    /// Evaluates the effect at `count` occupants.
    #[must_use]
    pub fn evaluate(&self, count: usize) -> f64 {
        (self.0)(count)
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Effect(..)")
    }
}

impl Arity for Effect {
    fn arity(&self) -> Option<usize> {
        None
    }
}

/// Payoffs over an action graph where every player picks one node.
///
/// With `D[a]` the number of players choosing action `a`, a player on
/// action `a` receives `-(node(a)(D[a]) + Σ edge(a, b)(D[b]))` over the
/// edges leaving `a`. Missing effects contribute 0.
#[derive(Clone, Debug)]
pub struct LocalEffectPayoffs {
    graph: Graph<Effect, Effect>,
    player_count: usize,
}

impl LocalEffectPayoffs {
    /// Binds an action graph to `player_count` players.
    ///
    /// # Errors
    /// Returns [`PayoffError::Profile`] when there are no players or the
    /// graph has no nodes, [`PayoffError::PolicyMismatch`] unless the graph
    /// declares [`EdgePolicy::UNDIRECTED`], and
    /// [`PayoffError::PolicyViolation`] when its edges break that policy.
    pub fn new(graph: Graph<Effect, Effect>, player_count: usize) -> Result<Self, PayoffError> {
        if player_count == 0 {
            return Err(ProfileError::NoPlayers.into());
        }
        if graph.node_count() == 0 {
            return Err(ProfileError::ZeroActions { player: 0 }.into());
        }
        ensure_policy(&graph, EdgePolicy::UNDIRECTED)?;
        Ok(Self {
            graph,
            player_count,
        })
    }

    /// Returns the underlying action graph.
    #[must_use]
    pub fn graph(&self) -> &Graph<Effect, Effect> {
        &self.graph
    }

    /// Returns the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Returns the number of actions each player chooses from.
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Attaches the effect charged for crowding `action` itself.
    ///
    /// `action` is a zero-based node identifier. Returns the previous effect.
    ///
    /// # Errors
    /// Returns [`PayoffError::Graph`] for an unknown node.
    pub fn set_node_effect(
        &mut self,
        action: usize,
        effect: Effect,
    ) -> Result<Option<Effect>, PayoffError> {
        Ok(self.graph.set_node_data(action, effect)?)
    }

    /// Attaches the effect charged to occupants of `origin` for crowding at
    /// `target`.
    ///
    /// # Errors
    /// Returns [`PayoffError::Graph`] when the edge does not exist.
    pub fn set_edge_effect(
        &mut self,
        origin: usize,
        target: usize,
        effect: Effect,
    ) -> Result<Option<Effect>, PayoffError> {
        Ok(self.graph.set_edge_data(origin, target, effect)?)
    }

    /// Counts how many players chose each action.
    ///
    /// `actions` holds one-based choices; the result is indexed by node.
    ///
    /// # Errors
    /// Returns [`PayoffError::Profile`] when `actions` is not a valid profile.
    pub fn occupancy(&self, actions: &[usize]) -> Result<Vec<usize>, PayoffError> {
        check_actions(&self.action_counts(), actions)?;
        let mut counts = vec![0; self.action_count()];
        for &action in actions {
            counts[action - 1] += 1;
        }
        Ok(counts)
    }

    /// Returns `player`'s payoff when everyone plays `actions`.
    ///
    /// # Errors
    /// Returns [`PayoffError::UnknownPlayer`] for a player outside the game
    /// and [`PayoffError::Profile`] when `actions` is not a valid profile.
    pub fn payoff(&self, actions: &[usize], player: usize) -> Result<f64, PayoffError> {
        ensure_player(player, self.player_count)?;
        let counts = self.occupancy(actions)?;
        let node = actions[player] - 1;
        let mut cost = self
            .graph
            .node_data(node)
            .map_or(0.0, |effect| effect.evaluate(counts[node]));
        cost += self
            .graph
            .edges_from(node)
            .iter()
            .filter_map(|edge| edge.data().map(|effect| effect.evaluate(counts[edge.target()])))
            .sum::<f64>();
        Ok(-cost)
    }

    /// Tabulates `player`'s payoff over every action profile.
    ///
    /// # Errors
    /// Propagates [`Self::payoff`] failures and tensor allocation failures.
    #[instrument(name = "payoff.local_effect_table", err, skip(self), fields(players = self.player_count))]
    pub fn payoff_table(&self, player: usize) -> Result<Tensor, PayoffError> {
        ensure_player(player, self.player_count)?;
        tabulate(&self.action_counts(), |actions| self.payoff(actions, player))
    }

    /// Attaches a random linear effect with slope and intercept drawn from
    /// `range` to every node and every edge.
    ///
    /// # Errors
    /// Returns [`PayoffError::EmptyRange`] for an unusable range.
    #[instrument(name = "payoff.fill_linear_effects", err, skip(self, rng))]
    pub fn fill_random_linear_effects<R>(
        &mut self,
        rng: &mut R,
        range: RangeInclusive<f64>,
    ) -> Result<(), PayoffError>
    where
        R: Rng + ?Sized,
    {
        check_range(&range)?;
        let endpoints: Vec<(usize, usize)> = self.graph.edges().map(|edge| edge.endpoints()).collect();
        for (origin, target) in endpoints {
            let effect = Effect::linear(rng.gen_range(range.clone()), rng.gen_range(range.clone()));
            self.graph.set_edge_data(origin, target, effect)?;
        }
        for action in 0..self.action_count() {
            let effect = Effect::linear(rng.gen_range(range.clone()), rng.gen_range(range.clone()));
            self.graph.set_node_data(action, effect)?;
        }
        Ok(())
    }

    fn action_counts(&self) -> Vec<usize> {
        vec![self.action_count(); self.player_count]
    }
}

//! Payoff composition over graph topologies.
//!
//! [`GraphicalPayoffs`] treats nodes as players and sums a node tensor
//! lookup with one lookup per outgoing edge tensor. [`LocalEffectPayoffs`]
//! treats nodes as actions and charges each player the effects of how
//! crowded its action and the neighbouring actions are.

mod error;
mod graphical;
mod local_effect;


use crate::{ActionProfile, EdgePolicy, Graph, Tensor};

pub use self::{
    error::{PayoffError, PayoffErrorCode},
    graphical::GraphicalPayoffs,
    local_effect::{Effect, LocalEffectPayoffs},
};

/// Evaluates `payoff` at every profile of `action_counts`, storing results
/// in a tensor of the same shape.
fn tabulate<F>(action_counts: &[usize], mut payoff: F) -> Result<Tensor, PayoffError>
where
    F: FnMut(&[usize]) -> Result<f64, PayoffError>,
{
    let profiles = ActionProfile::new(action_counts)?;
    let mut table = Tensor::new(action_counts)?;
    for actions in profiles.iter() {
        let value = payoff(&actions)?;
        table.set(&actions, value)?;
    }
    Ok(table)
}

fn ensure_player(player: usize, player_count: usize) -> Result<(), PayoffError> {
    if player < player_count {
        Ok(())
    } else {
        Err(PayoffError::UnknownPlayer {
            player,
            player_count,
        })
    }
}

/// Accepts `graph` when its declared policy is at least as strict as
/// `required` and its edges honour the declaration.
fn ensure_policy<N, E>(graph: &Graph<N, E>, required: EdgePolicy) -> Result<(), PayoffError> {
    let declared = graph.policy();
    let symmetric_enough = declared.symmetric || !required.symmetric;
    let loop_free_enough = !declared.reflexive || required.reflexive;
    if !(symmetric_enough && loop_free_enough) {
        return Err(PayoffError::PolicyMismatch { required, declared });
    }
    graph.check_policy()?;
    Ok(())
}

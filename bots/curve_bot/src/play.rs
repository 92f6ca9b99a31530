use locam::{IllegalAction, InstanceId, Target, TurnState};
use tracing::debug;

use crate::valuation::Weights;

/// Plays a normal turn: first deploy creatures, then attack with everything
/// that can.
pub fn play_battle(weights: &Weights, turn: &mut TurnState) -> Result<(), IllegalAction> {
    deploy(weights, turn)?;
    assign_attacks(turn)
}

/// Summons the most valuable affordable creature until the board is full or
/// nothing fits the remaining mana.
///
/// This is greedy by value, not by cost: an expensive creature is preferred
/// even if two cheaper ones would use the mana better. Items stay in the hand.
pub fn deploy(weights: &Weights, turn: &mut TurnState) -> Result<(), IllegalAction> {
    while !turn.board_full() {
        let Some((card, value)) = weights.best(turn.affordable_creatures()) else {
            break;
        };
        let id = card.instance_id;
        debug!(%card, value, mana = turn.mana(), "Summoning");
        turn.summon(id)?;
    }
    Ok(())
}

/// The opponent's Guard creature with the lowest defense, if any.
fn weakest_guard(turn: &TurnState) -> Option<InstanceId> {
    turn.opponent_guards()
        .min_by_key(|card| card.defense)
        .map(|card| card.instance_id)
}

/// Sends every creature that can attack at the weakest enemy guard, or at the
/// opponent when there is no guard left.
///
/// Attackers go in board order and the working copy keeps track of guards
/// that died, so later attackers move on to the next guard or the face.
pub fn assign_attacks(turn: &mut TurnState) -> Result<(), IllegalAction> {
    let attackers: Vec<InstanceId> = turn.attackers().map(|card| card.instance_id).collect();
    for attacker in attackers {
        let target = weakest_guard(turn).map_or(Target::Face, Target::Creature);
        debug!(attacker, %target, "Attacking");
        turn.attack(attacker, target)?;
    }
    Ok(())
}

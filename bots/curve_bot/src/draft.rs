use locam::{Card, IllegalAction, TurnState};
use tracing::{debug, trace};

use crate::valuation::{index_of_max, Weights};

/// Index of the offered card to pick: the highest-valued one, the first of
/// them on ties.
pub fn choose_pick(weights: &Weights, offered: &[Card]) -> Option<usize> {
    index_of_max(offered.iter().map(|card| {
        let value = weights.value(card);
        trace!(%card, value, "Draft candidate");
        value
    }))
}

/// Picks one card in a draft tick.
pub fn play_draft(weights: &Weights, turn: &mut TurnState) -> Result<(), IllegalAction> {
    // Picking from an empty offer is rejected by the turn state
    let index = choose_pick(weights, turn.offered()).unwrap_or(0);
    debug!(index, "Picking card");
    turn.pick(index)
}

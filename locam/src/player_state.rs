use serde::Serialize;

/// What is known about one player during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    /// Zero or less means the player has lost.
    pub health: i32,
    /// Zero for both players during the draft.
    pub mana: i32,
    /// Number of cards left in the deck.
    pub deck: i32,
    pub runes: i32,
}

use serde::Serialize;

use crate::{Card, Location, PlayerState};

/// Maximum number of creatures on one side of the board.
pub const BOARD_CAPACITY: usize = 6;

/// Everything the game tells us in one tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub me: PlayerState,
    pub opponent: PlayerState,
    /// We only know how many cards the opponent holds, not which.
    pub opponent_hand: i32,
    /// All visible cards, in the order they were sent.
    pub cards: Vec<Card>,
}

impl GameState {
    /// Both players have zero mana while drafting.
    pub fn is_draft(&self) -> bool {
        self.me.mana == 0
    }

    pub fn cards_at(&self, location: Location) -> impl Iterator<Item = &Card> + '_ {
        self.cards
            .iter()
            .filter(move |card| card.location == location)
    }

    pub fn hand(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards_at(Location::Hand)
    }

    pub fn own_board(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards_at(Location::OwnBoard)
    }

    pub fn opponent_board(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards_at(Location::OpponentBoard)
    }

    pub fn board_full(&self) -> bool {
        self.own_board().count() >= BOARD_CAPACITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card;

    fn player(mana: i32) -> PlayerState {
        PlayerState {
            health: 30,
            mana,
            deck: 20,
            runes: 25,
        }
    }

    fn state(mana: i32, cards: Vec<Card>) -> GameState {
        GameState {
            me: player(mana),
            opponent: player(mana),
            opponent_hand: 4,
            cards,
        }
    }

    #[test]
    fn views_split_by_location() {
        let state = state(
            3,
            vec![
                card!("1 1 0 0 1 1 1 ------ 0 0 0"),
                card!("2 2 1 0 1 1 1 ------ 0 0 0"),
                card!("3 3 -1 0 1 1 1 ------ 0 0 0"),
                card!("4 4 0 1 1 1 1 ------ 0 0 0"),
            ],
        );
        let ids = |cards: Vec<&Card>| cards.iter().map(|c| c.instance_id).collect::<Vec<_>>();
        assert_eq!(ids(state.hand().collect()), vec![1, 4]);
        assert_eq!(ids(state.own_board().collect()), vec![2]);
        assert_eq!(ids(state.opponent_board().collect()), vec![3]);
        assert!(!state.board_full());
        assert!(!state.is_draft());
    }

    #[test]
    fn board_full_at_capacity() {
        let cards = (0..BOARD_CAPACITY as i32)
            .map(|id| Card {
                instance_id: id,
                ..card!("1 0 1 0 1 1 1 ------ 0 0 0")
            })
            .collect();
        assert!(state(5, cards).board_full());
    }

    #[test]
    fn zero_mana_means_draft() {
        assert!(state(0, vec![]).is_draft());
    }
}

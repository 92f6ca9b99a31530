use std::str::FromStr;

use serde::Serialize;

use crate::{read_card, Abilities, Ability, ParseError, Tokens};

/// Identifies one card in play. Stable across ticks while the card exists.
pub type InstanceId = i32;

/// Where a visible card currently is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Location {
    Hand,
    OwnBoard,
    OpponentBoard,
}

impl TryFrom<i32> for Location {
    type Error = ParseError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Location::Hand),
            1 => Ok(Location::OwnBoard),
            -1 => Ok(Location::OpponentBoard),
            _ => Err(ParseError::InvalidLocation(code)),
        }
    }
}

/// The type of a [`Card`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum CardType {
    Creature,
    /// Targets one of our own creatures.
    GreenItem,
    /// Targets one of the opponent's creatures.
    RedItem,
    /// Targets an opponent's creature or the opponent.
    BlueItem,
}

impl CardType {
    pub fn is_item(self) -> bool {
        self != CardType::Creature
    }
}

impl TryFrom<i32> for CardType {
    type Error = ParseError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CardType::Creature),
            1 => Ok(CardType::GreenItem),
            2 => Ok(CardType::RedItem),
            3 => Ok(CardType::BlueItem),
            _ => Err(ParseError::InvalidCardType(code)),
        }
    }
}

/// A card visible to us: in our hand, on our board or on the opponent's board.
///
/// During the draft the offered cards are reported as being in our hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Identifies the card design, shared by all copies.
    pub number: i32,
    pub instance_id: InstanceId,
    pub location: Location,
    pub card_type: CardType,
    pub cost: i32,
    pub attack: i32,
    pub defense: i32,
    pub abilities: Abilities,
    /// Change to our health when the card is played.
    pub my_health_change: i32,
    /// Change to the opponent's health when the card is played.
    pub opponent_health_change: i32,
    pub card_draw: i32,
    /// Always `false` on parsed cards. Only a [`TurnState`](crate::TurnState) sets it.
    pub has_attacked: bool,
    /// Always `false` on parsed cards. Only a [`TurnState`](crate::TurnState) sets it.
    pub summoned_this_turn: bool,
}

impl Card {
    pub fn is_creature(&self) -> bool {
        self.card_type == CardType::Creature
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(ability)
    }

    /// A creature can attack if it is on our board, has not attacked yet, and
    /// was not summoned this turn unless it has Charge.
    pub fn can_attack(&self) -> bool {
        self.is_creature()
            && self.location == Location::OwnBoard
            && !self.has_attacked
            && (!self.summoned_this_turn || self.has_ability(Ability::Charge))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{} (card {}, cost {}, {}/{} {})",
            self.instance_id, self.number, self.cost, self.attack, self.defense, self.abilities
        )
    }
}

/// Parses a single card record in the wire format, e.g.
/// `"69 3 1 0 3 4 4 B----- 0 0 0"`.
impl FromStr for Card {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens::new(s.as_bytes());
        let card = read_card(&mut tokens)?;
        match tokens.next_token()? {
            Some(token) => Err(ParseError::TrailingToken(token)),
            None => Ok(card),
        }
    }
}

/// Shorthand for creating a card from its wire record.
///
/// This macro is just calling the [`FromStr`] instance of [`Card`].
/// ```
/// # use locam::{card, Ability, CardType, Location};
/// let card = card!("69 3 1 0 3 4 4 B----- 0 0 0");
/// assert_eq!(card.instance_id, 3);
/// assert_eq!(card.location, Location::OwnBoard);
/// assert_eq!(card.card_type, CardType::Creature);
/// assert!(card.has_ability(Ability::Breakthrough));
/// ```
#[macro_export]
macro_rules! card {
    ($record:literal) => {
        <$crate::Card as std::str::FromStr>::from_str($record)
            .expect("Invalid card record given to card! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;

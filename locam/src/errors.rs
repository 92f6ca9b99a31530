use crate::{InstanceId, Target};

/// The error type for reading a tick of game state from the wire.
///
/// Any of these leaves the reader somewhere in the middle of a tick, so the
/// remaining input cannot be interpreted anymore.
#[derive(Debug)]
pub enum ParseError {
    UnexpectedEof,
    InvalidInteger { token: String },
    InvalidLocation(i32),
    InvalidCardType(i32),
    InvalidCount(i32),
    TrailingToken(String),
    Io(std::io::Error),
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnexpectedEof => write!(f, "Input ended in the middle of a tick"),
            ParseError::InvalidInteger { token } => {
                write!(f, "Expected an integer, found '{}'", token)
            }
            ParseError::InvalidLocation(code) => write!(f, "Unknown card location {}", code),
            ParseError::InvalidCardType(code) => write!(f, "Unknown card type {}", code),
            ParseError::InvalidCount(count) => write!(f, "Invalid record count {}", count),
            ParseError::TrailingToken(token) => {
                write!(f, "Unexpected token '{}' after the end of a record", token)
            }
            ParseError::Io(_) => write!(f, "Could not read from the input"),
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::Io(err)
    }
}

/// The error type for [`TurnState`](crate::TurnState) operations, i.e. for
/// an action that the game engine would reject.
///
/// These are never caused by the input; they indicate a bug in the policy
/// that produced the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalAction {
    NotDraftTick,
    NotBattleTick,
    PickOutOfRange { index: usize, offered: usize },
    AlreadyPicked,
    UnknownCard(InstanceId),
    NotInHand(InstanceId),
    NotACreature(InstanceId),
    NotAnItem(InstanceId),
    NotEnoughMana { id: InstanceId, cost: i32, mana: i32 },
    BoardFull,
    CannotAttack(InstanceId),
    InvalidTarget { id: InstanceId, target: Target },
    MustAttackGuard { target: Target },
    ItemCannotTargetFace(InstanceId),
}

impl std::error::Error for IllegalAction {}

impl std::fmt::Display for IllegalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAction::NotDraftTick => write!(f, "Tried to pick a card outside of the draft"),
            IllegalAction::NotBattleTick => {
                write!(f, "Tried to play a battle action during the draft")
            }
            IllegalAction::PickOutOfRange { index, offered } => write!(
                f,
                "Tried to pick card {} but only {} cards were offered",
                index, offered
            ),
            IllegalAction::AlreadyPicked => write!(f, "Tried to pick twice in one draft tick"),
            IllegalAction::UnknownCard(id) => write!(f, "There is no card with instance id {}", id),
            IllegalAction::NotInHand(id) => write!(f, "Card {} is not in the hand", id),
            IllegalAction::NotACreature(id) => write!(f, "Card {} is not a creature", id),
            IllegalAction::NotAnItem(id) => write!(f, "Card {} is not an item", id),
            IllegalAction::NotEnoughMana { id, cost, mana } => write!(
                f,
                "Card {} costs {} but only {} mana is left",
                id, cost, mana
            ),
            IllegalAction::BoardFull => write!(f, "Tried to summon onto a full board"),
            IllegalAction::CannotAttack(id) => write!(f, "Creature {} cannot attack", id),
            IllegalAction::InvalidTarget { id, target } => {
                write!(f, "Card {} cannot target {}", id, target)
            }
            IllegalAction::MustAttackGuard { target } => write!(
                f,
                "Attacked {} although the opponent has a creature with Guard",
                target
            ),
            IllegalAction::ItemCannotTargetFace(id) => {
                write!(f, "Only blue items can target a player, but {} is not one", id)
            }
        }
    }
}

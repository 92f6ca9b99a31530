use std::collections::VecDeque;
use std::io::BufRead;

use serde::Serialize;

use crate::{
    Abilities, Card, CardType, GameState, InstanceId, Location, ParseError, PlayerState,
};

/// Splits a reader into whitespace-separated tokens, line by line.
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
    // A re-usable buffer for reading lines
    line: String,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line: String::new(),
        }
    }

    /// Returns `None` at the end of the input.
    pub fn next_token(&mut self) -> Result<Option<String>, ParseError> {
        while self.pending.is_empty() {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(self.line.split_whitespace().map(String::from));
        }
        Ok(self.pending.pop_front())
    }

    pub fn expect_token(&mut self) -> Result<String, ParseError> {
        self.next_token()?.ok_or(ParseError::UnexpectedEof)
    }

    pub fn expect_i32(&mut self) -> Result<i32, ParseError> {
        parse_i32(self.expect_token()?)
    }

    /// Reads a number of records that follow.
    pub fn expect_count(&mut self) -> Result<usize, ParseError> {
        let count = self.expect_i32()?;
        usize::try_from(count).map_err(|_| ParseError::InvalidCount(count))
    }
}

fn parse_i32(token: String) -> Result<i32, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::InvalidInteger { token })
}

fn read_player<R: BufRead>(
    health: i32,
    tokens: &mut Tokens<R>,
) -> Result<PlayerState, ParseError> {
    Ok(PlayerState {
        health,
        mana: tokens.expect_i32()?,
        deck: tokens.expect_i32()?,
        runes: tokens.expect_i32()?,
    })
}

/// Reads one card record.
pub fn read_card<R: BufRead>(tokens: &mut Tokens<R>) -> Result<Card, ParseError> {
    let number = tokens.expect_i32()?;
    let instance_id = tokens.expect_i32()?;
    let location: Location = tokens.expect_i32()?.try_into()?;
    let card_type: CardType = tokens.expect_i32()?.try_into()?;
    let cost = tokens.expect_i32()?;
    let attack = tokens.expect_i32()?;
    let defense = tokens.expect_i32()?;
    let abilities = Abilities::from_token(&tokens.expect_token()?);
    Ok(Card {
        number,
        instance_id,
        location,
        card_type,
        cost,
        attack,
        defense,
        abilities,
        my_health_change: tokens.expect_i32()?,
        opponent_health_change: tokens.expect_i32()?,
        card_draw: tokens.expect_i32()?,
        has_attacked: false,
        summoned_this_turn: false,
    })
}

/// Reads the state of one tick.
///
/// Returns `Ok(None)` if the input ends before the tick starts, which is how
/// the game signals that it is over.
pub fn read_game_state<R: BufRead>(
    tokens: &mut Tokens<R>,
) -> Result<Option<GameState>, ParseError> {
    let Some(first) = tokens.next_token()? else {
        return Ok(None);
    };
    let me = read_player(parse_i32(first)?, tokens)?;
    let opponent_health = tokens.expect_i32()?;
    let opponent = read_player(opponent_health, tokens)?;
    let opponent_hand = tokens.expect_i32()?;

    // The count comes from the input, so it is not used as a capacity
    let num_cards = tokens.expect_count()?;
    let mut cards = Vec::new();
    for _ in 0..num_cards {
        cards.push(read_card(tokens)?);
    }

    Ok(Some(GameState {
        me,
        opponent,
        opponent_hand,
        cards,
    }))
}

/// What an attack or an item is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Target {
    /// The opposing player, written as `-1`.
    Face,
    Creature(InstanceId),
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Face => write!(f, "-1"),
            Target::Creature(id) => write!(f, "{}", id),
        }
    }
}

/// A single command to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Action {
    /// Pick the offered card at this index.
    Pick(usize),
    Summon(InstanceId),
    Attack {
        attacker: InstanceId,
        target: Target,
    },
    Use {
        item: InstanceId,
        target: Target,
    },
    Pass,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Pick(index) => write!(f, "PICK {}", index),
            Action::Summon(id) => write!(f, "SUMMON {}", id),
            Action::Attack { attacker, target } => write!(f, "ATTACK {} {}", attacker, target),
            Action::Use { item, target } => write!(f, "USE {} {}", item, target),
            Action::Pass => write!(f, "PASS"),
        }
    }
}

/// The commands for one tick, in order.
///
/// Renders as the single output line the game expects. The game requires at
/// least one command, so an empty response renders as `PASS`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TurnResponse(pub Vec<Action>);

impl std::fmt::Display for TurnResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{}", Action::Pass);
        }
        for (idx, action) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ";")?;
            }
            write!(f, "{}", action)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ability;

    const DRAFT_TICK: &str = "30 0 0 25
30 0 0 25
0 3
118 -1 0 1 0 0 1 ------ 0 0 0
32 -1 0 0 3 3 2 -C---- 0 0 1
92 -1 0 0 1 0 1 ---G-- 0 0 0
";

    #[test]
    fn read_draft_tick() {
        let mut tokens = Tokens::new(DRAFT_TICK.as_bytes());
        let state = read_game_state(&mut tokens).unwrap().unwrap();
        assert!(state.is_draft());
        assert_eq!(state.me.health, 30);
        assert_eq!(state.opponent.runes, 25);
        assert_eq!(state.opponent_hand, 0);
        assert_eq!(state.cards.len(), 3);
        assert_eq!(state.cards[0].card_type, CardType::GreenItem);
        assert!(state.cards[1].has_ability(Ability::Charge));
        assert_eq!(state.cards[2].location, Location::Hand);

        // The input is over after one tick
        assert!(read_game_state(&mut tokens).unwrap().is_none());
    }

    #[test]
    fn tokens_may_span_lines_arbitrarily() {
        let input = "30 0 0 25 30 0\n0 25 0\n1 118 -1 0 1 0 0 1\n------ 0 0 0";
        let mut tokens = Tokens::new(input.as_bytes());
        let state = read_game_state(&mut tokens).unwrap().unwrap();
        assert_eq!(state.cards.len(), 1);
        assert_eq!(state.cards[0].number, 118);
    }

    #[test]
    fn negative_card_count_is_an_error() {
        let mut tokens = Tokens::new("30 1 25 25\n30 1 25 25\n4 -3\n".as_bytes());
        assert!(matches!(
            read_game_state(&mut tokens),
            Err(ParseError::InvalidCount(-3))
        ));
    }

    #[test]
    fn card_count_must_be_backed_by_records() {
        // A huge count with no records behind it fails at the end of the input
        let mut tokens = Tokens::new("30 1 25 25\n30 1 25 25\n4 2147483647\n".as_bytes());
        assert!(matches!(
            read_game_state(&mut tokens),
            Err(ParseError::UnexpectedEof)
        ));
    }

    #[test]
    fn eof_inside_a_tick_is_an_error() {
        let mut tokens = Tokens::new("30 0 0 25\n30 0".as_bytes());
        assert!(matches!(
            read_game_state(&mut tokens),
            Err(ParseError::UnexpectedEof)
        ));
    }

    #[test]
    fn bad_tokens_are_errors() {
        let mut tokens = Tokens::new("30 0 zero 25".as_bytes());
        match read_game_state(&mut tokens) {
            Err(ParseError::InvalidInteger { token }) => assert_eq!(token, "zero"),
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn encode_actions() {
        let response = TurnResponse(vec![
            Action::Summon(3),
            Action::Attack {
                attacker: 3,
                target: Target::Face,
            },
            Action::Attack {
                attacker: 5,
                target: Target::Creature(8),
            },
            Action::Use {
                item: 9,
                target: Target::Face,
            },
            Action::Pass,
        ]);
        assert_eq!(
            response.to_string(),
            "SUMMON 3;ATTACK 3 -1;ATTACK 5 8;USE 9 -1;PASS"
        );
        assert_eq!(TurnResponse(vec![Action::Pick(2)]).to_string(), "PICK 2");
    }

    #[test]
    fn empty_response_passes() {
        assert_eq!(TurnResponse::default().to_string(), "PASS");
    }
}

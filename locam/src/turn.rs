use crate::{
    Ability, Action, Card, CardType, GameState, IllegalAction, InstanceId, Location, Target,
    TurnResponse, BOARD_CAPACITY,
};

/// A working copy of one tick's state that records actions as they are
/// issued.
///
/// Every action is checked against the working copy first and rejected with
/// an [`IllegalAction`] if the game would not accept it. Accepted actions are
/// applied to the copy (mana is spent, summoned creatures move to the board,
/// attacks damage their defender), so later decisions in the same tick see
/// their effects. The parsed [`GameState`] is never modified.
#[derive(Clone, Debug)]
pub struct TurnState {
    draft: bool,
    mana: i32,
    opponent_health: i32,
    cards: Vec<Card>,
    actions: Vec<Action>,
}

impl TurnState {
    pub fn new(state: &GameState) -> Self {
        Self {
            draft: state.is_draft(),
            mana: state.me.mana,
            opponent_health: state.opponent.health,
            cards: state.cards.clone(),
            actions: Vec::new(),
        }
    }

    pub fn is_draft(&self) -> bool {
        self.draft
    }

    /// Mana left for this turn.
    pub fn mana(&self) -> i32 {
        self.mana
    }

    /// The opponent's health after the actions so far.
    pub fn opponent_health(&self) -> i32 {
        self.opponent_health
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The cards offered in a draft tick, in the order they were sent.
    pub fn offered(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: InstanceId) -> Option<&Card> {
        self.cards.iter().find(|card| card.instance_id == id)
    }

    pub fn hand(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards_at(Location::Hand)
    }

    /// Our creatures, the ones summoned this turn last.
    pub fn own_board(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards_at(Location::OwnBoard)
    }

    pub fn opponent_board(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards_at(Location::OpponentBoard)
    }

    pub fn board_full(&self) -> bool {
        self.own_board().count() >= BOARD_CAPACITY
    }

    /// Creatures in hand that the remaining mana pays for.
    pub fn affordable_creatures(&self) -> impl Iterator<Item = &Card> + '_ {
        self.hand()
            .filter(move |card| card.is_creature() && card.cost <= self.mana)
    }

    /// Our creatures that can still attack this turn.
    pub fn attackers(&self) -> impl Iterator<Item = &Card> + '_ {
        self.own_board().filter(|card| card.can_attack())
    }

    pub fn opponent_guards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.opponent_board()
            .filter(|card| card.has_ability(Ability::Guard))
    }

    fn cards_at(&self, location: Location) -> impl Iterator<Item = &Card> + '_ {
        self.cards
            .iter()
            .filter(move |card| card.location == location)
    }

    fn position(&self, id: InstanceId) -> Result<usize, IllegalAction> {
        self.cards
            .iter()
            .position(|card| card.instance_id == id)
            .ok_or(IllegalAction::UnknownCard(id))
    }

    fn check_battle(&self) -> Result<(), IllegalAction> {
        if self.draft {
            Err(IllegalAction::NotBattleTick)
        } else {
            Ok(())
        }
    }

    /// Picks the offered card at `index`.
    pub fn pick(&mut self, index: usize) -> Result<(), IllegalAction> {
        if !self.draft {
            return Err(IllegalAction::NotDraftTick);
        }
        if !self.actions.is_empty() {
            return Err(IllegalAction::AlreadyPicked);
        }
        if index >= self.cards.len() {
            return Err(IllegalAction::PickOutOfRange {
                index,
                offered: self.cards.len(),
            });
        }
        self.actions.push(Action::Pick(index));
        Ok(())
    }

    /// Summons a creature from the hand onto our board.
    pub fn summon(&mut self, id: InstanceId) -> Result<(), IllegalAction> {
        self.check_battle()?;
        let pos = self.position(id)?;
        let card = &self.cards[pos];
        if card.location != Location::Hand {
            return Err(IllegalAction::NotInHand(id));
        }
        if !card.is_creature() {
            return Err(IllegalAction::NotACreature(id));
        }
        if card.cost > self.mana {
            return Err(IllegalAction::NotEnoughMana {
                id,
                cost: card.cost,
                mana: self.mana,
            });
        }
        if self.board_full() {
            return Err(IllegalAction::BoardFull);
        }

        // Moved to the back so the board keeps the order creatures arrived in
        let mut card = self.cards.remove(pos);
        self.mana -= card.cost;
        self.opponent_health += card.opponent_health_change;
        card.location = Location::OwnBoard;
        card.summoned_this_turn = true;
        self.cards.push(card);
        self.actions.push(Action::Summon(id));
        Ok(())
    }

    /// Attacks the opponent or one of their creatures.
    ///
    /// While the opponent has a creature with Guard, only such creatures may
    /// be attacked.
    pub fn attack(&mut self, attacker: InstanceId, target: Target) -> Result<(), IllegalAction> {
        self.check_battle()?;
        let attacker_pos = self.position(attacker)?;
        if !self.cards[attacker_pos].can_attack() {
            return Err(IllegalAction::CannotAttack(attacker));
        }
        let defender_pos = match target {
            Target::Face => None,
            Target::Creature(id) => {
                let pos = self.position(id)?;
                let defender = &self.cards[pos];
                if defender.location != Location::OpponentBoard || !defender.is_creature() {
                    return Err(IllegalAction::InvalidTarget {
                        id: attacker,
                        target,
                    });
                }
                Some(pos)
            }
        };
        let targets_guard =
            defender_pos.is_some_and(|pos| self.cards[pos].has_ability(Ability::Guard));
        if !targets_guard && self.opponent_guards().next().is_some() {
            return Err(IllegalAction::MustAttackGuard { target });
        }

        let attacker_card = &mut self.cards[attacker_pos];
        attacker_card.has_attacked = true;
        let damage = attacker_card.attack;
        let lethal = attacker_card.has_ability(Ability::Lethal);
        match defender_pos {
            None => self.opponent_health -= damage,
            Some(pos) => self.damage_creature(pos, damage, lethal),
        }
        self.actions.push(Action::Attack { attacker, target });
        Ok(())
    }

    /// Resolves `damage` dealt to the creature at `pos`. A Ward absorbs the
    /// hit and is lost.
    fn damage_creature(&mut self, pos: usize, damage: i32, lethal: bool) {
        if damage <= 0 {
            return;
        }
        let defender = &mut self.cards[pos];
        if defender.has_ability(Ability::Ward) {
            defender.abilities = defender.abilities.remove(Ability::Ward);
        } else if lethal || damage >= defender.defense {
            self.cards.remove(pos);
        } else {
            defender.defense -= damage;
        }
    }

    /// Uses an item from the hand.
    ///
    /// Green items target our creatures, red items the opponent's creatures,
    /// and blue items the opponent's creatures or the opponent.
    pub fn use_item(&mut self, item: InstanceId, target: Target) -> Result<(), IllegalAction> {
        self.check_battle()?;
        let item_pos = self.position(item)?;
        let card = &self.cards[item_pos];
        if card.location != Location::Hand {
            return Err(IllegalAction::NotInHand(item));
        }
        if !card.card_type.is_item() {
            return Err(IllegalAction::NotAnItem(item));
        }
        if card.cost > self.mana {
            return Err(IllegalAction::NotEnoughMana {
                id: item,
                cost: card.cost,
                mana: self.mana,
            });
        }
        let expected_location = match card.card_type {
            CardType::GreenItem => Location::OwnBoard,
            _ => Location::OpponentBoard,
        };
        let target_id = match target {
            Target::Face if card.card_type == CardType::BlueItem => None,
            Target::Face => return Err(IllegalAction::ItemCannotTargetFace(item)),
            Target::Creature(id) => {
                let defender = self.card(id).ok_or(IllegalAction::UnknownCard(id))?;
                if defender.location != expected_location || !defender.is_creature() {
                    return Err(IllegalAction::InvalidTarget { id: item, target });
                }
                Some(id)
            }
        };

        let card = self.cards.remove(item_pos);
        self.mana -= card.cost;
        self.opponent_health += card.opponent_health_change;
        match (card.card_type, target_id) {
            (CardType::GreenItem, Some(id)) => {
                let pos = self.position(id)?;
                let creature = &mut self.cards[pos];
                creature.attack += card.attack;
                creature.defense += card.defense;
                creature.abilities = creature.abilities | card.abilities;
            }
            (_, Some(id)) => {
                let pos = self.position(id)?;
                let creature = &mut self.cards[pos];
                creature.abilities = creature.abilities.difference(card.abilities);
                creature.attack = (creature.attack + card.attack).max(0);
                creature.defense += card.defense;
                if creature.defense <= 0 {
                    self.cards.remove(pos);
                }
            }
            (_, None) => self.opponent_health += card.defense,
        }
        self.actions.push(Action::Use { item, target });
        Ok(())
    }

    pub fn pass(&mut self) {
        self.actions.push(Action::Pass);
    }

    pub fn into_response(self) -> TurnResponse {
        TurnResponse(self.actions)
    }
}

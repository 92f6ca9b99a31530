use std::f32::consts::PI;

use locam::{Ability, Card};

/// The tunable factors of the card valuation.
///
/// A card's value is the weighted sum of its stats and abilities, scaled by
/// how well its cost fits the mana curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub attack: f32,
    pub defense: f32,
    pub my_health: f32,
    pub opponent_health: f32,
    pub card_draw: f32,

    /// Per point of attack.
    pub breakthrough: f32,
    /// Per point of attack.
    pub charge: f32,
    /// Per point of attack.
    pub drain: f32,
    /// Per point of defense.
    pub guard: f32,
    pub lethal: f32,
    pub ward: f32,

    /// The cost the curve is centered on.
    pub curve_mean: f32,
    pub curve_scale: f32,
    pub curve_value: f32,
}

pub const DEFAULT_WEIGHTS: Weights = Weights {
    attack: 1.0,
    defense: 0.8,
    my_health: 0.8,
    opponent_health: 1.0,
    card_draw: 0.5,
    breakthrough: 0.15,
    charge: 0.5,
    drain: 0.075,
    guard: 0.2,
    lethal: 2.0,
    ward: 1.0,
    curve_mean: 3.0,
    curve_scale: 3.0,
    curve_value: 5.0,
};

impl Default for Weights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl Weights {
    pub fn value(&self, card: &Card) -> f32 {
        let stats = card.attack.unsigned_abs() as f32 * self.attack
            + card.defense.unsigned_abs() as f32 * self.defense
            + card.my_health_change as f32 * self.my_health
            - card.opponent_health_change as f32 * self.opponent_health
            + card.card_draw as f32 * self.card_draw;
        let abilities: f32 = card
            .abilities
            .iter()
            .map(|ability| self.ability_value(ability, card))
            .sum();
        (stats + abilities) * self.curve_fit(card.cost)
    }

    pub fn ability_value(&self, ability: Ability, card: &Card) -> f32 {
        match ability {
            Ability::Breakthrough => self.breakthrough * card.attack as f32,
            Ability::Charge => self.charge * card.attack as f32,
            Ability::Drain => self.drain * card.attack as f32,
            Ability::Guard => self.guard * card.defense as f32,
            Ability::Lethal => self.lethal,
            Ability::Ward => self.ward,
        }
    }

    /// Peaks at `curve_mean` and falls off symmetrically. Being a factor, a
    /// card without stats stays worthless at any cost.
    pub fn curve_fit(&self, cost: i32) -> f32 {
        gaussian_pdf(cost as f32, self.curve_mean, self.curve_scale) * self.curve_value
    }

    /// Returns the highest-valued card and its value.
    ///
    /// Ties go to the card that comes first.
    pub fn best<'a>(&self, cards: impl IntoIterator<Item = &'a Card>) -> Option<(&'a Card, f32)> {
        let mut best: Option<(&Card, f32)> = None;
        for card in cards {
            let value = self.value(card);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((card, value));
            }
        }
        best
    }
}

/// Values a card with [`DEFAULT_WEIGHTS`].
pub fn value(card: &Card) -> f32 {
    DEFAULT_WEIGHTS.value(card)
}

/// Index of the largest value, the first one on ties.
pub fn index_of_max(values: impl IntoIterator<Item = f32>) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, value) in values.into_iter().enumerate() {
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((idx, value));
        }
    }
    best.map(|(idx, _)| idx)
}

fn gaussian_pdf(x: f32, mean: f32, scale: f32) -> f32 {
    let z = (x - mean) / scale;
    (-z * z / 2.0).exp() / (2.0 * PI).sqrt() / scale
}

#[cfg(test)]
mod tests {
    use locam::{card, Abilities, Location};
    use quickcheck::{quickcheck, Arbitrary, Gen};

    use super::*;

    /// A creature with the stat ranges that occur in the game.
    #[derive(Clone, Debug)]
    struct Creature(Card);

    impl Arbitrary for Creature {
        fn arbitrary(g: &mut Gen) -> Self {
            let mut small = |max: u8| (u8::arbitrary(g) % (max + 1)) as i32;
            let mut card = card!("1 1 0 0 0 0 1 ------ 0 0 0");
            card.cost = small(12);
            card.attack = small(12);
            card.defense = small(12) + 1;
            card.my_health_change = small(5);
            card.opponent_health_change = -small(5);
            card.card_draw = small(2);
            let abilities = small(63);
            card.abilities = locam::ALL_ABILITIES
                .iter()
                .enumerate()
                .filter(|(bit, _)| abilities & (1 << bit) != 0)
                .map(|(_, &ability)| ability)
                .collect::<Abilities>();
            Creature(card)
        }
    }

    quickcheck! {
        fn valuation_is_pure(creature: Creature) -> bool {
            let copy = creature.0.clone();
            value(&creature.0).to_bits() == value(&copy).to_bits()
                && value(&creature.0).to_bits() == value(&creature.0).to_bits()
        }

        fn monotonic_in_attack(creature: Creature, extra: u8) -> bool {
            let weaker = creature.0;
            let stronger = Card {
                attack: weaker.attack + 1 + (extra % 8) as i32,
                ..weaker.clone()
            };
            value(&stronger) >= value(&weaker)
        }

        fn abilities_never_lower_the_value(creature: Creature) -> bool {
            let without = Card {
                abilities: Abilities::new(),
                ..creature.0.clone()
            };
            value(&creature.0) >= value(&without)
        }
    }

    #[test]
    fn reference_value() {
        // 4 attack, 4 defense and Breakthrough at the center of the curve
        let card = card!("69 3 0 0 3 4 4 B----- 0 0 0");
        let base = 4.0 * 1.0 + 4.0 * 0.8 + 0.15 * 4.0;
        let curve = 5.0 / (3.0 * (2.0 * PI).sqrt());
        assert!((value(&card) - base * curve).abs() < 1e-5);
    }

    #[test]
    fn health_and_draw_contribute() {
        let plain = card!("1 1 0 0 3 1 1 ------ 0 0 0");
        let healing = card!("1 1 0 0 3 1 1 ------ 2 0 0");
        let burning = card!("1 1 0 0 3 1 1 ------ 0 -2 0");
        let drawing = card!("1 1 0 0 3 1 1 ------ 0 0 1");
        assert!(value(&healing) > value(&plain));
        assert!(value(&burning) > value(&plain));
        assert!(value(&drawing) > value(&plain));
        // Damage to the opponent is weighted more than healing
        assert!(value(&burning) > value(&healing));
    }

    #[test]
    fn negative_stats_count_by_magnitude() {
        let debuff = card!("1 1 0 2 3 -2 -2 ------ 0 0 0");
        let buff = card!("1 1 0 1 3 2 2 ------ 0 0 0");
        assert_eq!(value(&debuff), value(&buff));
    }

    #[test]
    fn extreme_stats_do_not_overflow() {
        let card: Card = "1 1 0 0 3 -2147483648 -2147483648 ------ 0 0 0"
            .parse()
            .unwrap();
        let worth = value(&card);
        assert!(worth.is_finite() && worth > 0.0);
    }

    #[test]
    fn every_ability_adds_its_bonus() {
        let card = card!("1 1 0 0 3 4 5 ------ 0 0 0");
        let weights = Weights::default();
        let expected = [
            (Ability::Breakthrough, 0.6),
            (Ability::Charge, 2.0),
            (Ability::Drain, 0.3),
            (Ability::Guard, 1.0),
            (Ability::Lethal, 2.0),
            (Ability::Ward, 1.0),
        ];
        for (ability, bonus) in expected {
            assert!((weights.ability_value(ability, &card) - bonus).abs() < 1e-6);
        }
    }

    #[test]
    fn curve_peaks_at_three() {
        let at_cost = |cost| Card {
            cost,
            ..card!("1 1 0 0 0 3 3 ------ 0 0 0")
        };
        assert!(value(&at_cost(3)) > value(&at_cost(1)));
        assert!(value(&at_cost(1)) > value(&at_cost(0)));
        assert!(value(&at_cost(3)) > value(&at_cost(5)));
        assert!(value(&at_cost(5)) > value(&at_cost(7)));
        assert!((value(&at_cost(2)) - value(&at_cost(4))).abs() < 1e-6);
    }

    #[test]
    fn worthless_cards_stay_worthless() {
        let nothing = card!("1 1 0 1 3 0 0 ------ 0 0 0");
        assert_eq!(value(&nothing), 0.0);
    }

    #[test]
    fn first_maximum_wins() {
        assert_eq!(index_of_max([2.0, 5.0, 1.0]), Some(1));
        assert_eq!(index_of_max([4.0, 4.0, 1.0]), Some(0));
        assert_eq!(index_of_max([]), None);
    }

    #[test]
    fn best_card_breaks_ties_by_order() {
        let first = card!("1 1 1 0 3 2 2 ------ 0 0 0");
        let second = card!("1 2 1 0 3 2 2 ------ 0 0 0");
        let (best, _) = Weights::default().best([&first, &second]).unwrap();
        assert_eq!(best.instance_id, 1);
        assert_eq!(best.location, Location::OwnBoard);
    }
}

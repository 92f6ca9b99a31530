use std::convert::Infallible;
use std::iter::FusedIterator;
use std::str::FromStr;

use serde::Serialize;

/// A keyword ability of a [card](crate::Card).
///
/// The order of the variants is the order in which the abilities appear in
/// the wire format, e.g. `BC-G-W`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum Ability {
    Breakthrough,
    Charge,
    Drain,
    Guard,
    Lethal,
    Ward,
}

pub static ALL_ABILITIES: [Ability; 6] = [
    Ability::Breakthrough,
    Ability::Charge,
    Ability::Drain,
    Ability::Guard,
    Ability::Lethal,
    Ability::Ward,
];

impl Ability {
    /// The character that flags this ability in an abilities token.
    pub fn to_char(self) -> char {
        match self {
            Ability::Breakthrough => 'B',
            Ability::Charge => 'C',
            Ability::Drain => 'D',
            Ability::Guard => 'G',
            Ability::Lethal => 'L',
            Ability::Ward => 'W',
        }
    }

    /// Returns `None` for `-` and any other character that is not an ability.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Ability::Breakthrough),
            'C' => Some(Ability::Charge),
            'D' => Some(Ability::Drain),
            'G' => Some(Ability::Guard),
            'L' => Some(Ability::Lethal),
            'W' => Some(Ability::Ward),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1u8 << (self as u8)
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Ability::Breakthrough => "Breakthrough",
            Ability::Charge => "Charge",
            Ability::Drain => "Drain",
            Ability::Guard => "Guard",
            Ability::Lethal => "Lethal",
            Ability::Ward => "Ward",
        };
        f.write_str(name)
    }
}

/// A compact set of [`Ability`]s.
///
/// Like the other small value types in this crate it is [`Copy`] and
/// immutable: `insert` and `remove` return a new set.
///
/// ```
/// use locam::{Abilities, Ability};
/// let abilities: Abilities = "B-G--W".parse().unwrap();
/// assert!(abilities.contains(Ability::Guard));
/// assert!(!abilities.contains(Ability::Charge));
/// assert_eq!(abilities.to_string(), "B--G-W");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Abilities {
    // Only the low 6 bits are used.
    bits: u8,
}

impl Abilities {
    /// Creates a new, empty set.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn contains(self, ability: Ability) -> bool {
        self.bits & ability.bit() != 0
    }

    #[must_use]
    pub fn insert(self, ability: Ability) -> Self {
        Self {
            bits: self.bits | ability.bit(),
        }
    }

    #[must_use]
    pub fn remove(self, ability: Ability) -> Self {
        Self {
            bits: self.bits & !ability.bit(),
        }
    }

    /// All abilities in `self` that are not in `other`.
    #[must_use]
    pub fn difference(self, other: Abilities) -> Self {
        Self {
            bits: self.bits & !other.bits,
        }
    }

    /// Reads an abilities token. Characters that do not flag an ability are
    /// ignored.
    pub fn from_token(token: &str) -> Self {
        token.chars().filter_map(Ability::from_char).collect()
    }

    pub fn iter(self) -> AbilitiesIter {
        AbilitiesIter { set: self, next: 0 }
    }
}

impl std::ops::BitOr for Abilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl FromIterator<Ability> for Abilities {
    fn from_iter<T: IntoIterator<Item = Ability>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Abilities::new(), |set, ability| set.insert(ability))
    }
}

/// Same as [`Abilities::from_token`], so this never fails.
impl FromStr for Abilities {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Abilities::from_token(s))
    }
}

/// Renders the six-character wire token, with `-` for absent abilities.
impl std::fmt::Display for Abilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ability in ALL_ABILITIES {
            let c = if self.contains(ability) {
                ability.to_char()
            } else {
                '-'
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl Serialize for Abilities {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl IntoIterator for Abilities {
    type Item = Ability;

    type IntoIter = AbilitiesIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Yields the abilities of a set in wire order.
pub struct AbilitiesIter {
    set: Abilities,
    next: usize,
}

impl Iterator for AbilitiesIter {
    type Item = Ability;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&ability) = ALL_ABILITIES.get(self.next) {
            self.next += 1;
            if self.set.contains(ability) {
                return Some(ability);
            }
        }
        None
    }
}

impl FusedIterator for AbilitiesIter {}

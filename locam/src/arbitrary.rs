use quickcheck::{Arbitrary, Gen};

use crate::{Abilities, Ability, ALL_ABILITIES};

impl Arbitrary for Ability {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&ALL_ABILITIES).unwrap()
    }
}

impl Arbitrary for Abilities {
    fn arbitrary(g: &mut Gen) -> Self {
        ALL_ABILITIES
            .iter()
            .copied()
            .filter(|_| bool::arbitrary(g))
            .collect()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let set = *self;
        Box::new(set.iter().map(move |ability| set.remove(ability)))
    }
}

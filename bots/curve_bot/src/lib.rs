mod draft;
mod play;
mod valuation;

pub use draft::*;
pub use play::*;
pub use valuation::*;

use locam::{IllegalAction, TurnState};
use locam_bot_utils::Bot;

/// Drafts and plays by card value, favoring cards that fit the mana curve.
#[derive(Clone, Debug, Default)]
pub struct CurveBot {
    pub weights: Weights,
}

impl Bot for CurveBot {
    fn draft(&mut self, turn: &mut TurnState) -> Result<(), IllegalAction> {
        play_draft(&self.weights, turn)
    }

    fn battle(&mut self, turn: &mut TurnState) -> Result<(), IllegalAction> {
        play_battle(&self.weights, turn)
    }
}

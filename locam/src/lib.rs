pub use abilities::*;
pub use cards::*;
pub use errors::*;
pub use game_state::*;
pub use player_state::*;
pub use protocol::*;
pub use turn::*;

mod abilities;
#[cfg(test)]
mod arbitrary;
mod cards;
mod errors;
mod game_state;
mod player_state;
mod protocol;
mod turn;

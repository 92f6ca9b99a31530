use std::io::{BufRead, Write};

use locam::{
    read_game_state, Action, GameState, IllegalAction, Tokens, TurnResponse, TurnState,
};
use tracing::{debug, error, trace, Level};

/// A trait to simplify writing bots.
///
/// A bot only decides what to do in a tick. Reading the state, choosing
/// between draft and battle, and writing the response is done by [`Bot::run`].
pub trait Bot {
    /// Picks one of the cards offered in `turn`.
    fn draft(&mut self, turn: &mut TurnState) -> Result<(), IllegalAction>;

    /// Issues the actions of a normal turn.
    fn battle(&mut self, turn: &mut TurnState) -> Result<(), IllegalAction>;

    /// Decides the response for one tick.
    ///
    /// If the bot issues an illegal action, the whole decision is discarded
    /// and a response that is always legal is sent instead: the first card
    /// during the draft, and a pass otherwise.
    fn decide(&mut self, state: &GameState) -> TurnResponse {
        let mut turn = TurnState::new(state);
        let result = if state.is_draft() {
            self.draft(&mut turn)
        } else {
            self.battle(&mut turn)
        };
        match result {
            Ok(()) => turn.into_response(),
            Err(err) => {
                error!(
                    %err,
                    draft = state.is_draft(),
                    actions = ?turn.actions(),
                    "Bot issued an illegal action, discarding its decision"
                );
                let fallback = if state.is_draft() {
                    Action::Pick(0)
                } else {
                    Action::Pass
                };
                TurnResponse(vec![fallback])
            }
        }
    }

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let stdin = std::io::stdin().lock();
        let stdout = std::io::stdout().lock();
        self.run_with(stdin, stdout)
    }

    /// Plays ticks from `input` until it ends, writing one line per tick.
    fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        let mut tokens = Tokens::new(input);
        let mut tick = 0usize;
        // End of input means the game is over
        while let Some(state) = read_game_state(&mut tokens)? {
            if tracing::enabled!(Level::TRACE) {
                let json = serde_json::to_string(&state)?;
                trace!(tick, state = %json, "Received state");
            }
            let response = self.decide(&state);
            debug!(tick, draft = state.is_draft(), %response, "Sending response");
            writeln!(output, "{}", response)?;
            output.flush()?;
            tick += 1;
        }
        Ok(())
    }
}

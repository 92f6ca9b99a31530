use clap::Parser;
use locam::{IllegalAction, InstanceId, Target, TurnState};
use locam_bot_utils::Bot;
use rand::rngs::StdRng;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot { rng }.run()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Makes uniformly random legal choices. Useful as a baseline opponent.
struct RandomBot {
    rng: StdRng,
}

/// Targets an attack may legally go for: the guards if there are any,
/// otherwise the face and every enemy creature.
fn legal_targets(turn: &TurnState) -> Vec<Target> {
    let guards: Vec<Target> = turn
        .opponent_guards()
        .map(|card| Target::Creature(card.instance_id))
        .collect();
    if !guards.is_empty() {
        return guards;
    }
    std::iter::once(Target::Face)
        .chain(
            turn.opponent_board()
                .filter(|card| card.is_creature())
                .map(|card| Target::Creature(card.instance_id)),
        )
        .collect()
}

impl Bot for RandomBot {
    fn draft(&mut self, turn: &mut TurnState) -> Result<(), IllegalAction> {
        let num_offered = turn.offered().len().max(1);
        turn.pick(self.rng.gen_range(0..num_offered))
    }

    fn battle(&mut self, turn: &mut TurnState) -> Result<(), IllegalAction> {
        while !turn.board_full() {
            let candidates: Vec<InstanceId> = turn
                .affordable_creatures()
                .map(|card| card.instance_id)
                .collect();
            match candidates.choose(&mut self.rng) {
                Some(&id) => turn.summon(id)?,
                None => break,
            }
        }

        let attackers: Vec<InstanceId> = turn.attackers().map(|card| card.instance_id).collect();
        for attacker in attackers {
            // There is always at least the face to attack
            if let Some(&target) = legal_targets(turn).choose(&mut self.rng) {
                turn.attack(attacker, target)?;
            }
        }
        if turn.actions().is_empty() {
            turn.pass();
        }
        Ok(())
    }
}

//! arena: end-to-end demo for the turnwheel turn engine.
//!
//! A scripted hero walks a 5×5 arena while a pack of slow, normal and fast
//! monsters closes in.  Exercises every subsystem:
//!
//! - `TurnProtocol` hands control between the hero and the monsters, skipping
//!   the hero's input on ticks it may not act (`--slow`).
//! - A speed-based `Scheduler` decides which monsters act inside each tick.
//! - `MovementResolver` settles the monsters' simultaneous moves.
//!
//! Set `RUST_LOG=trace` to see individual moves.

mod arena;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tw_core::{EngineConfig, SpeedTier, Tick};
use tw_turn::{StepOutcome, TurnObserver, TurnProtocol};

use arena::{Arena, Command};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn engine arena demo", long_about = None)]
struct Args {
    /// Seed for placement and conflict order.
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Stop once this many ticks have elapsed.
    #[arg(short, long, default_value_t = 20)]
    turns: u64,

    /// Number of monsters (at most 24).
    #[arg(short, long, default_value_t = 3)]
    agents: usize,

    /// The hero only acts on even ticks.
    #[arg(long)]
    slow: bool,
}

// ── Hero script ───────────────────────────────────────────────────────────────

// The third step east hits the wall and is rejected; the hero waits instead.
const SCRIPT: [Command; 6] = [
    Command::Step { dx: 1, dy: 0 },
    Command::Step { dx: 1, dy: 0 },
    Command::Step { dx: 1, dy: 0 },
    Command::Wait,
    Command::Step { dx: 0, dy: -1 },
    Command::Step { dx: -1, dy: 0 },
];

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct TurnLog {
    rejected: usize,
    ticks:    u64,
    prompts:  usize,
}

impl TurnObserver for TurnLog {
    fn on_action_rejected(&mut self, _tick: Tick) {
        self.rejected += 1;
    }

    fn on_tick_end(&mut self, tick: Tick) {
        self.ticks += 1;
        debug!(%tick, "tick complete");
    }

    fn on_awaiting_input(&mut self, _tick: Tick) {
        self.prompts += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = EngineConfig { seed: args.seed, ..EngineConfig::default() };
    config.validate()?;

    let hero_tier = if args.slow { SpeedTier::Slow } else { SpeedTier::Normal };
    let mut arena = Arena::new(&config, args.agents, hero_tier)?;
    let mut protocol = TurnProtocol::from_config(&config);
    let mut log = TurnLog::default();

    info!(
        seed     = args.seed,
        turns    = args.turns,
        monsters = args.agents,
        slow     = args.slow,
        "arena starting"
    );
    println!("{}", arena.render());

    let mut next = 0usize;
    let mut retry = false;
    while protocol.tick().0 < args.turns {
        let command = if retry {
            Command::Wait
        } else {
            next += 1;
            SCRIPT[(next - 1) % SCRIPT.len()]
        };

        protocol.submit(command)?;
        let mut outcome = protocol.step(&mut arena, &mut log)?;
        while let StepOutcome::Yielded { ticks } = outcome {
            warn!(tick = %protocol.tick(), ticks, "hero idle for the whole skip budget");
            outcome = protocol.step(&mut arena, &mut log)?;
        }

        retry = outcome == StepOutcome::Rejected;
        match outcome {
            StepOutcome::Rejected => {
                info!(tick = %protocol.tick(), ?command, "command rejected");
            }
            StepOutcome::AwaitingInput { ticks } => {
                info!(
                    tick     = %protocol.tick(),
                    ticks,
                    ?command,
                    hero     = ?arena.hero_cell(),
                    adjacent = arena.adjacent_monsters(),
                    "turn done"
                );
            }
            StepOutcome::Yielded { .. } => {}
        }
    }

    println!("{}", arena.render());
    println!(
        "Ticks: {}  |  prompts: {}  |  rejected: {}  |  monster moves: {}  |  adjacent: {}",
        log.ticks,
        log.prompts,
        log.rejected,
        arena.monster_moves(),
        arena.adjacent_monsters(),
    );
    Ok(())
}

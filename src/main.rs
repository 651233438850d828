//! Headless blockfall runner (default binary).
//!
//! Plays a game without a terminal: a seeded random bot issues actions, a
//! fixed tick drives gravity and deferred effects, and the final state is
//! printed as a summary or as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use blockfall::core::{CellView, Engine, EngineConfig, GravityScheduler};
use blockfall::types::{GameAction, TICK_MS};

const BOT_ACTIONS: [GameAction; 5] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::Rotate,
    GameAction::SoftDrop,
    GameAction::HardDrop,
];

/// blockfall - headless falling-block game runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Piece seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 20_000)]
    ticks: u32,

    /// Milliseconds per tick
    #[arg(long, default_value_t = TICK_MS)]
    tick_ms: u32,

    /// Path to a JSON engine config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chance per tick that the bot issues an action
    #[arg(long, default_value_t = 0.1)]
    action_rate: f64,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = load_config(&args)?;
    let bot_seed = config.seed.unwrap_or(0);
    let mut engine = Engine::new(config).context("invalid engine config")?;

    run(&mut engine, &args, bot_seed);

    let snap = engine.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else {
        print_board(&snap.compose());
        println!(
            "score: {}  lines: {}  level: {}  game over: {}",
            snap.score, snap.lines, snap.level, snap.game_over
        );
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn run(engine: &mut Engine, args: &Args, bot_seed: u64) {
    let mut bot = StdRng::seed_from_u64(bot_seed);
    let mut gravity = GravityScheduler::new();
    let action_rate = args.action_rate.clamp(0.0, 1.0);

    engine.start();
    gravity.reset();

    for tick in 0..args.ticks {
        if engine.is_over() {
            info!(tick, "stopping: game over");
            break;
        }

        if bot.random_bool(action_rate) {
            let action = BOT_ACTIONS[bot.random_range(0..BOT_ACTIONS.len())];
            let applied = engine.apply_action(action);
            debug!(tick, action = action.as_str(), applied, "bot action");
        }

        gravity.advance(engine, args.tick_ms);

        if let Some(event) = engine.take_last_event() {
            debug!(
                tick,
                kind = ?event.kind,
                lines = event.lines_cleared,
                points = event.points,
                "lock"
            );
        }
    }
}

fn print_board(view: &blockfall::core::snapshot::ViewGrid) {
    for row in view {
        let line: String = row
            .iter()
            .map(|cell| match cell {
                CellView::Empty => '.',
                CellView::Locked(_) => '#',
                CellView::Clearing(_) => '=',
                CellView::Ghost(_) => ':',
                CellView::Active(_) => '@',
            })
            .collect();
        println!("|{line}|");
    }
}

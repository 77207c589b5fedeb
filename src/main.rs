//! Inkball headless runner
//!
//! Loads a game config and its level layouts, then drives the simulation
//! at a fixed tick count without any window. Useful for replaying a seed.
//!
//! Example:
//!   inkball --config levels/config.json --seed 7 --ticks 9000

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use inkball::consts::FPS;
use inkball::sim::SimEvent;
use inkball::{GameConfig, Session, load_scenes};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run Inkball levels headless", long_about = None)]
struct Args {
    /// Game config JSON; layout paths resolve relative to its directory
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
    /// Seed for ball directions and spawner choice
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Maximum ticks to simulate
    #[arg(long, default_value_t = 30 * 60 * 10)]
    ticks: u64,
}

fn main() -> Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    let args = Args::parse();

    let config = GameConfig::load(&args.config)?;
    let base_dir = args
        .config
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();
    let scenes = load_scenes(&config, &base_dir)?;
    let mut session = Session::new(config, scenes, args.seed)?;

    log::info!("Inkball starting (seed {})", args.seed);

    let mut ticks = 0;
    while ticks < args.ticks && !session.is_game_over() {
        let level = session.level_index() + 1;
        for event in session.update() {
            match event {
                SimEvent::LevelEnded { reason } => log::info!(
                    "Level {} ended ({:?}) at {}s",
                    level,
                    reason,
                    ticks / FPS as u64
                ),
                other => log::debug!("{:?}", other),
            }
        }
        ticks += 1;
    }

    println!(
        "level {} | score {} | {} ticks{}",
        session.level_index() + 1,
        session.score(),
        ticks,
        if session.is_game_over() { " | game over" } else { "" }
    );
    Ok(())
}

//! # tile_app — headless tile editor runner
//!
//! Builds a level from a JSON setup, replays a scripted input session against
//! it one tick per frame, and logs what was placed.
//!
//! ## Startup Sequence
//!
//! 1. Load the level setup (default `demos/level.json`).
//! 2. Spawn the tile types and the tile manager, begin play.
//! 3. Load the session script (default `demos/session.json`).
//! 4. Run the fixed-timestep tick loop over the script.

mod session;
mod tick;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use session::SessionScript;
use tick::{TickConfig, TickLoop};
use tile_editor::{LevelSetup, TileWorld};

#[derive(Parser)]
#[command(name = "tile_app", about = "Replay a scripted input session against a tile editor level")]
struct Args {
    /// Level setup JSON (manager config and tile catalog)
    #[arg(short, long, default_value = "demos/level.json")]
    level: PathBuf,

    /// Session script JSON (one input frame per tick)
    #[arg(short, long, default_value = "demos/session.json")]
    session: PathBuf,

    /// Target ticks per second
    #[arg(long, default_value_t = 60.0)]
    tick_rate: f64,

    /// Stop after this many ticks (0 = play the whole script)
    #[arg(long, default_value_t = 0)]
    max_ticks: u64,
}

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tile_app=info".parse()?))
        .init();

    let args = Args::parse();
    anyhow::ensure!(
        args.tick_rate.is_finite() && args.tick_rate > 0.0,
        "tick rate must be positive, got {}",
        args.tick_rate
    );

    info!(level = %args.level.display(), "loading level");
    let setup = LevelSetup::load(&args.level)
        .with_context(|| format!("failed to load level {}", args.level.display()))?;
    let world = TileWorld::from_setup(&setup).context("failed to build level")?;

    let script = SessionScript::load(&args.session)?;
    info!(session = %args.session.display(), frames = script.len(), "session loaded");

    let config = TickConfig {
        tick_rate: args.tick_rate,
        max_ticks: args.max_ticks,
    };
    let mut tick_loop = TickLoop::new(config, world);
    let summary = tick_loop.run(&script).clone();

    info!(
        placed = summary.placed,
        rejected = summary.rejected,
        rotations = summary.rotations,
        selection_changes = summary.selection_changes,
        hovers = summary.hovers,
        ignored = summary.ignored,
        "session complete"
    );

    let world = tick_loop.world();
    for tile in world.scene().tiles() {
        info!(tile_type = %tile.label, instances = tile.placed_count(), "tile type");
    }
    for manager in world.managers() {
        info!(
            manager = %manager.id(),
            occupied = manager.grid().occupied_count(),
            selected = manager.current_tile_index(),
            yaw = manager.placement_yaw(),
            "manager state"
        );
        for (cell, tile_type) in manager.grid().occupied() {
            debug!(
                manager = %manager.id(),
                %cell,
                tile_type = world.scene().actor_label(tile_type).unwrap_or("<missing>"),
                "occupied cell"
            );
        }
    }

    Ok(())
}

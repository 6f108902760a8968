//! Fixed-timestep tick loop.
//!
//! Each tick:
//!
//! 1. Feed the next scripted frame into the player controller.
//! 2. Trace under the cursor and route the interaction to the managers.
//! 3. Tick every manager and rebuild stale navigation.
//! 4. Advance the tick counter and sleep out the rest of the tick budget.

use std::time::{Duration, Instant};

use tile_editor::{InteractionOutcome, TileWorld};
use tracing::{debug, info, warn};

use crate::session::{SessionFrame, SessionScript};

/// Configuration for the tick loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = every scripted frame).
    pub max_ticks: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

/// Tally of interaction outcomes over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub placed: u64,
    pub rejected: u64,
    pub rotations: u64,
    pub selection_changes: u64,
    pub hovers: u64,
    pub ignored: u64,
}

impl SessionSummary {
    pub fn record(&mut self, outcome: &InteractionOutcome) {
        match outcome {
            InteractionOutcome::Placed { .. } => self.placed += 1,
            InteractionOutcome::Rejected(_) => self.rejected += 1,
            InteractionOutcome::Rotated { .. } => self.rotations += 1,
            InteractionOutcome::SelectionChanged { .. } => self.selection_changes += 1,
            InteractionOutcome::Hovered { .. } => self.hovers += 1,
            InteractionOutcome::Ignored => self.ignored += 1,
        }
    }
}

/// Drives a [`TileWorld`] one tick at a time.
#[derive(Debug)]
pub struct TickLoop {
    tick_id: u64,
    config: TickConfig,
    world: TileWorld,
    summary: SessionSummary,
}

impl TickLoop {
    #[must_use]
    pub fn new(config: TickConfig, world: TileWorld) -> Self {
        Self {
            tick_id: 0,
            config,
            world,
            summary: SessionSummary::default(),
        }
    }

    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    #[must_use]
    pub fn world(&self) -> &TileWorld {
        &self.world
    }

    #[must_use]
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Run one tick with the given input frame.
    pub fn tick(&mut self, frame: &SessionFrame, dt: f64) {
        self.tick_id += 1;
        frame.apply(self.world.controller_mut());

        for (target, outcome) in self.world.dispatch_interaction() {
            debug!(tick_id = self.tick_id, %target, ?outcome, "interaction");
            self.summary.record(&outcome);
        }

        self.world.tick(dt);
    }

    /// Play `script` frame by frame, paced to the configured tick rate.
    pub fn run(&mut self, script: &SessionScript) -> &SessionSummary {
        let tick_duration = Duration::from_secs_f64(1.0 / self.config.tick_rate);
        let dt = tick_duration.as_secs_f64();

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            frames = script.len(),
            "starting tick loop"
        );

        for (tick_count, frame) in (1u64..).zip(&script.frames) {
            let start = Instant::now();

            self.tick(frame, dt);

            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick_id = self.tick_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }

        info!(ticks = self.tick_id, "tick loop complete");
        &self.summary
    }
}

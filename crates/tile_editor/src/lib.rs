//! # tile_editor
//!
//! A grid-based tile placement tool. The [`TileGameManager`] snaps the cursor
//! to a square grid, tracks which cells are occupied, cycles through a catalog
//! of tile types, and appends one instanced-mesh instance per placed tile.
//!
//! The manager never reaches for global state: each interaction receives the
//! scene it may mutate, the cursor hit, and an explicit [`InputEdges`]
//! snapshot. [`TileWorld`] wires the manager to a
//! [`PlayerController`](engine_scene::PlayerController) and routes the
//! controller's events to every registered manager.

pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod manager;
pub mod setup;
pub mod world;

pub use config::{PreviewRefresh, RotationMode, TileManagerConfig};
pub use error::{ConfigError, PlacementRejection, SetupError};
pub use grid::{GridCoord, Occupancy, TileGrid};
pub use input::{InputEdges, InteractionAction};
pub use manager::{InteractionOutcome, ManagerState, TileGameManager};
pub use setup::{LevelSetup, TileTypeSetup};
pub use world::TileWorld;

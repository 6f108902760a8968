//! Error types for the tile editor.

use std::path::PathBuf;

use engine_math::Vec3;
use engine_scene::{ActorId, SceneError};

/// Invalid manager configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size must be finite and positive, got {0}")]
    InvalidGridSize(f32),

    #[error("grid offset must be finite, got {0}")]
    InvalidGridOffset(Vec3),

    #[error("map must extend at least one cell from the origin")]
    ZeroMapExtents,

    #[error("map extends {extends} cells from the origin, at most {max} are supported")]
    MapTooLarge { extends: u32, max: u32 },
}

/// Failure to build a level from its setup description.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid level setup: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Why a left click did not place a tile.
///
/// Rejections are reported through logs and the interaction outcome only;
/// they never propagate to the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementRejection {
    #[error("out of grid at ({x}, {y})")]
    OutOfGrid { x: i64, y: i64 },

    #[error("cell ({x}, {y}) already holds {occupant}")]
    Occupied { x: usize, y: usize, occupant: ActorId },

    #[error("tile index {index} is not valid for a catalog of {len}")]
    InvalidTileIndex { index: usize, len: usize },

    #[error("tile type {0} no longer exists")]
    MissingTileType(ActorId),
}

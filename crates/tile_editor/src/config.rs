//! Manager configuration.

use engine_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::TileGrid;

/// What a right click turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationMode {
    /// Rotate the whole manager actor; the cursor and preview follow it.
    #[default]
    Actor,
    /// Rotate only the preview indicator.
    Preview,
}

/// When the preview indicator re-reads the selected tile type's appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviewRefresh {
    /// At begin-play and whenever the selection changes.
    #[default]
    OnSelectionChange,
    /// Whenever the selection changes and on every hover; nothing at begin-play.
    EveryHover,
}

/// Configuration for a [`TileGameManager`](crate::TileGameManager).
///
/// Missing fields fall back to [`TileManagerConfig::default`] when
/// deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileManagerConfig {
    /// Edge length of one grid cell in world units.
    pub grid_size: f32,
    /// Constant bias added to every snapped location.
    pub grid_offset: Vec3,
    /// Half-width of the square map, in cells.
    pub map_extends_in_grids: u32,
    pub rotation_mode: RotationMode,
    pub preview_refresh: PreviewRefresh,
}

impl TileManagerConfig {
    pub const DEFAULT_GRID_SIZE: f32 = 100.0;
    pub const DEFAULT_GRID_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 0.5);
    pub const DEFAULT_MAP_EXTENDS: u32 = 16;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_grid_size(mut self, grid_size: f32) -> Self {
        self.grid_size = grid_size;
        self
    }

    #[must_use]
    pub fn with_grid_offset(mut self, grid_offset: Vec3) -> Self {
        self.grid_offset = grid_offset;
        self
    }

    #[must_use]
    pub fn with_map_extends(mut self, map_extends_in_grids: u32) -> Self {
        self.map_extends_in_grids = map_extends_in_grids;
        self
    }

    #[must_use]
    pub fn with_rotation_mode(mut self, rotation_mode: RotationMode) -> Self {
        self.rotation_mode = rotation_mode;
        self
    }

    #[must_use]
    pub fn with_preview_refresh(mut self, preview_refresh: PreviewRefresh) -> Self {
        self.preview_refresh = preview_refresh;
        self
    }

    /// Number of cells along each axis of the map.
    #[must_use]
    pub fn cells_per_axis(&self) -> usize {
        self.map_extends_in_grids as usize * 2
    }

    /// Check the values a grid can be built from.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidGridSize`] unless `grid_size` is finite and
    /// positive, [`ConfigError::InvalidGridOffset`] for a non-finite offset,
    /// [`ConfigError::ZeroMapExtents`] for an empty map,
    /// [`ConfigError::MapTooLarge`] above [`TileGrid::MAX_EXTENDS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(ConfigError::InvalidGridSize(self.grid_size));
        }
        if !self.grid_offset.is_finite() {
            return Err(ConfigError::InvalidGridOffset(self.grid_offset));
        }
        if self.map_extends_in_grids == 0 {
            return Err(ConfigError::ZeroMapExtents);
        }
        if self.map_extends_in_grids > TileGrid::MAX_EXTENDS {
            return Err(ConfigError::MapTooLarge {
                extends: self.map_extends_in_grids,
                max: TileGrid::MAX_EXTENDS,
            });
        }
        Ok(())
    }
}

impl Default for TileManagerConfig {
    fn default() -> Self {
        Self {
            grid_size: Self::DEFAULT_GRID_SIZE,
            grid_offset: Self::DEFAULT_GRID_OFFSET,
            map_extends_in_grids: Self::DEFAULT_MAP_EXTENDS,
            rotation_mode: RotationMode::default(),
            preview_refresh: PreviewRefresh::default(),
        }
    }
}

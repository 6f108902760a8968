//! Level setup loaded from JSON.
//!
//! ```json
//! {
//!   "manager": { "grid_size": 100.0, "map_extends_in_grids": 16 },
//!   "ground_height": 0.0,
//!   "tile_types": [
//!     { "label": "Grass", "mesh": "/Game/Tiles/SM_Grass" },
//!     { "label": "Water", "mesh": "/Game/Tiles/SM_Water", "scale": [1.0, 1.0, 0.2] }
//!   ]
//! }
//! ```

use std::path::Path;

use engine_math::{Transform3D, Vec3};
use engine_scene::{InstancedMeshComponent, MeshAsset};
use serde::{Deserialize, Serialize};

use crate::config::TileManagerConfig;
use crate::error::SetupError;

/// One entry of the tile catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileTypeSetup {
    pub label: String,
    #[serde(default)]
    pub mesh: Option<MeshAsset>,
    /// Transform of the instanced mesh relative to the tile actor.
    #[serde(default)]
    pub relative: Transform3D,
    /// Overrides the scale in `relative`.
    #[serde(default)]
    pub scale: Option<Vec3>,
}

impl TileTypeSetup {
    #[must_use]
    pub fn new(label: impl Into<String>, mesh: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            mesh: Some(MeshAsset::new(mesh)),
            relative: Transform3D::IDENTITY,
            scale: None,
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    /// The instanced mesh component a tile actor of this type carries.
    #[must_use]
    pub fn instanced_mesh(&self) -> InstancedMeshComponent {
        let mut relative = self.relative;
        if let Some(scale) = self.scale {
            relative.scale = scale;
        }
        InstancedMeshComponent::new(self.mesh.clone()).with_relative(relative)
    }
}

/// Everything needed to build a [`TileWorld`](crate::TileWorld).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSetup {
    pub manager: TileManagerConfig,
    /// Height of the ground plane cursor traces hit.
    pub ground_height: f32,
    pub tile_types: Vec<TileTypeSetup>,
}

impl LevelSetup {
    /// Parse a setup document.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Json`] for malformed input.
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a setup file.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Io`] if the file cannot be read and
    /// [`SetupError::Json`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, SetupError> {
        let json = std::fs::read_to_string(path).map_err(|source| SetupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

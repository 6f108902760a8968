//! Named asset references.

use serde::{Deserialize, Serialize};

/// Reference to a static mesh asset by its content path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshAsset(pub String);

impl MeshAsset {
    /// The engine's built-in unit plane.
    pub const PLANE: &'static str = "/Engine/BasicShapes/Plane";

    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The built-in plane mesh, used by flat indicators.
    #[must_use]
    pub fn plane() -> Self {
        Self::new(Self::PLANE)
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MeshAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a material asset by its content path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialAsset(pub String);

impl MaterialAsset {
    /// Translucent material drawn on the grid cell under the cursor.
    pub const GRID_SLOT: &'static str = "/Game/UI/MAT_GridSlot";

    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn grid_slot() -> Self {
        Self::new(Self::GRID_SLOT)
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MaterialAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_asset_deserializes_from_plain_string() {
        let mesh: MeshAsset = serde_json::from_str(r#""/Game/Tiles/SM_Grass""#).unwrap();
        assert_eq!(mesh.path(), "/Game/Tiles/SM_Grass");
    }

    #[test]
    fn test_builtin_assets() {
        assert_eq!(MeshAsset::plane().path(), MeshAsset::PLANE);
        assert_eq!(MaterialAsset::grid_slot().to_string(), MaterialAsset::GRID_SLOT);
    }
}

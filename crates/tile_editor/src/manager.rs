//! The tile placement manager.
//!
//! [`TileGameManager`] is an actor that owns the occupancy grid and the
//! current tile selection. Each interaction event from the player controller
//! is handled by exactly one branch, chosen from the frame's input edges:
//!
//! | edge         | effect                                               |
//! |--------------|------------------------------------------------------|
//! | left click   | place the selected tile type on the snapped cell     |
//! | right click  | turn the placement orientation by +90° yaw           |
//! | scroll up    | select the previous tile type (wrapping)             |
//! | scroll down  | select the next tile type (wrapping)                 |
//! | none         | hover: move the cursor and preview to the snapped cell |
//!
//! Every failure (empty catalog, out-of-grid, occupied cell, bad selection)
//! is logged and skipped. Nothing is returned to the input source as an
//! error; the [`InteractionOutcome`] is informational.

use engine_math::{Quat, Transform3D, Vec3, grid_snap, normalize_yaw, yaw_rotation};
use engine_scene::{
    ActorId, CollisionMode, InteractionEvent, MaterialAsset, MeshAsset, PlayerController, Scene,
    SceneComponent, StaticMeshComponent,
};
use tracing::{debug, error, info, warn};

use crate::config::{PreviewRefresh, RotationMode, TileManagerConfig};
use crate::error::{ConfigError, PlacementRejection};
use crate::grid::{GridCoord, Occupancy, TileGrid};
use crate::input::{InputEdges, InteractionAction};

/// Whether the manager can react to input at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// No tile types in the catalog; every interaction is ignored.
    Unarmed,
    Armed,
}

/// What a single interaction did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome {
    /// Nothing happened (empty catalog or unusable hit location).
    Ignored,
    /// A tile was placed.
    Placed {
        cell: GridCoord,
        tile_type: ActorId,
        /// Index of the new instance in the tile type's instanced mesh.
        instance: usize,
    },
    /// A placement was attempted and skipped.
    Rejected(PlacementRejection),
    /// The placement orientation turned; `yaw` is the new yaw in degrees.
    Rotated { yaw: f32 },
    SelectionChanged { index: usize, tile_type: ActorId },
    /// The cursor moved to this snapped, offset location.
    Hovered { location: Vec3 },
}

/// Grid tile placement actor.
#[derive(Debug)]
pub struct TileGameManager {
    id: ActorId,
    config: TileManagerConfig,
    /// Actor transform in world space.
    transform: Transform3D,
    actor_yaw: f32,
    preview_yaw: f32,
    grid: TileGrid,
    tile_types: Vec<ActorId>,
    current_tile_index: usize,
    /// Plane drawn over the cell under the cursor.
    grid_selection: StaticMeshComponent,
    /// Ghost of the selected tile type.
    tile_preview: StaticMeshComponent,
    frames: u64,
}

impl TileGameManager {
    pub const GRID_SELECTION_NAME: &'static str = "GridMesh";
    pub const TILE_PREVIEW_NAME: &'static str = "TilePreview";

    /// Build a manager for the actor `id` with an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`TileManagerConfig::validate`].
    pub fn new(id: ActorId, config: TileManagerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = TileGrid::new(config.map_extends_in_grids)?;
        Ok(Self {
            id,
            config,
            transform: Transform3D::IDENTITY,
            actor_yaw: 0.0,
            preview_yaw: 0.0,
            grid,
            tile_types: Vec::new(),
            current_tile_index: 0,
            grid_selection: StaticMeshComponent::new(Self::GRID_SELECTION_NAME)
                .with_mesh(MeshAsset::plane())
                .with_material(MaterialAsset::grid_slot())
                .with_collision(CollisionMode::NoCollision),
            tile_preview: StaticMeshComponent::new(Self::TILE_PREVIEW_NAME)
                .with_collision(CollisionMode::NoCollision),
            frames: 0,
        })
    }

    /// Returns the manager's actor id.
    #[must_use]
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the manager configuration.
    #[must_use]
    pub fn config(&self) -> &TileManagerConfig {
        &self.config
    }

    /// Returns the manager actor's world transform.
    #[must_use]
    pub fn transform(&self) -> &Transform3D {
        &self.transform
    }

    /// Returns the occupancy grid.
    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Occupancy at signed grid indices, `None` outside the map.
    #[must_use]
    pub fn occupancy(&self, x: i64, y: i64) -> Option<Occupancy> {
        self.grid.cell(x, y)
    }

    /// Returns the grid cursor indicator.
    #[must_use]
    pub fn grid_selection(&self) -> &StaticMeshComponent {
        &self.grid_selection
    }

    /// Returns the tile preview indicator.
    #[must_use]
    pub fn tile_preview(&self) -> &StaticMeshComponent {
        &self.tile_preview
    }

    /// Returns the number of ticks seen so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    // -- Catalog --

    /// Returns the tile type catalog in selection order.
    #[must_use]
    pub fn tile_types(&self) -> &[ActorId] {
        &self.tile_types
    }

    /// Replace the catalog. The current index is kept as is.
    pub fn set_tile_types(&mut self, tile_types: impl IntoIterator<Item = ActorId>) {
        self.tile_types = tile_types.into_iter().collect();
    }

    /// Append a tile type to the catalog.
    pub fn add_tile_type(&mut self, tile_type: ActorId) {
        self.tile_types.push(tile_type);
    }

    /// Returns the index of the selected tile type.
    #[must_use]
    pub fn current_tile_index(&self) -> usize {
        self.current_tile_index
    }

    /// Set the selection directly. Out-of-range values are accepted and
    /// guarded at placement time.
    pub fn set_current_tile_index(&mut self, index: usize) {
        self.current_tile_index = index;
    }

    /// Returns the selected tile type, or `None` if the index is out of range.
    #[must_use]
    pub fn selected_tile_type(&self) -> Option<ActorId> {
        self.tile_types.get(self.current_tile_index).copied()
    }

    /// Returns [`ManagerState::Armed`] once the catalog is non-empty.
    #[must_use]
    pub fn state(&self) -> ManagerState {
        if self.tile_types.is_empty() {
            ManagerState::Unarmed
        } else {
            ManagerState::Armed
        }
    }

    // -- Grid math --

    /// Snap X and Y to the nearest grid multiple; Z passes through.
    #[must_use]
    pub fn snap_to_grid(&self, location: Vec3) -> Vec3 {
        Vec3::new(
            grid_snap(location.x, self.config.grid_size),
            grid_snap(location.y, self.config.grid_size),
            location.z,
        )
    }

    /// Where the cursor, preview and placed tiles go for a world location.
    #[must_use]
    pub fn cursor_location(&self, location: Vec3) -> Vec3 {
        self.snap_to_grid(location) + self.config.grid_offset
    }

    /// Signed grid indices of a snapped location, shifted by the map extents.
    ///
    /// `snapped` is a whole multiple of the grid size, so the quotient is
    /// rounded to absorb the float error of the snap.
    #[must_use]
    pub fn grid_indices(&self, snapped: Vec3) -> (i64, i64) {
        let extends = i64::from(self.config.map_extends_in_grids);
        let x = (snapped.x / self.config.grid_size).round() as i64 + extends;
        let y = (snapped.y / self.config.grid_size).round() as i64 + extends;
        (x, y)
    }

    /// Yaw in degrees that the next placement will use.
    #[must_use]
    pub fn placement_yaw(&self) -> f32 {
        match self.config.rotation_mode {
            RotationMode::Actor => self.actor_yaw,
            RotationMode::Preview => self.preview_yaw,
        }
    }

    /// Rotation that the next placement will use.
    #[must_use]
    pub fn placement_rotation(&self) -> Quat {
        match self.config.rotation_mode {
            RotationMode::Actor => self.transform.rotation,
            RotationMode::Preview => self.tile_preview.world_transform(&self.transform).rotation,
        }
    }

    // -- Lifecycle --

    /// Register with the player controller and, unless the preview refreshes
    /// on hover, show the selected tile type in the preview.
    pub fn begin_play(&mut self, scene: &Scene, controller: &mut PlayerController) {
        controller.register_interaction_target(self.id);
        if self.config.preview_refresh == PreviewRefresh::OnSelectionChange {
            self.refresh_tile_preview(scene);
        }
        info!(
            manager = %self.id,
            tile_types = self.tile_types.len(),
            cells = self.config.cells_per_axis(),
            "tile manager ready"
        );
    }

    /// Advance the frame counter.
    pub fn tick(&mut self, _dt: f64) {
        self.frames += 1;
    }

    /// Handle one interaction event.
    ///
    /// `event.is_pressed` is carried for diagnostics only; branching is
    /// driven by `edges`.
    pub fn on_actor_interaction(
        &mut self,
        scene: &mut Scene,
        event: &InteractionEvent,
        edges: InputEdges,
    ) -> InteractionOutcome {
        if self.tile_types.is_empty() {
            return InteractionOutcome::Ignored;
        }
        if !event.location.is_finite() {
            debug!(location = %event.location, "ignoring non-finite hit location");
            return InteractionOutcome::Ignored;
        }

        let snapped = self.snap_to_grid(event.location);
        let cursor = snapped + self.config.grid_offset;

        match edges.action() {
            Some(InteractionAction::Place) => self.place_tile(scene, event, snapped, cursor),
            Some(InteractionAction::Rotate) => self.rotate_placement(),
            Some(InteractionAction::SelectPrevious) => {
                let len = self.tile_types.len();
                self.current_tile_index = if self.current_tile_index == 0 {
                    len - 1
                } else {
                    (self.current_tile_index - 1).min(len - 1)
                };
                self.selection_changed(scene)
            }
            Some(InteractionAction::SelectNext) => {
                let len = self.tile_types.len();
                self.current_tile_index = (self.current_tile_index % len + 1) % len;
                self.selection_changed(scene)
            }
            None => self.hover(scene, cursor),
        }
    }

    /// Copy the selected tile type's mesh and relative scale onto the preview.
    ///
    /// Returns `false` if there is nothing to copy from.
    pub fn refresh_tile_preview(&mut self, scene: &Scene) -> bool {
        let Some(tile_type) = self.selected_tile_type() else {
            debug!(
                index = self.current_tile_index,
                tile_types = self.tile_types.len(),
                "no tile type to preview"
            );
            return false;
        };
        let tile = match scene.tile(tile_type) {
            Ok(tile) => tile,
            Err(e) => {
                debug!(error = %e, "cannot refresh tile preview");
                return false;
            }
        };
        self.tile_preview
            .set_static_mesh(tile.instanced_mesh.mesh.clone());
        self.tile_preview
            .set_relative_scale(tile.instanced_mesh.relative_scale());
        true
    }

    fn place_tile(
        &mut self,
        scene: &mut Scene,
        event: &InteractionEvent,
        snapped: Vec3,
        cursor: Vec3,
    ) -> InteractionOutcome {
        let (x, y) = self.grid_indices(snapped);
        let Some(cell) = self.grid.coord(x, y) else {
            error!(x, y, "out of grid");
            return InteractionOutcome::Rejected(PlacementRejection::OutOfGrid { x, y });
        };
        if let Occupancy::Occupied(occupant) = self.grid.get(cell) {
            warn!(%cell, %occupant, "can't place tile here");
            return InteractionOutcome::Rejected(PlacementRejection::Occupied {
                x: cell.x,
                y: cell.y,
                occupant,
            });
        }

        let outcome = match self.selected_tile_type() {
            None => {
                let rejection = PlacementRejection::InvalidTileIndex {
                    index: self.current_tile_index,
                    len: self.tile_types.len(),
                };
                warn!(%rejection, "placement skipped");
                InteractionOutcome::Rejected(rejection)
            }
            Some(tile_type) => self.add_tile_instance(scene, cell, tile_type, cursor),
        };

        let hit = event
            .hit_actor
            .and_then(|id| scene.actor_label(id))
            .unwrap_or("None");
        info!(
            hit,
            x = event.location.x,
            y = event.location.y,
            z = event.location.z,
            "hit"
        );
        outcome
    }

    fn add_tile_instance(
        &mut self,
        scene: &mut Scene,
        cell: GridCoord,
        tile_type: ActorId,
        cursor: Vec3,
    ) -> InteractionOutcome {
        let rotation = self.placement_rotation();
        let tile = match scene.tile_mut(tile_type) {
            Ok(tile) => tile,
            Err(e) => {
                warn!(error = %e, "selected tile type is gone");
                return InteractionOutcome::Rejected(PlacementRejection::MissingTileType(tile_type));
            }
        };
        if let Err(rejection) = self.grid.occupy(cell, tile_type) {
            return InteractionOutcome::Rejected(rejection);
        }

        let placement = Transform3D::from_position_rotation(cursor, rotation);
        let instance_transform = tile.instanced_mesh.relative.compose(&placement);
        let instance = tile.instanced_mesh.add_instance(instance_transform, true);
        debug!(
            %cell,
            tile_type = %tile.label,
            instance,
            position = %instance_transform.position,
            "tile placed"
        );
        InteractionOutcome::Placed {
            cell,
            tile_type,
            instance,
        }
    }

    fn rotate_placement(&mut self) -> InteractionOutcome {
        let yaw = match self.config.rotation_mode {
            RotationMode::Actor => {
                self.actor_yaw = normalize_yaw(self.actor_yaw + 90.0);
                self.transform.rotation = yaw_rotation(self.actor_yaw);
                self.actor_yaw
            }
            RotationMode::Preview => {
                self.preview_yaw = normalize_yaw(self.preview_yaw + 90.0);
                self.tile_preview
                    .set_relative_rotation(yaw_rotation(self.preview_yaw));
                self.preview_yaw
            }
        };
        debug!(yaw, mode = ?self.config.rotation_mode, "placement rotated");
        InteractionOutcome::Rotated { yaw }
    }

    fn selection_changed(&mut self, scene: &Scene) -> InteractionOutcome {
        self.refresh_tile_preview(scene);
        let index = self.current_tile_index;
        let tile_type = self.tile_types[index];
        info!(
            tile_type = scene.actor_label(tile_type).unwrap_or("<missing>"),
            index,
            "tile type changed"
        );
        InteractionOutcome::SelectionChanged { index, tile_type }
    }

    fn hover(&mut self, scene: &Scene, cursor: Vec3) -> InteractionOutcome {
        if self.config.preview_refresh == PreviewRefresh::EveryHover {
            self.refresh_tile_preview(scene);
        }
        self.grid_selection.set_world_location(&self.transform, cursor);
        self.tile_preview.set_world_location(&self.transform, cursor);
        InteractionOutcome::Hovered { location: cursor }
    }
}

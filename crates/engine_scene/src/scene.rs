//! Scene storage.
//!
//! The [`Scene`] owns every actor that is not driven by game code directly:
//! the ground plane and the tile actors whose instanced meshes receive
//! placements. Other actors (managers, controllers) only reserve an id and a
//! label here so they can be named in logs and hit results.

use std::collections::BTreeMap;

use engine_math::{Transform3D, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actor::{ActorId, ActorIdAllocator};
use crate::component::InstancedMeshComponent;
use crate::error::SceneError;

/// A half-line used for cursor traces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// A ray pointing straight down onto `(x, y)` from `height`.
    #[must_use]
    pub fn straight_down(x: f32, y: f32, height: f32) -> Self {
        Self::new(Vec3::new(x, y, height), Vec3::NEG_Z)
    }

    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a successful line trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// The actor that was hit, if the hit surface belongs to one.
    pub actor: Option<ActorId>,
    /// World-space impact point.
    pub location: Vec3,
}

/// An actor representing one placeable tile type.
///
/// Every tile placed with this type becomes one instance of its
/// [`InstancedMeshComponent`].
#[derive(Debug, Clone)]
pub struct TileActor {
    pub id: ActorId,
    pub label: String,
    /// Actor transform in world space.
    pub transform: Transform3D,
    pub instanced_mesh: InstancedMeshComponent,
}

impl TileActor {
    /// Number of tiles placed with this type.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.instanced_mesh.instance_count()
    }
}

/// Actor storage for the level.
#[derive(Debug)]
pub struct Scene {
    allocator: ActorIdAllocator,
    /// Labels of every live actor.
    labels: BTreeMap<ActorId, String>,
    tiles: BTreeMap<ActorId, TileActor>,
    ground: ActorId,
    ground_height: f32,
}

impl Scene {
    /// Label given to the ground plane actor.
    pub const GROUND_LABEL: &'static str = "Floor";

    /// Create a scene containing only a ground plane at `ground_height`.
    #[must_use]
    pub fn new(ground_height: f32) -> Self {
        let mut allocator = ActorIdAllocator::new();
        let ground = allocator.allocate();
        let mut labels = BTreeMap::new();
        labels.insert(ground, Self::GROUND_LABEL.to_string());
        Self {
            allocator,
            labels,
            tiles: BTreeMap::new(),
            ground,
            ground_height,
        }
    }

    /// Reserve an id for an actor owned outside the scene.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::DuplicateLabel`] if the label is already taken.
    pub fn spawn_actor(&mut self, label: impl Into<String>) -> Result<ActorId, SceneError> {
        let label = label.into();
        if self.find_by_label(&label).is_some() {
            return Err(SceneError::DuplicateLabel(label));
        }
        let id = self.allocator.allocate();
        debug!(actor = %id, %label, "spawned actor");
        self.labels.insert(id, label);
        Ok(id)
    }

    /// Spawn a tile-type actor at the world origin.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::DuplicateLabel`] if the label is already taken.
    pub fn spawn_tile(
        &mut self,
        label: impl Into<String>,
        instanced_mesh: InstancedMeshComponent,
    ) -> Result<ActorId, SceneError> {
        let label = label.into();
        let id = self.spawn_actor(label.clone())?;
        self.tiles.insert(
            id,
            TileActor {
                id,
                label,
                transform: Transform3D::IDENTITY,
                instanced_mesh,
            },
        );
        Ok(id)
    }

    /// Remove an actor. Ids held elsewhere become stale.
    ///
    /// Returns `true` if the actor existed. The ground plane cannot be destroyed.
    pub fn destroy_actor(&mut self, id: ActorId) -> bool {
        if id == self.ground {
            return false;
        }
        self.tiles.remove(&id);
        self.labels.remove(&id).is_some()
    }

    #[must_use]
    pub fn contains(&self, id: ActorId) -> bool {
        self.labels.contains_key(&id)
    }

    #[must_use]
    pub fn actor_label(&self, id: ActorId) -> Option<&str> {
        self.labels.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<ActorId> {
        self.labels
            .iter()
            .find(|(_, l)| l.as_str() == label)
            .map(|(id, _)| *id)
    }

    /// Look up a tile actor.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownActor`] if the id is not live,
    /// [`SceneError::NotATile`] if it names another kind of actor.
    pub fn tile(&self, id: ActorId) -> Result<&TileActor, SceneError> {
        match self.tiles.get(&id) {
            Some(tile) => Ok(tile),
            None if self.contains(id) => Err(SceneError::NotATile(id)),
            None => Err(SceneError::UnknownActor(id)),
        }
    }

    /// Mutable variant of [`Scene::tile`].
    ///
    /// # Errors
    ///
    /// Same as [`Scene::tile`].
    pub fn tile_mut(&mut self, id: ActorId) -> Result<&mut TileActor, SceneError> {
        match self.tiles.get_mut(&id) {
            Some(tile) => Ok(tile),
            None if self.labels.contains_key(&id) => Err(SceneError::NotATile(id)),
            None => Err(SceneError::UnknownActor(id)),
        }
    }

    /// Iterate over all tile actors in id order.
    pub fn tiles(&self) -> impl Iterator<Item = &TileActor> {
        self.tiles.values()
    }

    #[must_use]
    pub fn ground(&self) -> ActorId {
        self.ground
    }

    #[must_use]
    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.labels.len()
    }

    /// Trace `ray` against the ground plane.
    ///
    /// Returns `Ok(None)` when the ray runs parallel to the plane or points
    /// away from it.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidRay`] for a zero or non-finite direction.
    pub fn line_trace(&self, ray: &Ray) -> Result<Option<HitResult>, SceneError> {
        if !ray.direction.is_finite() || ray.direction.length_squared() == 0.0 {
            return Err(SceneError::InvalidRay(format!("{:?}", ray.direction)));
        }
        if ray.direction.z == 0.0 {
            return Ok(None);
        }
        let t = (self.ground_height - ray.origin.z) / ray.direction.z;
        if t < 0.0 {
            return Ok(None);
        }
        Ok(Some(HitResult {
            actor: Some(self.ground),
            location: ray.at(t),
        }))
    }

    /// Clear pending navigation rebuilds, returning how many tile actors had one.
    pub fn flush_navigation(&mut self) -> usize {
        let mut rebuilt = 0;
        for tile in self.tiles.values_mut() {
            if tile.instanced_mesh.take_navigation_dirty() {
                debug!(
                    actor = %tile.id,
                    label = %tile.label,
                    instances = tile.placed_count(),
                    "navigation rebuilt"
                );
                rebuilt += 1;
            }
        }
        rebuilt
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::MeshAsset;

    fn grass() -> InstancedMeshComponent {
        InstancedMeshComponent::new(Some(MeshAsset::new("/Game/Tiles/SM_Grass")))
    }

    #[test]
    fn test_new_scene_has_ground() {
        let scene = Scene::new(0.0);
        assert_eq!(scene.actor_count(), 1);
        assert_eq!(scene.actor_label(scene.ground()), Some(Scene::GROUND_LABEL));
    }

    #[test]
    fn test_spawn_tile_and_lookup() {
        let mut scene = Scene::default();
        let id = scene.spawn_tile("Grass", grass()).unwrap();
        assert_eq!(scene.tile(id).unwrap().label, "Grass");
        assert_eq!(scene.find_by_label("Grass"), Some(id));
        assert_eq!(scene.tiles().count(), 1);
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let mut scene = Scene::default();
        scene.spawn_tile("Grass", grass()).unwrap();
        let err = scene.spawn_tile("Grass", grass()).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateLabel(_)));
    }

    #[test]
    fn test_tile_lookup_errors() {
        let mut scene = Scene::default();
        let manager = scene.spawn_actor("Manager").unwrap();
        assert!(matches!(scene.tile(manager), Err(SceneError::NotATile(_))));
        assert!(matches!(
            scene.tile(ActorId::from_raw(99)),
            Err(SceneError::UnknownActor(_))
        ));
        assert!(matches!(scene.tile_mut(manager), Err(SceneError::NotATile(_))));
        assert!(matches!(
            scene.tile_mut(ActorId::from_raw(99)),
            Err(SceneError::UnknownActor(_))
        ));
        let grass_id = scene.spawn_tile("Grass", grass()).unwrap();
        assert_eq!(scene.tile_mut(grass_id).unwrap().id, grass_id);
    }

    #[test]
    fn test_destroy_actor_makes_id_stale() {
        let mut scene = Scene::default();
        let id = scene.spawn_tile("Grass", grass()).unwrap();
        assert!(scene.destroy_actor(id));
        assert!(!scene.contains(id));
        assert!(scene.tile(id).is_err());
        assert!(!scene.destroy_actor(scene.ground()));
    }

    #[test]
    fn test_line_trace_hits_ground() {
        let scene = Scene::new(0.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 100.0), Vec3::new(1.0, 0.0, -1.0));
        let hit = scene.line_trace(&ray).unwrap().unwrap();
        assert_eq!(hit.actor, Some(scene.ground()));
        assert!(hit.location.abs_diff_eq(Vec3::new(100.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn test_line_trace_misses_when_pointing_away() {
        let scene = Scene::new(0.0);
        let up = Ray::new(Vec3::new(0.0, 0.0, 100.0), Vec3::Z);
        assert!(scene.line_trace(&up).unwrap().is_none());
        let flat = Ray::new(Vec3::new(0.0, 0.0, 100.0), Vec3::X);
        assert!(scene.line_trace(&flat).unwrap().is_none());
    }

    #[test]
    fn test_line_trace_rejects_zero_direction() {
        let scene = Scene::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(matches!(scene.line_trace(&ray), Err(SceneError::InvalidRay(_))));
    }

    #[test]
    fn test_flush_navigation() {
        let mut scene = Scene::default();
        let id = scene.spawn_tile("Grass", grass()).unwrap();
        scene
            .tile_mut(id)
            .unwrap()
            .instanced_mesh
            .add_instance(Transform3D::IDENTITY, true);
        assert_eq!(scene.flush_navigation(), 1);
        assert_eq!(scene.flush_navigation(), 0);
    }
}

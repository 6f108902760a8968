//! Components attached to actors.
//!
//! Every component carries a transform relative to its owning actor. The
//! [`SceneComponent`] trait supplies the world-space helpers on top of that
//! so each component type only has to expose its relative transform.

use engine_math::{Quat, Transform3D, Vec3};
use serde::{Deserialize, Serialize};

use crate::asset::{MaterialAsset, MeshAsset};

/// How a component participates in collision queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionMode {
    /// Ignored by traces and physics.
    NoCollision,
    /// Visible to traces only.
    QueryOnly,
    /// Visible to traces and simulated physics.
    #[default]
    QueryAndPhysics,
}

/// Contract shared by all components attached to an actor.
pub trait SceneComponent {
    /// A human-readable name for this component type.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Transform relative to the owning actor.
    fn relative_transform(&self) -> &Transform3D;

    /// Mutable transform relative to the owning actor.
    fn relative_transform_mut(&mut self) -> &mut Transform3D;

    /// World transform given the owning actor's transform.
    fn world_transform(&self, owner: &Transform3D) -> Transform3D {
        self.relative_transform().compose(owner)
    }

    /// Move the component so that its world-space origin lands on `location`,
    /// keeping its relative rotation and scale.
    fn set_world_location(&mut self, owner: &Transform3D, location: Vec3) {
        self.relative_transform_mut().position = owner.inverse_transform_point(location);
    }

    fn set_relative_rotation(&mut self, rotation: Quat) {
        self.relative_transform_mut().rotation = rotation;
    }

    fn relative_scale(&self) -> Vec3 {
        self.relative_transform().scale
    }

    fn set_relative_scale(&mut self, scale: Vec3) {
        self.relative_transform_mut().scale = scale;
    }
}

/// A single static mesh drawn at the component's transform.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMeshComponent {
    /// Component name, unique within the owning actor.
    pub name: String,
    /// Mesh to draw, if any.
    pub mesh: Option<MeshAsset>,
    /// Material override for slot 0.
    pub material: Option<MaterialAsset>,
    /// Transform relative to the owning actor.
    pub relative: Transform3D,
    pub collision: CollisionMode,
}

impl StaticMeshComponent {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            material: None,
            relative: Transform3D::IDENTITY,
            collision: CollisionMode::default(),
        }
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: MeshAsset) -> Self {
        self.mesh = Some(mesh);
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: MaterialAsset) -> Self {
        self.material = Some(material);
        self
    }

    #[must_use]
    pub fn with_collision(mut self, collision: CollisionMode) -> Self {
        self.collision = collision;
        self
    }

    /// Swap the drawn mesh. Returns `true` if the mesh actually changed.
    pub fn set_static_mesh(&mut self, mesh: Option<MeshAsset>) -> bool {
        if self.mesh == mesh {
            return false;
        }
        self.mesh = mesh;
        true
    }
}

impl SceneComponent for StaticMeshComponent {
    fn type_name() -> &'static str {
        "StaticMeshComponent"
    }

    fn relative_transform(&self) -> &Transform3D {
        &self.relative
    }

    fn relative_transform_mut(&mut self) -> &mut Transform3D {
        &mut self.relative
    }
}

/// One mesh drawn many times in a single batch.
///
/// Instance transforms are stored in component space. Adding an instance can
/// flag the navigation data as stale so the owner rebuilds it once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct InstancedMeshComponent {
    pub mesh: Option<MeshAsset>,
    /// Transform relative to the owning actor.
    pub relative: Transform3D,
    pub collision: CollisionMode,
    instances: Vec<Transform3D>,
    navigation_dirty: bool,
}

impl InstancedMeshComponent {
    #[must_use]
    pub fn new(mesh: Option<MeshAsset>) -> Self {
        Self {
            mesh,
            relative: Transform3D::IDENTITY,
            collision: CollisionMode::default(),
            instances: Vec::new(),
            navigation_dirty: false,
        }
    }

    #[must_use]
    pub fn with_relative(mut self, relative: Transform3D) -> Self {
        self.relative = relative;
        self
    }

    /// Append one instance and return its index.
    pub fn add_instance(&mut self, transform: Transform3D, update_navigation: bool) -> usize {
        self.instances.push(transform);
        if update_navigation {
            self.navigation_dirty = true;
        }
        self.instances.len() - 1
    }

    #[must_use]
    pub fn instance(&self, index: usize) -> Option<&Transform3D> {
        self.instances.get(index)
    }

    #[must_use]
    pub fn instances(&self) -> &[Transform3D] {
        &self.instances
    }

    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_navigation_dirty(&self) -> bool {
        self.navigation_dirty
    }

    /// Clear the navigation flag, returning whether it was set.
    pub fn take_navigation_dirty(&mut self) -> bool {
        std::mem::take(&mut self.navigation_dirty)
    }
}

impl SceneComponent for InstancedMeshComponent {
    fn type_name() -> &'static str {
        "InstancedStaticMeshComponent"
    }

    fn relative_transform(&self) -> &Transform3D {
        &self.relative
    }

    fn relative_transform_mut(&mut self) -> &mut Transform3D {
        &mut self.relative
    }
}

#[cfg(test)]
mod tests {
    use engine_math::yaw_rotation;

    use super::*;

    #[test]
    fn test_set_world_location_with_identity_owner() {
        let mut c = StaticMeshComponent::new("Cursor");
        c.set_world_location(&Transform3D::IDENTITY, Vec3::new(200.0, -100.0, 5.5));
        assert_eq!(c.relative.position, Vec3::new(200.0, -100.0, 5.5));
    }

    #[test]
    fn test_set_world_location_with_rotated_owner() {
        let owner = Transform3D::from_position_rotation(Vec3::new(10.0, 0.0, 0.0), yaw_rotation(90.0));
        let mut c = StaticMeshComponent::new("Cursor");
        let target = Vec3::new(200.0, -100.0, 5.5);
        c.set_world_location(&owner, target);
        let world = c.world_transform(&owner);
        assert!(world.position.abs_diff_eq(target, 1e-3));
    }

    #[test]
    fn test_set_static_mesh_reports_change() {
        let mut c = StaticMeshComponent::new("Preview");
        assert!(c.set_static_mesh(Some(MeshAsset::new("/Game/A"))));
        assert!(!c.set_static_mesh(Some(MeshAsset::new("/Game/A"))));
        assert!(c.set_static_mesh(None));
    }

    #[test]
    fn test_builder_sets_fields() {
        let c = StaticMeshComponent::new("GridMesh")
            .with_mesh(MeshAsset::plane())
            .with_material(MaterialAsset::grid_slot())
            .with_collision(CollisionMode::NoCollision);
        assert_eq!(c.mesh, Some(MeshAsset::plane()));
        assert_eq!(c.material, Some(MaterialAsset::grid_slot()));
        assert_eq!(c.collision, CollisionMode::NoCollision);
    }

    #[test]
    fn test_add_instance_indices_and_navigation() {
        let mut ism = InstancedMeshComponent::new(Some(MeshAsset::new("/Game/Tile")));
        assert_eq!(ism.add_instance(Transform3D::IDENTITY, false), 0);
        assert!(!ism.is_navigation_dirty());
        assert_eq!(ism.add_instance(Transform3D::IDENTITY, true), 1);
        assert!(ism.is_navigation_dirty());
        assert_eq!(ism.instance_count(), 2);
        assert!(ism.take_navigation_dirty());
        assert!(!ism.take_navigation_dirty());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(StaticMeshComponent::type_name(), "StaticMeshComponent");
        assert_eq!(InstancedMeshComponent::type_name(), "InstancedStaticMeshComponent");
    }
}

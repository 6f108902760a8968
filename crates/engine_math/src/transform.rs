//! 3D transform type.
//!
//! [`Transform3D`] represents position, rotation, and scale in 3D space.
//! Actors, scene components, and mesh instances all carry one.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A 3D transform representing position, rotation, and per-axis scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Transform3D {
    /// Position relative to the parent space.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl Transform3D {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a new transform with the given position and default rotation/scale.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Create a new transform with position and rotation.
    #[must_use]
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Create a new transform with only a scale.
    #[must_use]
    pub fn from_scale(scale: Vec3) -> Self {
        Self {
            scale,
            ..Self::IDENTITY
        }
    }

    /// Apply `self` first, then `parent`.
    ///
    /// This is the engine's `A * B` convention: a component's relative
    /// transform composed with its owner's transform yields the component's
    /// world transform. Exact for uniform parent scale.
    #[must_use]
    pub fn compose(&self, parent: &Self) -> Self {
        Self {
            position: parent.transform_point(self.position),
            rotation: (parent.rotation * self.rotation).normalize(),
            scale: self.scale * parent.scale,
        }
    }

    /// Map a point from this transform's local space into its parent space.
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (self.scale * point) + self.position
    }

    /// Map a point from parent space back into this transform's local space.
    ///
    /// Axes with zero scale collapse to zero.
    #[must_use]
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        let unrotated = self.rotation.inverse() * (point - self.position);
        let inv_scale = Vec3::select(
            self.scale.cmpeq(Vec3::ZERO),
            Vec3::ZERO,
            self.scale.recip(),
        );
        unrotated * inv_scale
    }

    /// Returns `true` if both transforms agree within `epsilon` on every
    /// position, rotation, and scale component.
    #[must_use]
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.position.abs_diff_eq(other.position, epsilon)
            && (self.rotation.abs_diff_eq(other.rotation, epsilon)
                || self.rotation.abs_diff_eq(-other.rotation, epsilon))
            && self.scale.abs_diff_eq(other.scale, epsilon)
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

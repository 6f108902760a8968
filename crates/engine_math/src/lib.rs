//! # engine_math
//!
//! Math types for the tile editor engine. Re-exports [`glam`] for linear
//! algebra and defines engine-specific spatial types and grid helpers.

pub mod grid;
pub mod transform;

// Re-export glam types for convenience.
pub use glam::{Quat, Vec3};

pub use grid::{grid_snap, normalize_yaw, yaw_degrees, yaw_rotation};
pub use transform::Transform3D;

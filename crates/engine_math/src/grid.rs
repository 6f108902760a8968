//! Grid snapping and yaw helpers.
//!
//! The engine is Z-up: "yaw" is always a rotation about the +Z axis, expressed
//! in degrees at the API surface.

use glam::{EulerRot, Quat};

/// Snap `value` to the nearest multiple of `grid`.
///
/// Halfway values round up (towards +infinity). A `grid` of zero leaves the
/// value untouched.
#[must_use]
pub fn grid_snap(value: f32, grid: f32) -> f32 {
    if grid == 0.0 {
        return value;
    }
    ((value + 0.5 * grid) / grid).floor() * grid
}

/// Rotation of `degrees` about the vertical axis.
#[must_use]
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_z(degrees.to_radians())
}

/// Extract the yaw component of `rotation`, in degrees.
#[must_use]
pub fn yaw_degrees(rotation: Quat) -> f32 {
    let (yaw, _, _) = rotation.to_euler(EulerRot::ZYX);
    yaw.to_degrees()
}

/// Normalize an angle into `(-180, 180]`.
#[must_use]
pub fn normalize_yaw(degrees: f32) -> f32 {
    let wrapped = degrees % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

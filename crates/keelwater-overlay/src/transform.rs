//! Camera-relative ship-to-world mapping that stays precise far from the
//! world origin.
//!
//! Ship grids can sit at very large coordinates. The grid origin is folded
//! into the translation and the camera subtracted while still in `f64`; only
//! the resulting small offset is narrowed to `f32`. Narrowing any earlier
//! loses the low bits to cancellation.

use glam::{DMat3, DVec3, IVec3, Mat3, Vec3};
use keelwater_math::ShipTransform;

/// Maps grid-local coordinates (`0..=size` per axis) to world space and to
/// camera-relative render space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRelativeTransform {
    linear: DMat3,
    biased_translation: DVec3,
    linear_f32: Mat3,
    camera_translation: Vec3,
}

impl CameraRelativeTransform {
    /// Build the mapping for a ship whose grid starts at ship-space `origin`.
    pub fn new(ship: &ShipTransform, origin: IVec3, camera: DVec3) -> Self {
        let biased_translation = ship.linear * origin.as_dvec3() + ship.translation;
        let camera_translation = (biased_translation - camera).as_vec3();
        Self {
            linear: ship.linear,
            biased_translation,
            linear_f32: ship.linear.as_mat3(),
            camera_translation,
        }
    }

    /// World position of a grid-local point, in `f64`.
    pub fn world_point(&self, local: DVec3) -> DVec3 {
        self.linear * local + self.biased_translation
    }

    /// World height of a grid-local vertex, in `f64`.
    pub fn world_height(&self, local: Vec3) -> f64 {
        self.world_point(local.as_dvec3()).y
    }

    /// Camera-relative render position of a grid-local vertex.
    pub fn to_camera_relative(&self, local: Vec3) -> Vec3 {
        self.linear_f32 * local + self.camera_translation
    }

    /// Grid-space direction rotated into world orientation and normalized.
    pub fn rotate_normal(&self, normal: Vec3) -> Vec3 {
        (self.linear * normal.as_dvec3())
            .normalize_or_zero()
            .as_vec3()
    }
}

use glam::{DMat3, DQuat, DVec3};

use crate::Aabb64;

/// Ship-to-world affine map: a 3×3 linear part plus a translation, in f64.
///
/// `world = linear * ship + translation`. Ship-space coordinates can be very
/// large (ships live far from the world origin in their own address space),
/// so everything here stays in double precision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipTransform {
    /// Rotation and scale.
    pub linear: DMat3,
    /// World position of the ship-space origin.
    pub translation: DVec3,
}

impl ShipTransform {
    /// The identity map (ship space == world space).
    pub const IDENTITY: Self = Self {
        linear: DMat3::IDENTITY,
        translation: DVec3::ZERO,
    };

    /// Create a transform from an explicit linear part and translation.
    pub fn new(linear: DMat3, translation: DVec3) -> Self {
        Self {
            linear,
            translation,
        }
    }

    /// Create a transform from a rotation, uniform scale, and translation.
    pub fn from_rotation_translation(rotation: DQuat, scale: f64, translation: DVec3) -> Self {
        Self {
            linear: DMat3::from_quat(rotation) * scale,
            translation,
        }
    }

    /// Build a transform that maps ship point `pivot` onto world point `world_pos`
    /// after rotating about it.
    pub fn about_pivot(rotation: DQuat, pivot: DVec3, world_pos: DVec3) -> Self {
        let linear = DMat3::from_quat(rotation);
        Self {
            linear,
            translation: world_pos - linear * pivot,
        }
    }

    /// Map a ship-space point into world space.
    pub fn transform_point(&self, p: DVec3) -> DVec3 {
        self.linear * p + self.translation
    }

    /// World-space AABB of the ship-space box `[min, max]`.
    pub fn world_aabb_of_box(&self, min: DVec3, max: DVec3) -> Aabb64 {
        let corners = (0..8).map(|i| {
            DVec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            )
        });
        let world = corners.map(|c| self.transform_point(c));
        // Eight corners always exist, so the fold has a seed.
        Aabb64::from_points(world).unwrap_or(Aabb64::new(self.translation, self.translation))
    }
}

impl Default for ShipTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//! Double-precision world-space primitives for ships: bounding boxes and ship-to-world affine maps.

mod aabb;
mod affine;

pub use aabb::Aabb64;
pub use affine::ShipTransform;

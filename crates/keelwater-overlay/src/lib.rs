//! Underwater overlay for ships: boundary detection between outside water and
//! ship pockets, waterline clipping, and camera-relative vertex output.

pub mod classification;
pub mod clip;
pub mod emit;
pub mod face;
pub mod overlay;
pub mod scanner;
pub mod selector;
pub mod surface;
pub mod transform;
pub mod world;

pub use classification::{ClassificationCache, ShipClassification};
pub use clip::{ClipVertex, Clipped, MAX_POLYGON_VERTICES, Polygon, clip_below_surface};
pub use emit::{FULL_BRIGHT, FaceInfo, OverlayEmitter, OverlayMesh, OverlaySink, OverlayVertex};
pub use face::{FaceDirection, FaceMask, boundary_quad};
pub use overlay::{FrameSkip, FrameStats, UnderwaterOverlay};
pub use scanner::{BoundaryFaceScanner, BoundaryVoxel, boundary_faces};
pub use selector::ShipSelector;
pub use surface::{SurfaceCacheStats, WaterSurfaceResolver};
pub use transform::CameraRelativeTransform;
pub use world::{
    DEFAULT_WATER_TINT, ShipId, ShipInfo, ShipRegistry, SnapshotProvider, WorldView,
};

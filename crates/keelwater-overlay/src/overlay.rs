//! The per-frame underwater overlay pipeline.

use glam::DVec3;
use keelwater_config::OverlayConfig;
use tracing::{info, trace};

use crate::classification::ClassificationCache;
use crate::clip::{Clipped, clip_below_surface};
use crate::emit::{OverlayEmitter, OverlaySink};
use crate::face::boundary_quad;
use crate::scanner::BoundaryFaceScanner;
use crate::selector::ShipSelector;
use crate::surface::WaterSurfaceResolver;
use crate::transform::CameraRelativeTransform;
use crate::world::{ShipRegistry, SnapshotProvider, WorldView};

/// Why a frame produced nothing before entering the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameSkip {
    /// The overlay is switched off.
    Disabled,
    /// The camera is below a liquid surface.
    CameraSubmerged,
    /// The camera position is not finite.
    InvalidCamera,
}

/// What one call to [`UnderwaterOverlay::render_overlay`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Set when the whole frame was skipped by a guard.
    pub skipped: Option<FrameSkip>,
    /// Ships returned by the selector.
    pub ships_selected: usize,
    /// Ships that had a snapshot and were scanned.
    pub ships_rendered: usize,
    /// Ships without a snapshot.
    pub ships_missing_snapshot: usize,
    /// Exterior submerged voxels visited.
    pub qualifying_voxels: usize,
    /// Voxels with boundary faces but no liquid surface nearby.
    pub voxels_without_surface: usize,
    /// Faces emitted unclipped.
    pub faces_whole: usize,
    /// Faces cut at the waterline.
    pub faces_clipped: usize,
    /// Faces entirely above the waterline.
    pub faces_culled: usize,
    /// Vertices handed to the sink.
    pub vertices_emitted: usize,
}

impl FrameStats {
    /// Faces handed to the sink.
    pub fn faces_emitted(&self) -> usize {
        self.faces_whole + self.faces_clipped
    }
}

/// Owns the caches that persist across frames and runs the pipeline.
#[derive(Debug)]
pub struct UnderwaterOverlay {
    config: OverlayConfig,
    selector: ShipSelector,
    classifications: ClassificationCache,
    surfaces: WaterSurfaceResolver,
    announced_active: bool,
    announced_faces: bool,
}

impl UnderwaterOverlay {
    /// Create an overlay with empty caches.
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            selector: ShipSelector::new(config.max_ships),
            surfaces: WaterSurfaceResolver::new(config.surface_cache_capacity),
            classifications: ClassificationCache::new(),
            config,
            announced_active: false,
            announced_faces: false,
        }
    }

    /// Current settings.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Replace the settings, keeping cached classifications and surfaces.
    pub fn set_config(&mut self, config: OverlayConfig) {
        self.selector = ShipSelector::new(config.max_ships);
        self.surfaces.set_capacity(config.surface_cache_capacity);
        self.config = config;
    }

    /// Per-ship classification cache.
    pub fn classifications(&self) -> &ClassificationCache {
        &self.classifications
    }

    /// Surface height cache.
    pub fn surfaces(&self) -> &WaterSurfaceResolver {
        &self.surfaces
    }

    /// Run the full pipeline for one frame and push the overlay into `sink`.
    ///
    /// Never fails: ships without a snapshot, voxels without a nearby
    /// surface, and faces above the waterline are skipped and counted.
    pub fn render_overlay<W, R, P, S>(
        &mut self,
        world: &W,
        ships: &R,
        snapshots: &P,
        camera: DVec3,
        sink: &mut S,
    ) -> FrameStats
    where
        W: WorldView + ?Sized,
        R: ShipRegistry + ?Sized,
        P: SnapshotProvider + ?Sized,
        S: OverlaySink + ?Sized,
    {
        let mut stats = FrameStats::default();
        if !self.config.enabled {
            stats.skipped = Some(FrameSkip::Disabled);
            return stats;
        }
        if !camera.is_finite() {
            stats.skipped = Some(FrameSkip::InvalidCamera);
            return stats;
        }

        self.surfaces.sync_context(world.context_id());

        if self.config.skip_when_camera_submerged && camera_submerged(world, camera) {
            stats.skipped = Some(FrameSkip::CameraSubmerged);
            return stats;
        }

        let selected = self.selector.select_closest(ships.live_ships(), camera);
        stats.ships_selected = selected.len();
        if !selected.is_empty() && !self.announced_active {
            self.announced_active = true;
            info!(ships = selected.len(), "Underwater overlay active");
        }

        let face_epsilon = self.config.face_epsilon;
        let surface_epsilon = self.config.surface_epsilon;

        for ship in selected {
            let Some(snapshot) = snapshots.snapshot(ship.id) else {
                stats.ships_missing_snapshot += 1;
                trace!(ship = ship.id.0, "No snapshot, skipping ship");
                continue;
            };
            stats.ships_rendered += 1;

            let classification = self.classifications.ensure(ship.id, snapshot, world);
            let transform =
                CameraRelativeTransform::new(&ship.transform, snapshot.bounds().origin, camera);
            let tint = world.water_tint(ship.position_in_world.floor().as_ivec3());
            let emitter = OverlayEmitter::new(tint, self.config.overlay_alpha);

            for voxel in BoundaryFaceScanner::new(snapshot, classification.penetrable()) {
                stats.qualifying_voxels += 1;
                if voxel.faces.is_empty() {
                    continue;
                }

                let center = transform.world_point(voxel.local.as_dvec3() + DVec3::splat(0.5));
                let Some(surface) = self.surfaces.resolve(world, center) else {
                    stats.voxels_without_surface += 1;
                    trace!(ship = ship.id.0, index = voxel.index, "No liquid surface near voxel");
                    continue;
                };

                for direction in voxel.faces.iter() {
                    let quad = boundary_quad(voxel.local, direction, face_epsilon);
                    let clipped = clip_below_surface(
                        &quad,
                        |v| transform.world_height(v.position),
                        surface,
                        surface_epsilon,
                    );
                    match clipped {
                        Clipped::Culled => stats.faces_culled += 1,
                        Clipped::Whole(polygon) => {
                            stats.faces_whole += 1;
                            stats.vertices_emitted +=
                                emitter.emit(sink, &transform, &polygon, direction, false);
                        }
                        Clipped::Partial(polygon) => {
                            stats.faces_clipped += 1;
                            stats.vertices_emitted +=
                                emitter.emit(sink, &transform, &polygon, direction, true);
                        }
                    }
                }
            }
        }

        if stats.faces_emitted() > 0 && !self.announced_faces {
            self.announced_faces = true;
            info!(
                faces = stats.faces_emitted(),
                vertices = stats.vertices_emitted,
                "Underwater overlay emitted faces"
            );
        }
        stats
    }
}

/// The camera is inside a liquid cell and below that cell's surface.
fn camera_submerged<W: WorldView + ?Sized>(world: &W, camera: DVec3) -> bool {
    let cell = camera.floor().as_ivec3();
    world.is_liquid(cell)
        && camera.y < f64::from(cell.y) + world.fractional_liquid_height(cell)
}

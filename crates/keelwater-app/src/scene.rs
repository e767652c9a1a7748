//! Synthetic scene: a flat ocean and a rocking box hull with a glass window.

use glam::{DQuat, DVec3, IVec3, UVec3};
use keelwater_math::ShipTransform;
use keelwater_overlay::{ShipId, ShipInfo, WorldView};
use keelwater_voxel::{BitSet, BlockClass, GridBounds, RenderLayer, SnapshotError, VoxelGridSnapshot};
use rustc_hash::FxHashMap;

/// Liquid fills every cell below this height.
pub const SEA_LEVEL: i32 = 63;

/// Ship-space origin of the hull grid, far out where ship blocks are stored.
pub const SHIPYARD_ORIGIN: IVec3 = IVec3::new(28_000_000, 128, 28_000_000);

/// Hull grid size: one cell of water margin, a one-cell wall, and the pocket.
pub const HULL_SIZE: UVec3 = UVec3::new(12, 10, 20);

/// World position the hull's center is anchored to.
pub const ANCHOR: DVec3 = DVec3::new(1_024.0, 63.0, -2_048.0);

pub const HULL_SHIP: ShipId = ShipId(1);
pub const GHOST_SHIP: ShipId = ShipId(2);

/// Flat ocean with the hull's blocks stored at shipyard coordinates.
pub struct OceanWorld {
    pub context: u64,
    pub top_fraction: f64,
    hull_blocks: FxHashMap<IVec3, RenderLayer>,
}

impl OceanWorld {
    pub fn new() -> Self {
        let bounds = hull_bounds();
        let mut hull_blocks = FxHashMap::default();
        for i in 0..bounds.volume() {
            let local = bounds.local(i);
            if is_wall(local) {
                let layer = if is_window(local) {
                    RenderLayer::Translucent
                } else {
                    RenderLayer::Opaque
                };
                hull_blocks.insert(bounds.block_of(local), layer);
            }
        }
        Self {
            context: 1,
            top_fraction: 0.875,
            hull_blocks,
        }
    }
}

impl WorldView for OceanWorld {
    fn context_id(&self) -> u64 {
        self.context
    }

    fn classify(&self, pos: IVec3) -> BlockClass {
        if self.is_liquid(pos) {
            return BlockClass::Liquid;
        }
        self.hull_blocks
            .get(&pos)
            .map_or(BlockClass::Empty, |&layer| BlockClass::Block(layer))
    }

    fn is_liquid(&self, pos: IVec3) -> bool {
        pos.y < SEA_LEVEL
    }

    fn fractional_liquid_height(&self, pos: IVec3) -> f64 {
        if pos.y == SEA_LEVEL - 1 {
            self.top_fraction
        } else {
            1.0
        }
    }

    fn max_build_height(&self) -> i32 {
        320
    }
}

pub fn hull_bounds() -> GridBounds {
    GridBounds::new(SHIPYARD_ORIGIN, HULL_SIZE)
}

fn on_layer(local: UVec3, layer: u32) -> bool {
    let far = HULL_SIZE - UVec3::splat(1 + layer);
    let lo = local.cmpge(UVec3::splat(layer)).all() && local.cmple(far).all();
    let on = local.cmpeq(UVec3::splat(layer)).any() || local.cmpeq(far).any();
    lo && on
}

fn is_margin(local: UVec3) -> bool {
    on_layer(local, 0)
}

fn is_wall(local: UVec3) -> bool {
    on_layer(local, 1)
}

/// A band of glass along the +X wall, below the waterline.
fn is_window(local: UVec3) -> bool {
    local.x == HULL_SIZE.x - 2 && (2..=3).contains(&local.y) && (4..16).contains(&local.z)
}

/// Classification of the hull as the pocket flood-fill would produce it.
///
/// With `flooded_bow`, the front three pocket rows are reported as outside
/// water, as after a breach. Pass a new revision along with it.
pub fn hull_snapshot(revision: u64, flooded_bow: bool) -> Result<VoxelGridSnapshot, SnapshotError> {
    let bounds = hull_bounds();
    let n = bounds.volume();
    let mut open = BitSet::new(n);
    let mut interior = BitSet::new(n);
    let mut reachable = BitSet::new(n);

    for i in 0..n {
        let local = bounds.local(i);
        if is_margin(local) {
            open.insert(i);
            reachable.insert(i);
        } else if !is_wall(local) {
            open.insert(i);
            if flooded_bow && local.z <= 4 {
                reachable.insert(i);
            } else {
                interior.insert(i);
            }
        }
    }
    VoxelGridSnapshot::new(bounds, open, interior, reachable, revision)
}

/// Hull pose at `frame`: rocking roll about the keel axis, anchored at [`ANCHOR`].
pub fn hull_transform(frame: u32) -> ShipTransform {
    let roll = 0.12 * (frame as f64 * 0.7).sin();
    let rotation = DQuat::from_rotation_y(0.35) * DQuat::from_rotation_z(roll);
    let pivot = SHIPYARD_ORIGIN.as_dvec3() + HULL_SIZE.as_dvec3() * 0.5;
    ShipTransform::about_pivot(rotation, pivot, ANCHOR)
}

pub fn ship_info(id: ShipId, transform: ShipTransform) -> ShipInfo {
    let bounds = hull_bounds();
    let min = bounds.origin.as_dvec3();
    let max = min + bounds.size.as_dvec3();
    ShipInfo {
        id,
        transform,
        world_aabb: Some(transform.world_aabb_of_box(min, max)),
        position_in_world: transform.transform_point((min + max) * 0.5),
    }
}

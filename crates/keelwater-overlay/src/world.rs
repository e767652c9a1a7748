//! Collaborator interfaces: the world, the ship registry, and the snapshot
//! provider. The overlay borrows all three read-only for one frame.

use std::collections::HashMap;
use std::hash::BuildHasher;

use glam::{DVec3, IVec3};
use keelwater_math::{Aabb64, ShipTransform};
use keelwater_voxel::{BlockClass, VoxelGridSnapshot};

/// Biome-independent fallback water color (`0xRRGGBB`).
pub const DEFAULT_WATER_TINT: u32 = 0x3F_76_E4;

/// Opaque ship handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShipId(pub u64);

/// Per-block world queries.
///
/// Ship blocks are addressed by their ship-space block coordinates, world
/// liquid by world block coordinates. Both go through the same view.
pub trait WorldView {
    /// Identity of the loaded world. A change invalidates cached surfaces.
    fn context_id(&self) -> u64;

    /// Liquid presence, else the render layer of the block at `pos`.
    fn classify(&self, pos: IVec3) -> BlockClass;

    /// Whether the cell at `pos` carries liquid.
    fn is_liquid(&self, pos: IVec3) -> bool;

    /// Height of the liquid inside the cell at `pos`, in `[0, 1]`.
    fn fractional_liquid_height(&self, pos: IVec3) -> f64;

    /// Exclusive upper bound of the buildable column.
    fn max_build_height(&self) -> i32 {
        i32::MAX
    }

    /// Water color at `pos` as `0xRRGGBB`.
    fn water_tint(&self, _pos: IVec3) -> u32 {
        DEFAULT_WATER_TINT
    }
}

/// A live ship as reported by the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct ShipInfo {
    /// Ship handle.
    pub id: ShipId,
    /// Ship-space to world-space map.
    pub transform: ShipTransform,
    /// World bounds, if the registry has computed them.
    pub world_aabb: Option<Aabb64>,
    /// Ship position in world space, used for the water tint lookup.
    pub position_in_world: DVec3,
}

/// Enumerates the ships alive this frame.
pub trait ShipRegistry {
    /// All live ships, in registry order.
    fn live_ships(&self) -> &[ShipInfo];
}

impl ShipRegistry for [ShipInfo] {
    fn live_ships(&self) -> &[ShipInfo] {
        self
    }
}

impl ShipRegistry for Vec<ShipInfo> {
    fn live_ships(&self) -> &[ShipInfo] {
        self
    }
}

/// Supplies the reachability classification of a ship.
pub trait SnapshotProvider {
    /// Latest snapshot for `id`, or `None` if none was computed yet.
    fn snapshot(&self, id: ShipId) -> Option<&VoxelGridSnapshot>;
}

impl<S: BuildHasher> SnapshotProvider for HashMap<ShipId, VoxelGridSnapshot, S> {
    fn snapshot(&self, id: ShipId) -> Option<&VoxelGridSnapshot> {
        self.get(&id)
    }
}

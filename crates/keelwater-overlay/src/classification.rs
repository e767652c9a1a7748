//! Per-ship "penetrable solid" classification, rebuilt when the ship's
//! geometry revision or bounds change.

use glam::UVec3;
use keelwater_voxel::{BitSet, GridBounds, VoxelGridSnapshot};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::world::{ShipId, WorldView};

/// Cells of a ship grid holding a non-liquid block whose render layer can be
/// seen through (translucent, cutout, cutout-mipped).
#[derive(Clone, Debug)]
pub struct ShipClassification {
    geometry_revision: u64,
    bounds: GridBounds,
    penetrable: BitSet,
}

impl ShipClassification {
    fn empty() -> Self {
        Self {
            geometry_revision: 0,
            bounds: GridBounds::default(),
            penetrable: BitSet::new(0),
        }
    }

    /// Returns `true` if this classification no longer describes `snapshot`.
    pub fn is_stale(&self, snapshot: &VoxelGridSnapshot) -> bool {
        self.bounds != snapshot.bounds()
            || self.geometry_revision != snapshot.geometry_revision()
            || self.penetrable.len() != snapshot.volume()
    }

    /// Revision of the snapshot this was built from.
    pub fn geometry_revision(&self) -> u64 {
        self.geometry_revision
    }

    /// Bounds of the snapshot this was built from.
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Penetrable-solid bit per grid cell.
    pub fn penetrable(&self) -> &BitSet {
        &self.penetrable
    }

    fn rebuild<W: WorldView + ?Sized>(&mut self, snapshot: &VoxelGridSnapshot, world: &W) {
        let bounds = snapshot.bounds();
        let volume = snapshot.volume();
        if self.penetrable.len() == volume {
            self.penetrable.clear();
        } else {
            self.penetrable = BitSet::new(volume);
        }

        let mut index = 0;
        for z in 0..bounds.size.z {
            for y in 0..bounds.size.y {
                for x in 0..bounds.size.x {
                    let pos = bounds.block_of(UVec3::new(x, y, z));
                    // Liquid cells are already covered by open/water-reachable.
                    if world.classify(pos).is_penetrable_solid() {
                        self.penetrable.insert(index);
                    }
                    index += 1;
                }
            }
        }

        self.bounds = bounds;
        self.geometry_revision = snapshot.geometry_revision();
    }
}

/// Owned store of ship classifications, keyed by ship id.
///
/// Entries are created on first use and refreshed in place; ids that stop
/// appearing are simply never queried again.
#[derive(Debug, Default)]
pub struct ClassificationCache {
    entries: FxHashMap<ShipId, ShipClassification>,
    rebuilds: u64,
}

impl ClassificationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classification of `ship` matching `snapshot`, rebuilding it from world
    /// queries when the bounds, revision, or length disagree.
    pub fn ensure<W: WorldView + ?Sized>(
        &mut self,
        ship: ShipId,
        snapshot: &VoxelGridSnapshot,
        world: &W,
    ) -> &ShipClassification {
        let entry = self
            .entries
            .entry(ship)
            .or_insert_with(ShipClassification::empty);

        if entry.is_stale(snapshot) {
            entry.rebuild(snapshot, world);
            self.rebuilds += 1;
            debug!(
                ship = ship.0,
                revision = entry.geometry_revision,
                volume = entry.penetrable.len(),
                penetrable = entry.penetrable.count_ones(),
                "Rebuilt ship classification"
            );
        }
        entry
    }

    /// Cached classification of `ship`, without validation.
    pub fn get(&self, ship: ShipId) -> Option<&ShipClassification> {
        self.entries.get(&ship)
    }

    /// Total rebuilds since creation.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Number of ships with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no ship has an entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use glam::IVec3;
    use keelwater_voxel::{BlockClass, RenderLayer};

    use super::*;

    struct GlassWorld {
        classify_calls: Cell<usize>,
    }

    impl WorldView for GlassWorld {
        fn context_id(&self) -> u64 {
            0
        }

        fn classify(&self, pos: IVec3) -> BlockClass {
            self.classify_calls.set(self.classify_calls.get() + 1);
            match pos.x {
                10 => BlockClass::Block(RenderLayer::Translucent),
                11 => BlockClass::Block(RenderLayer::Opaque),
                12 => BlockClass::Liquid,
                13 => BlockClass::Block(RenderLayer::CutoutMipped),
                _ => BlockClass::Empty,
            }
        }

        fn is_liquid(&self, pos: IVec3) -> bool {
            pos.x == 12
        }

        fn fractional_liquid_height(&self, _pos: IVec3) -> f64 {
            1.0
        }
    }

    fn world() -> GlassWorld {
        GlassWorld {
            classify_calls: Cell::new(0),
        }
    }

    fn snapshot(origin_x: i32, size_x: u32, revision: u64) -> VoxelGridSnapshot {
        let bounds = GridBounds::new(IVec3::new(origin_x, 0, 0), UVec3::new(size_x, 1, 1));
        let n = bounds.volume();
        VoxelGridSnapshot::new(bounds, BitSet::new(n), BitSet::new(n), BitSet::new(n), revision)
            .unwrap()
    }

    #[test]
    fn test_penetrable_bits_follow_render_layer() {
        let world = world();
        let mut cache = ClassificationCache::new();
        let class = cache.ensure(ShipId(1), &snapshot(10, 5, 1), &world);
        let bits: Vec<usize> = class.penetrable().ones().collect();
        assert_eq!(bits, vec![0, 3], "translucent and cutout-mipped only");
        assert_eq!(class.penetrable().len(), 5);
        assert_eq!(world.classify_calls.get(), 5);
    }

    #[test]
    fn test_unchanged_snapshot_is_not_rebuilt() {
        let world = world();
        let mut cache = ClassificationCache::new();
        let snap = snapshot(10, 4, 3);
        cache.ensure(ShipId(1), &snap, &world);
        cache.ensure(ShipId(1), &snap, &world);
        assert_eq!(cache.rebuild_count(), 1);
        assert_eq!(world.classify_calls.get(), 4);
    }

    #[test]
    fn test_revision_bump_rebuilds_with_same_bounds() {
        let world = world();
        let mut cache = ClassificationCache::new();
        cache.ensure(ShipId(1), &snapshot(10, 4, 3), &world);
        let class = cache.ensure(ShipId(1), &snapshot(10, 4, 4), &world);
        assert_eq!(class.geometry_revision(), 4);
        assert_eq!(cache.rebuild_count(), 2);
        assert_eq!(world.classify_calls.get(), 8);
    }

    #[test]
    fn test_bounds_change_rebuilds() {
        let world = world();
        let mut cache = ClassificationCache::new();
        cache.ensure(ShipId(1), &snapshot(10, 4, 3), &world);
        let class = cache.ensure(ShipId(1), &snapshot(9, 4, 3), &world);
        let bits: Vec<usize> = class.penetrable().ones().collect();
        assert_eq!(bits, vec![1]);
        assert_eq!(class.bounds().origin.x, 9);
        assert_eq!(cache.rebuild_count(), 2);
    }

    #[test]
    fn test_ships_are_independent() {
        let world = world();
        let mut cache = ClassificationCache::new();
        cache.ensure(ShipId(1), &snapshot(10, 2, 1), &world);
        cache.ensure(ShipId(2), &snapshot(10, 2, 1), &world);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.rebuild_count(), 2);
        assert!(cache.get(ShipId(3)).is_none());
    }
}

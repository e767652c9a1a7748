//! Resolution and caching of the world-space liquid surface height near a point.

use glam::{DVec3, IVec3};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::world::WorldView;

/// Hit/miss counters and current size of the surface cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceCacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that scanned the liquid column.
    pub misses: u64,
    /// Entries currently cached.
    pub len: usize,
}

/// Finds the top of the liquid column next to a world point.
///
/// Heights are cached per liquid cell. The cache is bounded and cleared
/// wholesale when full or when the world context changes; entries are never
/// evicted individually.
#[derive(Debug)]
pub struct WaterSurfaceResolver {
    heights: FxHashMap<i64, f64>,
    capacity: usize,
    context: Option<u64>,
    hits: u64,
    misses: u64,
}

impl WaterSurfaceResolver {
    /// Create a resolver holding at most `capacity` cached columns.
    pub fn new(capacity: usize) -> Self {
        Self {
            heights: FxHashMap::default(),
            capacity,
            context: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Clear the cache if `context_id` differs from the one it was filled
    /// under. Returns `true` if it was cleared.
    pub fn sync_context(&mut self, context_id: u64) -> bool {
        if self.context == Some(context_id) {
            return false;
        }
        let had_context = self.context.is_some();
        self.context = Some(context_id);
        if had_context {
            debug!(
                context = context_id,
                dropped = self.heights.len(),
                "World context changed, clearing surface cache"
            );
        }
        self.heights.clear();
        had_context
    }

    /// Change the capacity. Clears the cache if it no longer fits.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.heights.len() > capacity {
            self.heights.clear();
        }
    }

    /// Counters and size.
    pub fn stats(&self) -> SurfaceCacheStats {
        SurfaceCacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.heights.len(),
        }
    }

    /// World-space height of the liquid surface above the cell containing
    /// `point`, or `None` if no liquid is found nearby.
    ///
    /// The containing cell is probed first, then the cell below, then the
    /// cell above; the first liquid one is scanned upward to the first dry
    /// cell or the build ceiling.
    pub fn resolve<W: WorldView + ?Sized>(&mut self, world: &W, point: DVec3) -> Option<f64> {
        let cell = block_containing(point)?;
        let below = cell.y.checked_sub(1).map(|y| IVec3::new(cell.x, y, cell.z));
        let above = cell.y.checked_add(1).map(|y| IVec3::new(cell.x, y, cell.z));
        let liquid = [Some(cell), below, above]
            .into_iter()
            .flatten()
            .find(|&p| world.is_liquid(p))?;

        let key = pack_block_pos(liquid);
        if let Some(&height) = self.heights.get(&key) {
            self.hits += 1;
            return Some(height);
        }
        self.misses += 1;

        let height = scan_column(world, liquid);
        if self.heights.len() >= self.capacity {
            debug!(capacity = self.capacity, "Surface cache full, clearing");
            self.heights.clear();
        }
        self.heights.insert(key, height);
        Some(height)
    }
}

/// Block cell containing `point`, or `None` if the point is not finite or
/// lies outside the `i32` block range.
fn block_containing(point: DVec3) -> Option<IVec3> {
    let floor = point.floor();
    let in_range = |v: f64| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&v);
    floor.to_array().into_iter().all(in_range).then(|| floor.as_ivec3())
}

/// Walks up from a liquid cell and returns `top.y + fractional height(top)`
/// for the highest liquid cell below the first dry one.
fn scan_column<W: WorldView + ?Sized>(world: &W, start: IVec3) -> f64 {
    let ceiling = world.max_build_height();
    let mut top = start;
    while let Some(y) = top.y.checked_add(1) {
        let next = IVec3::new(top.x, y, top.z);
        if y >= ceiling || !world.is_liquid(next) {
            break;
        }
        top = next;
    }
    f64::from(top.y) + world.fractional_liquid_height(top)
}

/// Packs a block position into 64 bits: 26 bits of x, 26 bits of z, 12 bits of y.
pub fn pack_block_pos(pos: IVec3) -> i64 {
    const XZ_MASK: i64 = (1 << 26) - 1;
    const Y_MASK: i64 = (1 << 12) - 1;
    ((i64::from(pos.x) & XZ_MASK) << 38)
        | ((i64::from(pos.z) & XZ_MASK) << 12)
        | (i64::from(pos.y) & Y_MASK)
}

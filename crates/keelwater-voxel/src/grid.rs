//! Bounds and flat indexing of a ship's classification grid.
//!
//! Cells are addressed by local coordinates `(lx, ly, lz)` in `[0, size)` and
//! flattened with x varying fastest: `lz * sy * sx + ly * sx + lx`.

use glam::{IVec3, UVec3};
use serde::{Deserialize, Serialize};

/// Integer origin and size of a ship's classification grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    /// Ship-space block coordinate of local cell `(0, 0, 0)`.
    pub origin: IVec3,
    /// Number of cells along each axis.
    pub size: UVec3,
}

impl GridBounds {
    /// Creates bounds from an origin and a size.
    pub fn new(origin: IVec3, size: UVec3) -> Self {
        Self { origin, size }
    }

    /// Total cell count, or `None` if it does not fit in `usize`.
    pub fn checked_volume(&self) -> Option<usize> {
        (self.size.x as usize)
            .checked_mul(self.size.y as usize)?
            .checked_mul(self.size.z as usize)
    }

    /// Total cell count. Saturates instead of overflowing.
    pub fn volume(&self) -> usize {
        self.checked_volume().unwrap_or(usize::MAX)
    }

    /// Stride between consecutive `y` rows.
    pub fn stride_y(&self) -> usize {
        self.size.x as usize
    }

    /// Stride between consecutive `z` slices.
    pub fn stride_z(&self) -> usize {
        self.size.x as usize * self.size.y as usize
    }

    /// Flat index of a local cell. The caller guarantees `local < size`.
    pub fn index(&self, local: UVec3) -> usize {
        debug_assert!(local.cmplt(self.size).all(), "local cell out of bounds");
        local.z as usize * self.stride_z() + local.y as usize * self.stride_y() + local.x as usize
    }

    /// Local coordinates of a flat index. The caller guarantees `index < volume`.
    pub fn local(&self, index: usize) -> UVec3 {
        let sx = self.size.x as usize;
        let sy = self.size.y as usize;
        let lx = index % sx;
        let t = index / sx;
        UVec3::new(lx as u32, (t % sy) as u32, (t / sy) as u32)
    }

    /// Returns `true` if a signed local coordinate lies inside the grid.
    pub fn contains_local(&self, local: IVec3) -> bool {
        local.cmpge(IVec3::ZERO).all() && local.as_uvec3().cmplt(self.size).all()
    }

    /// Ship-space block coordinate of a local cell.
    pub fn block_of(&self, local: UVec3) -> IVec3 {
        self.origin + local.as_ivec3()
    }
}

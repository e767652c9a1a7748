//! Externally computed reachability classification of a ship grid.
//!
//! A snapshot is produced by the pocket flood-fill (not part of this crate)
//! and handed to the overlay read-only. Construction validates that every
//! layer covers exactly the grid volume, so consumers can index all three
//! layers with the same flat index without further checks.

use thiserror::Error;

use crate::bitset::BitSet;
use crate::grid::GridBounds;

/// Errors raised when assembling a snapshot from raw layers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// A classification layer's length disagrees with the grid volume.
    #[error("{layer} layer has {actual} bits, grid volume is {expected}")]
    LayerLengthMismatch {
        /// Which layer was wrong.
        layer: &'static str,
        /// Grid volume.
        expected: usize,
        /// Bit length supplied.
        actual: usize,
    },
    /// The grid volume does not fit in `usize`.
    #[error("grid volume overflows usize")]
    VolumeOverflow,
}

/// Per-voxel `open` / `interior` / `water-reachable` classification plus the
/// geometry revision it was computed for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGridSnapshot {
    bounds: GridBounds,
    open: BitSet,
    interior: BitSet,
    water_reachable: BitSet,
    geometry_revision: u64,
}

impl VoxelGridSnapshot {
    /// Assembles a snapshot, checking that each layer spans the grid volume.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::VolumeOverflow`] for grids too large to index,
    /// or [`SnapshotError::LayerLengthMismatch`] naming the first layer whose
    /// length differs from the volume.
    pub fn new(
        bounds: GridBounds,
        open: BitSet,
        interior: BitSet,
        water_reachable: BitSet,
        geometry_revision: u64,
    ) -> Result<Self, SnapshotError> {
        let expected = bounds
            .checked_volume()
            .ok_or(SnapshotError::VolumeOverflow)?;
        for (layer, set) in [
            ("open", &open),
            ("interior", &interior),
            ("water_reachable", &water_reachable),
        ] {
            if set.len() != expected {
                return Err(SnapshotError::LayerLengthMismatch {
                    layer,
                    expected,
                    actual: set.len(),
                });
            }
        }
        Ok(Self {
            bounds,
            open,
            interior,
            water_reachable,
            geometry_revision,
        })
    }

    /// Grid origin and size.
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Number of cells.
    pub fn volume(&self) -> usize {
        self.open.len()
    }

    /// Revision of the ship geometry this classification describes.
    pub fn geometry_revision(&self) -> u64 {
        self.geometry_revision
    }

    /// Cells not occupied by a solid block.
    pub fn open(&self) -> &BitSet {
        &self.open
    }

    /// Cells enclosed by the hull (pocket space).
    pub fn interior(&self) -> &BitSet {
        &self.interior
    }

    /// Cells the outside liquid can reach.
    pub fn water_reachable(&self) -> &BitSet {
        &self.water_reachable
    }

    /// Open, outside, and reached by the liquid: the water side of a boundary.
    pub fn is_exterior_submerged(&self, index: usize) -> bool {
        self.open.contains(index)
            && !self.interior.contains(index)
            && self.water_reachable.contains(index)
    }

    /// Open pocket space enclosed by the hull.
    pub fn is_interior_open(&self, index: usize) -> bool {
        self.open.contains(index) && self.interior.contains(index)
    }
}

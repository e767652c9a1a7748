//! Voxel classification storage for ship grids: word-packed bitsets, grid indexing,
//! validated classification snapshots, and block render-penetrability classes.

pub mod bitset;
pub mod block;
pub mod grid;
pub mod snapshot;

pub use bitset::{BitSet, Ones};
pub use block::{BlockClass, RenderLayer};
pub use grid::GridBounds;
pub use snapshot::{SnapshotError, VoxelGridSnapshot};

//! Sparse walk over water-reachable voxels that finds exposed boundary faces.

use glam::UVec3;
use keelwater_voxel::{BitSet, GridBounds, Ones, VoxelGridSnapshot};

use crate::face::{FaceDirection, FaceMask};

/// An exterior submerged voxel and the directions in which it borders
/// pocket space or a penetrable solid shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryVoxel {
    /// Flat grid index.
    pub index: usize,
    /// Local cell coordinates.
    pub local: UVec3,
    /// Boundary directions, possibly none.
    pub faces: FaceMask,
}

/// Iterates the exterior submerged voxels of a snapshot.
///
/// Only set bits of the water-reachable layer are visited, so the cost is
/// linear in the reachable set rather than in the grid volume.
pub struct BoundaryFaceScanner<'a> {
    snapshot: &'a VoxelGridSnapshot,
    penetrable: &'a BitSet,
    reachable: Ones<'a>,
}

impl<'a> BoundaryFaceScanner<'a> {
    /// Scan `snapshot` with the penetrable-solid bits built for it.
    pub fn new(snapshot: &'a VoxelGridSnapshot, penetrable: &'a BitSet) -> Self {
        debug_assert_eq!(penetrable.len(), snapshot.volume());
        Self {
            snapshot,
            penetrable,
            reachable: snapshot.water_reachable().ones(),
        }
    }
}

impl Iterator for BoundaryFaceScanner<'_> {
    type Item = BoundaryVoxel;

    fn next(&mut self) -> Option<BoundaryVoxel> {
        let volume = self.snapshot.volume();
        for index in self.reachable.by_ref() {
            if index >= volume {
                return None;
            }
            if !self.snapshot.is_exterior_submerged(index) {
                continue;
            }
            let local = self.snapshot.bounds().local(index);
            let faces = boundary_faces(self.snapshot, self.penetrable, local);
            return Some(BoundaryVoxel {
                index,
                local,
                faces,
            });
        }
        None
    }
}

/// Directions from `local` toward an in-bounds neighbor that is either open
/// pocket interior or a penetrable solid that is not open.
pub fn boundary_faces(
    snapshot: &VoxelGridSnapshot,
    penetrable: &BitSet,
    local: UVec3,
) -> FaceMask {
    let bounds: GridBounds = snapshot.bounds();
    let mut mask = FaceMask::NONE;
    for direction in FaceDirection::ALL {
        let neighbor = direction.neighbor(local.as_ivec3());
        if !bounds.contains_local(neighbor) {
            continue;
        }
        let n = bounds.index(neighbor.as_uvec3());
        let pocket = snapshot.is_interior_open(n);
        let shell = penetrable.contains(n) && !snapshot.open().contains(n);
        if pocket || shell {
            mask.insert(direction);
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use glam::IVec3;

    use super::*;

    struct Grid {
        bounds: GridBounds,
        open: BitSet,
        interior: BitSet,
        reachable: BitSet,
        penetrable: BitSet,
    }

    impl Grid {
        fn new(size: UVec3) -> Self {
            let bounds = GridBounds::new(IVec3::ZERO, size);
            let n = bounds.volume();
            Self {
                bounds,
                open: BitSet::new(n),
                interior: BitSet::new(n),
                reachable: BitSet::new(n),
                penetrable: BitSet::new(n),
            }
        }

        fn water(&mut self, x: u32, y: u32, z: u32) -> &mut Self {
            let i = self.bounds.index(UVec3::new(x, y, z));
            self.open.insert(i);
            self.reachable.insert(i);
            self
        }

        fn pocket(&mut self, x: u32, y: u32, z: u32) -> &mut Self {
            let i = self.bounds.index(UVec3::new(x, y, z));
            self.open.insert(i);
            self.interior.insert(i);
            self
        }

        fn glass(&mut self, x: u32, y: u32, z: u32) -> &mut Self {
            let i = self.bounds.index(UVec3::new(x, y, z));
            self.penetrable.insert(i);
            self
        }

        fn snapshot(&self) -> VoxelGridSnapshot {
            VoxelGridSnapshot::new(
                self.bounds,
                self.open.clone(),
                self.interior.clone(),
                self.reachable.clone(),
                1,
            )
            .unwrap()
        }
    }

    #[test]
    fn test_water_next_to_pocket() {
        let mut g = Grid::new(UVec3::new(2, 1, 1));
        g.water(0, 0, 0).pocket(1, 0, 0);
        let snap = g.snapshot();
        let found: Vec<_> = BoundaryFaceScanner::new(&snap, &g.penetrable).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].index, 0);
        assert_eq!(found[0].faces.iter().collect::<Vec<_>>(), vec![FaceDirection::PosX]);
    }

    #[test]
    fn test_glass_shell_counts_only_when_closed() {
        let mut g = Grid::new(UVec3::new(3, 1, 1));
        g.water(1, 0, 0).glass(0, 0, 0).glass(2, 0, 0);
        // A penetrable cell that is also open (e.g. a pane with a gap) is not a shell.
        g.open.insert(2);
        let snap = g.snapshot();
        let found: Vec<_> = BoundaryFaceScanner::new(&snap, &g.penetrable).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].faces.iter().collect::<Vec<_>>(), vec![FaceDirection::NegX]);
    }

    #[test]
    fn test_interior_water_is_skipped() {
        let mut g = Grid::new(UVec3::new(2, 1, 1));
        g.water(0, 0, 0).pocket(1, 0, 0);
        // Reachable but interior: a flooded pocket, not outside water.
        g.interior.insert(0);
        let snap = g.snapshot();
        assert_eq!(BoundaryFaceScanner::new(&snap, &g.penetrable).count(), 0);
    }

    #[test]
    fn test_open_water_without_neighbors_has_no_faces() {
        let mut g = Grid::new(UVec3::new(2, 2, 1));
        g.water(0, 0, 0).water(1, 0, 0);
        let snap = g.snapshot();
        let found: Vec<_> = BoundaryFaceScanner::new(&snap, &g.penetrable).collect();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|v| v.faces.is_empty()));
    }

    #[test]
    fn test_face_count_matches_rule() {
        // Water in the middle of a 3x3x3 grid surrounded by a mix of neighbors.
        let mut g = Grid::new(UVec3::splat(3));
        g.water(1, 1, 1)
            .pocket(2, 1, 1)
            .pocket(1, 2, 1)
            .glass(0, 1, 1)
            .glass(1, 0, 1)
            .water(1, 1, 2);
        let snap = g.snapshot();
        let found: Vec<_> = BoundaryFaceScanner::new(&snap, &g.penetrable)
            .filter(|v| v.local == UVec3::ONE)
            .collect();
        assert_eq!(found.len(), 1);
        // +X and +Y pockets, -X and -Y glass, +Z water, -Z solid.
        assert_eq!(found[0].faces.count(), 4);
        assert!(!found[0].faces.contains(FaceDirection::PosZ));
        assert!(!found[0].faces.contains(FaceDirection::NegZ));
    }

    #[test]
    fn test_grid_edge_has_no_outside_neighbor() {
        let mut g = Grid::new(UVec3::new(1, 1, 1));
        g.water(0, 0, 0);
        let snap = g.snapshot();
        let found: Vec<_> = BoundaryFaceScanner::new(&snap, &g.penetrable).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].faces, FaceMask::NONE);
    }
}

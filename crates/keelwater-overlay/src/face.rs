//! Axis-aligned face directions and the boundary quads built on them.

use glam::{IVec3, UVec3, Vec2, Vec3};

use crate::clip::{ClipVertex, Polygon};

/// One of the six directions a boundary face can point, from the water
/// voxel toward its neighbor.
///
/// The `repr(u8)` discriminant doubles as the bit index inside [`FaceMask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FaceDirection {
    /// +X direction.
    PosX = 0,
    /// −X direction.
    NegX = 1,
    /// +Y direction.
    PosY = 2,
    /// −Y direction.
    NegY = 3,
    /// +Z direction.
    PosZ = 4,
    /// −Z direction.
    NegZ = 5,
}

impl FaceDirection {
    /// All six directions in scan order.
    pub const ALL: [FaceDirection; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Returns `(normal_axis, u_axis, v_axis)` with `u × v` along `+normal_axis`.
    /// Each value is 0=X, 1=Y, 2=Z.
    pub fn face_basis(self) -> (usize, usize, usize) {
        match self {
            Self::PosX | Self::NegX => (0, 1, 2),
            Self::PosY | Self::NegY => (1, 2, 0),
            Self::PosZ | Self::NegZ => (2, 0, 1),
        }
    }

    /// Returns `true` for the three positive directions.
    pub fn is_positive(self) -> bool {
        matches!(self, Self::PosX | Self::PosY | Self::PosZ)
    }

    /// Integer step toward the neighbor.
    pub fn step(self) -> IVec3 {
        match self {
            Self::PosX => IVec3::X,
            Self::NegX => IVec3::NEG_X,
            Self::PosY => IVec3::Y,
            Self::NegY => IVec3::NEG_Y,
            Self::PosZ => IVec3::Z,
            Self::NegZ => IVec3::NEG_Z,
        }
    }

    /// Unit normal in grid space.
    pub fn normal(self) -> Vec3 {
        self.step().as_vec3()
    }

    /// Neighbor of a signed local cell.
    pub fn neighbor(self, local: IVec3) -> IVec3 {
        local + self.step()
    }

    /// Returns the direction index (0–5).
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Set of boundary directions found for one voxel.
///
/// Bit 0 = +X, Bit 1 = −X, Bit 2 = +Y, Bit 3 = −Y, Bit 4 = +Z, Bit 5 = −Z.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceMask(pub u8);

impl FaceMask {
    /// No faces.
    pub const NONE: Self = Self(0);
    /// All six faces.
    pub const ALL: Self = Self(0b0011_1111);

    /// Returns `true` if the given direction is in the set.
    pub fn contains(self, direction: FaceDirection) -> bool {
        self.0 & (1 << direction as u8) != 0
    }

    /// Adds a direction.
    pub fn insert(&mut self, direction: FaceDirection) {
        self.0 |= 1 << direction as u8;
    }

    /// Number of directions (0–6).
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns `true` if no direction is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Directions in the set, in [`FaceDirection::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = FaceDirection> {
        FaceDirection::ALL
            .into_iter()
            .filter(move |&d| self.contains(d))
    }
}

/// Unit quad on the plane shared by the cell at `local` and its neighbor in
/// `direction`, pushed `epsilon` along the direction.
///
/// Corners are in grid-local coordinates and wind counter-clockwise when
/// seen from the neighbor's side. UVs run `(0,0) → (1,0) → (1,1) → (0,1)`.
pub fn boundary_quad(local: UVec3, direction: FaceDirection, epsilon: f32) -> Polygon {
    let (axis, u_axis, v_axis) = direction.face_basis();
    let base = local.as_vec3();
    let plane = if direction.is_positive() {
        base[axis] + 1.0 + epsilon
    } else {
        base[axis] - epsilon
    };

    let corners: [(f32, f32); 4] = if direction.is_positive() {
        [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
    } else {
        [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
    };

    let mut quad = Polygon::new();
    for (cu, cv) in corners {
        let mut pos = Vec3::ZERO;
        pos[axis] = plane;
        pos[u_axis] = base[u_axis] + cu;
        pos[v_axis] = base[v_axis] + cv;
        quad.push(ClipVertex::new(pos, Vec2::new(cu, cv)));
    }
    quad
}

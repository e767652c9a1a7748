//! Clipping of face polygons against a horizontal liquid surface.
//!
//! The surface is a single world-space height shared by every vertex, so one
//! Sutherland–Hodgman pass against the half-space `height <= surface` is enough
//! even when the face itself is arbitrarily rotated.

use glam::{Vec2, Vec3};

/// Maximum vertex count of a [`Polygon`].
pub const MAX_POLYGON_VERTICES: usize = 8;

/// Height denominators at or below this magnitude are treated as lying on
/// the surface and produce no crossing vertex.
pub const CROSSING_DENOM_EPSILON: f64 = 1e-12;

/// A polygon vertex in grid-local coordinates with its texture coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClipVertex {
    /// Grid-local position.
    pub position: Vec3,
    /// Texture coordinate.
    pub uv: Vec2,
}

impl ClipVertex {
    /// Create a vertex.
    pub fn new(position: Vec3, uv: Vec2) -> Self {
        Self { position, uv }
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            uv: self.uv.lerp(other.uv, t),
        }
    }
}

/// A small convex polygon stored inline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polygon {
    vertices: [ClipVertex; MAX_POLYGON_VERTICES],
    len: usize,
}

impl Polygon {
    /// An empty polygon.
    pub fn new() -> Self {
        Self {
            vertices: [ClipVertex::default(); MAX_POLYGON_VERTICES],
            len: 0,
        }
    }

    /// Build a polygon from up to [`MAX_POLYGON_VERTICES`] vertices; extras are dropped.
    pub fn from_vertices(vertices: &[ClipVertex]) -> Self {
        let mut polygon = Self::new();
        for &v in vertices {
            polygon.push(v);
        }
        polygon
    }

    /// Append a vertex. Ignored once the polygon is full.
    pub fn push(&mut self, vertex: ClipVertex) {
        if self.len < MAX_POLYGON_VERTICES {
            self.vertices[self.len] = vertex;
            self.len += 1;
        }
    }

    /// Vertices in winding order.
    pub fn vertices(&self) -> &[ClipVertex] {
        &self.vertices[..self.len]
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Triangle-fan indices anchored at vertex 0: `(0, i, i + 1)`.
    pub fn fan_triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        (1..self.len.saturating_sub(1)).map(|i| [0, i as u32, i as u32 + 1])
    }
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of clipping one polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Clipped {
    /// Entirely above the surface; nothing to draw.
    Culled,
    /// Entirely below the surface; the input, unmodified.
    Whole(Polygon),
    /// Straddles the surface; the submerged part.
    Partial(Polygon),
}

impl Clipped {
    /// The polygon to draw, if any.
    pub fn polygon(&self) -> Option<&Polygon> {
        match self {
            Self::Culled => None,
            Self::Whole(p) | Self::Partial(p) => Some(p),
        }
    }
}

/// Clip `polygon` to the part at or below `surface`.
///
/// A vertex is inside when `height_of(vertex) <= surface + epsilon`. Crossing
/// vertices are interpolated at the exact surface height, with `t` clamped to
/// `[0, 1]`; edges whose height difference is at most
/// [`CROSSING_DENOM_EPSILON`] contribute no crossing vertex.
pub fn clip_below_surface(
    polygon: &Polygon,
    height_of: impl Fn(&ClipVertex) -> f64,
    surface: f64,
    epsilon: f64,
) -> Clipped {
    let n = polygon.len();
    if n == 0 {
        return Clipped::Culled;
    }

    let mut heights = [0.0_f64; MAX_POLYGON_VERTICES];
    let mut inside = [false; MAX_POLYGON_VERTICES];
    let limit = surface + epsilon;
    for (i, v) in polygon.vertices().iter().enumerate() {
        heights[i] = height_of(v);
        inside[i] = heights[i] <= limit;
    }

    let inside_count = inside[..n].iter().filter(|&&b| b).count();
    if inside_count == n {
        return Clipped::Whole(*polygon);
    }
    if inside_count == 0 {
        return Clipped::Culled;
    }

    let verts = polygon.vertices();
    let mut out = Polygon::new();
    let mut prev = n - 1;
    for cur in 0..n {
        if inside[prev] != inside[cur] {
            let denom = heights[cur] - heights[prev];
            if denom.abs() > CROSSING_DENOM_EPSILON {
                let t = ((surface - heights[prev]) / denom).clamp(0.0, 1.0);
                out.push(verts[prev].lerp(verts[cur], t as f32));
            }
        }
        if inside[cur] {
            out.push(verts[cur]);
        }
        prev = cur;
    }

    if out.len() < 3 {
        Clipped::Culled
    } else {
        Clipped::Partial(out)
    }
}

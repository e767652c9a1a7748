//! Conversion of clipped polygons into renderer-agnostic overlay vertices.

use bytemuck::{Pod, Zeroable};

use crate::clip::Polygon;
use crate::face::FaceDirection;
use crate::transform::CameraRelativeTransform;

/// Packed block/sky light value for full brightness.
pub const FULL_BRIGHT: u32 = 0x00F0_00F0;

/// One overlay vertex, laid out for direct upload to a GPU vertex buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    /// Camera-relative position.
    pub position: [f32; 3],
    /// Linear RGBA.
    pub color: [f32; 4],
    /// Texture coordinate.
    pub uv: [f32; 2],
    /// Packed light, always [`FULL_BRIGHT`].
    pub light: u32,
    /// World-oriented unit normal.
    pub normal: [f32; 3],
}

static_assertions::assert_eq_size!(OverlayVertex, [u8; 52]);

/// Receives finished overlay polygons.
pub trait OverlaySink {
    /// Append one convex polygon, to be drawn as a fan anchored at its first vertex.
    fn push_polygon(&mut self, direction: FaceDirection, clipped: bool, vertices: &[OverlayVertex]);
}

/// Per-polygon metadata, for analysis and debugging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceInfo {
    /// Boundary direction in grid space.
    pub direction: FaceDirection,
    /// Whether the waterline cut this face.
    pub clipped: bool,
    /// Index of the polygon's first vertex.
    pub first_vertex: u32,
    /// Number of vertices.
    pub vertex_count: u32,
}

/// Vertex and fan-index buffers for one frame of overlay geometry.
#[derive(Clone, Debug, Default)]
pub struct OverlayMesh {
    /// Vertex buffer.
    pub vertices: Vec<OverlayVertex>,
    /// Index buffer (triangles, 3 indices per triangle).
    pub indices: Vec<u32>,
    /// One entry per polygon.
    pub faces: Vec<FaceInfo>,
}

impl OverlayMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties all buffers, keeping their allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.faces.clear();
    }

    /// Returns `true` if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Number of triangles in the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Vertices of the `i`-th polygon.
    pub fn face_vertices(&self, i: usize) -> &[OverlayVertex] {
        let info = &self.faces[i];
        let start = info.first_vertex as usize;
        &self.vertices[start..start + info.vertex_count as usize]
    }
}

impl OverlaySink for OverlayMesh {
    fn push_polygon(&mut self, direction: FaceDirection, clipped: bool, vertices: &[OverlayVertex]) {
        if vertices.len() < 3 {
            return;
        }
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        for i in 1..vertices.len() as u32 - 1 {
            self.indices.extend_from_slice(&[base, base + i, base + i + 1]);
        }
        self.faces.push(FaceInfo {
            direction,
            clipped,
            first_vertex: base,
            vertex_count: vertices.len() as u32,
        });
    }
}

/// Converts grid-local polygons of one ship into [`OverlayVertex`]es.
#[derive(Clone, Copy, Debug)]
pub struct OverlayEmitter {
    color: [f32; 4],
}

impl OverlayEmitter {
    /// Emitter using a `0xRRGGBB` tint and a fixed alpha.
    pub fn new(tint: u32, alpha: f32) -> Self {
        Self {
            color: tint_to_rgba(tint, alpha),
        }
    }

    /// Vertex color.
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Transform `polygon` to camera-relative space and push it into `sink`.
    /// Returns the number of vertices emitted.
    pub fn emit<S: OverlaySink + ?Sized>(
        &self,
        sink: &mut S,
        transform: &CameraRelativeTransform,
        polygon: &Polygon,
        direction: FaceDirection,
        clipped: bool,
    ) -> usize {
        let normal = transform.rotate_normal(direction.normal()).to_array();
        let mut out = [OverlayVertex::zeroed(); crate::clip::MAX_POLYGON_VERTICES];
        for (slot, v) in out.iter_mut().zip(polygon.vertices()) {
            *slot = OverlayVertex {
                position: transform.to_camera_relative(v.position).to_array(),
                color: self.color,
                uv: v.uv.to_array(),
                light: FULL_BRIGHT,
                normal,
            };
        }
        let n = polygon.len();
        sink.push_polygon(direction, clipped, &out[..n]);
        n
    }
}

/// `0xRRGGBB` plus alpha to normalized RGBA.
pub fn tint_to_rgba(tint: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| ((tint >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha]
}

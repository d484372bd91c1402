//! Transient polygon accumulation.

use std::sync::Arc;

use beam_math::{Vec2, Vec3};

use crate::{Material, Texture};

/// A polygon being collected from the host before it is transformed and
/// handed to an intersection engine.
///
/// Vertices are required; normals and texture coordinates are optional
/// parallel lists that may be shorter than the vertex list. Pairing is
/// positional, so trailing vertices simply carry no normal or texture
/// coordinate. The polygon is not retained once streamed; the engine owns
/// the durable geometry.
#[derive(Clone, Debug, Default)]
pub struct Polygon {
    /// Vertex positions in submission order.
    pub vertices: Vec<Vec3>,
    /// Per-vertex normals, paired positionally with `vertices`.
    pub normals: Vec<Vec3>,
    /// Per-vertex texture coordinates, paired positionally with `vertices`.
    pub tex_coords: Vec<Vec2>,
    /// Material binding, if any.
    pub material: Option<Arc<Material>>,
    /// Texture binding, if any.
    pub texture: Option<Arc<Texture>>,
}

impl Polygon {
    /// Start an empty polygon with the given bindings.
    pub fn new(material: Option<Arc<Material>>, texture: Option<Arc<Texture>>) -> Self {
        Self {
            material,
            texture,
            ..Default::default()
        }
    }

    /// Append a vertex position.
    pub fn add_vertex(&mut self, position: Vec3) {
        self.vertices.push(position);
    }

    /// Append a vertex normal.
    pub fn add_normal(&mut self, normal: Vec3) {
        self.normals.push(normal);
    }

    /// Append a texture coordinate.
    pub fn add_tex_coord(&mut self, uv: Vec2) {
        self.tex_coords.push(uv);
    }

    /// Number of vertices collected so far.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// True when no vertices have been collected.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

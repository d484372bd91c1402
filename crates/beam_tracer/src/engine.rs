//! Intersection engine seam.
//!
//! Scene construction is a streaming protocol: open a polygon, bind its
//! material and texture, then submit per-vertex attributes where each
//! normal or texture coordinate applies to the vertices submitted after
//! it. `loading_complete` freezes the scene; queries are only valid after
//! that point.

use std::sync::Arc;

use beam_core::{Material, Polygon, Texture};
use beam_math::{Mat4, Ray, Vec2, Vec3};

/// Opaque identity of a polygon inside an engine.
///
/// Shadow rays pass the polygon they start on as the exclusion so the
/// surface cannot occlude itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PolygonId(pub u32);

/// Nearest-hit answer: which polygon, how far along the ray, and where.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceHit {
    pub polygon: PolygonId,
    pub t: f32,
    pub point: Vec3,
}

/// Surface detail at a hit, resolved on demand by `intersect_info`.
#[derive(Clone, Debug)]
pub struct HitDetail {
    /// Interpolated surface normal (unnormalized input is allowed;
    /// shading normalizes).
    pub normal: Vec3,
    /// Material bound to the hit polygon, if any.
    pub material: Option<Arc<Material>>,
    /// Texture bound to the hit polygon, if any.
    pub texture: Option<Arc<Texture>>,
    /// Interpolated texture coordinate.
    pub tex_coord: Vec2,
}

/// A queryable scene built from streamed polygons.
///
/// Construction calls arrive strictly between [`initialize`] and
/// [`loading_complete`]; query calls arrive strictly after. All calls are
/// synchronous.
///
/// [`initialize`]: Self::initialize
/// [`loading_complete`]: Self::loading_complete
pub trait IntersectionEngine {
    /// Reset to an empty scene.
    fn initialize(&mut self);

    /// Open a new polygon.
    fn begin_polygon(&mut self);

    /// Bind the open polygon's material.
    fn set_material(&mut self, material: Arc<Material>);

    /// Bind the open polygon's texture.
    fn set_texture(&mut self, texture: Arc<Texture>);

    /// Submit a normal; it applies to vertices submitted after it.
    fn add_normal(&mut self, normal: Vec3);

    /// Submit a texture coordinate; it applies to vertices submitted
    /// after it.
    fn add_tex_coord(&mut self, uv: Vec2);

    /// Submit a vertex position, capturing the current normal and texture
    /// coordinate.
    fn add_vertex(&mut self, position: Vec3);

    /// Close the open polygon.
    fn end_polygon(&mut self);

    /// Freeze the scene for querying; no polygon may be opened after.
    fn loading_complete(&mut self);

    /// Nearest hit along `ray` with `t <= max_distance`, skipping
    /// `exclude` when given. `None` on a miss.
    fn intersect(
        &self,
        ray: &Ray,
        max_distance: f32,
        exclude: Option<PolygonId>,
    ) -> Option<SurfaceHit>;

    /// Resolve surface detail for a hit previously returned by
    /// [`intersect`](Self::intersect) for the same ray.
    fn intersect_info(&self, ray: &Ray, hit: &SurfaceHit) -> HitDetail;
}

/// Transform a collected polygon by `world` and stream it into `engine`.
///
/// Submission order per vertex: the paired normal first (transformed as a
/// vector), then the paired texture coordinate (untransformed), then the
/// vertex position (transformed as a point). Normals and texture
/// coordinates shorter than the vertex list simply run out; the remaining
/// vertices are submitted bare.
pub fn stream_polygon<E>(engine: &mut E, world: &Mat4, polygon: &Polygon)
where
    E: IntersectionEngine + ?Sized,
{
    engine.begin_polygon();
    if let Some(material) = &polygon.material {
        engine.set_material(material.clone());
    }
    if let Some(texture) = &polygon.texture {
        engine.set_texture(texture.clone());
    }

    let mut normals = polygon.normals.iter();
    let mut tex_coords = polygon.tex_coords.iter();

    for vertex in &polygon.vertices {
        if let Some(normal) = normals.next() {
            engine.add_normal(world.transform_vector3(*normal));
        }
        if let Some(uv) = tex_coords.next() {
            engine.add_tex_coord(*uv);
        }
        engine.add_vertex(world.transform_point3(*vertex));
    }

    engine.end_polygon();
}

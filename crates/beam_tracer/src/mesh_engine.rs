//! Bundled intersection engine: triangulated polygons over a BVH.

use std::sync::Arc;

use beam_core::{Material, Texture};
use beam_math::{Ray, Vec2, Vec3};

use crate::bvh::Bvh;
use crate::engine::{HitDetail, IntersectionEngine, PolygonId, SurfaceHit};
use crate::triangle::{Corner, Triangle};

/// Minimum hit distance; keeps a ray from re-hitting the surface it
/// starts on.
const MIN_T: f32 = 1e-3;

/// Per-polygon bindings shared by its triangles.
#[derive(Default)]
struct PolygonData {
    material: Option<Arc<Material>>,
    texture: Option<Arc<Texture>>,
}

/// The polygon currently under construction.
struct OpenPolygon {
    id: PolygonId,
    corners: Vec<Corner>,
    // Sticky current attributes, captured into each submitted vertex
    normal: Option<Vec3>,
    uv: Option<Vec2>,
}

/// Default [`IntersectionEngine`]: accumulates streamed polygons,
/// fan-triangulates them on `end_polygon`, and answers queries through a
/// median-split BVH built at `loading_complete`.
///
/// Attribute submission is immediate-mode: a normal or texture coordinate
/// applies to every vertex submitted after it within the same polygon, so
/// one normal covers a whole flat polygon. Polygons with fewer than three
/// vertices are dropped.
pub struct MeshEngine {
    polygons: Vec<PolygonData>,
    open: Option<OpenPolygon>,
    staged: Vec<Triangle>,
    bvh: Bvh,
    /// Triangle indices per polygon, in BVH storage order
    by_polygon: Vec<Vec<u32>>,
}

impl MeshEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self {
            polygons: Vec::new(),
            open: None,
            staged: Vec::new(),
            bvh: Bvh::empty(),
            by_polygon: Vec::new(),
        }
    }

    /// Number of polygons accepted so far.
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Number of triangles cut from the accepted polygons.
    pub fn triangle_count(&self) -> usize {
        self.staged.len() + self.bvh.len()
    }
}

impl Default for MeshEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionEngine for MeshEngine {
    fn initialize(&mut self) {
        self.polygons.clear();
        self.open = None;
        self.staged.clear();
        self.bvh = Bvh::empty();
        self.by_polygon.clear();
    }

    fn begin_polygon(&mut self) {
        if self.open.is_some() {
            log::warn!("begin_polygon while a polygon is open; discarding the open one");
        }
        let id = PolygonId(self.polygons.len() as u32);
        self.polygons.push(PolygonData::default());
        self.open = Some(OpenPolygon {
            id,
            corners: Vec::new(),
            normal: None,
            uv: None,
        });
    }

    fn set_material(&mut self, material: Arc<Material>) {
        match &self.open {
            Some(open) => self.polygons[open.id.0 as usize].material = Some(material),
            None => log::warn!("set_material with no open polygon"),
        }
    }

    fn set_texture(&mut self, texture: Arc<Texture>) {
        match &self.open {
            Some(open) => self.polygons[open.id.0 as usize].texture = Some(texture),
            None => log::warn!("set_texture with no open polygon"),
        }
    }

    fn add_normal(&mut self, normal: Vec3) {
        match &mut self.open {
            Some(open) => open.normal = Some(normal),
            None => log::warn!("add_normal with no open polygon"),
        }
    }

    fn add_tex_coord(&mut self, uv: Vec2) {
        match &mut self.open {
            Some(open) => open.uv = Some(uv),
            None => log::warn!("add_tex_coord with no open polygon"),
        }
    }

    fn add_vertex(&mut self, position: Vec3) {
        match &mut self.open {
            Some(open) => open.corners.push(Corner {
                position,
                normal: open.normal,
                uv: open.uv,
            }),
            None => log::warn!("add_vertex with no open polygon"),
        }
    }

    fn end_polygon(&mut self) {
        let Some(open) = self.open.take() else {
            log::warn!("end_polygon with no open polygon");
            return;
        };
        if open.corners.len() < 3 {
            log::debug!(
                "dropping polygon {} with only {} vertices",
                open.id.0,
                open.corners.len()
            );
            return;
        }

        // Fan triangulation about the first vertex
        for i in 1..open.corners.len() - 1 {
            self.staged.push(Triangle::new(
                [open.corners[0], open.corners[i], open.corners[i + 1]],
                open.id,
            ));
        }
    }

    fn loading_complete(&mut self) {
        let triangles = std::mem::take(&mut self.staged);
        let triangle_count = triangles.len();
        self.bvh = Bvh::build(triangles);

        self.by_polygon = vec![Vec::new(); self.polygons.len()];
        for (index, triangle) in self.bvh.triangles().iter().enumerate() {
            self.by_polygon[triangle.polygon().0 as usize].push(index as u32);
        }

        log::debug!(
            "scene finalized: {} polygons, {} triangles",
            self.polygons.len(),
            triangle_count
        );
    }

    fn intersect(
        &self,
        ray: &Ray,
        max_distance: f32,
        exclude: Option<PolygonId>,
    ) -> Option<SurfaceHit> {
        let (index, hit) = self.bvh.nearest_hit(ray, MIN_T, max_distance, exclude)?;
        Some(SurfaceHit {
            polygon: self.bvh.triangle(index).polygon(),
            t: hit.t,
            point: ray.at(hit.t),
        })
    }

    fn intersect_info(&self, ray: &Ray, hit: &SurfaceHit) -> HitDetail {
        let data = &self.polygons[hit.polygon.0 as usize];

        // Re-derive barycentrics by re-intersecting the polygon's own
        // triangles in a window around the reported distance.
        let window = 1e-4 * hit.t.abs().max(1.0);
        for &index in &self.by_polygon[hit.polygon.0 as usize] {
            let triangle = self.bvh.triangle(index as usize);
            if let Some(tri_hit) = triangle.hit(ray, hit.t - window, hit.t + window) {
                return HitDetail {
                    normal: triangle.normal_at(tri_hit.u, tri_hit.v),
                    material: data.material.clone(),
                    texture: data.texture.clone(),
                    tex_coord: triangle.tex_coord_at(tri_hit.u, tri_hit.v),
                };
            }
        }

        // Not reachable for hits this engine produced; fall back to the
        // polygon's first face normal.
        let normal = self.by_polygon[hit.polygon.0 as usize]
            .first()
            .map(|&index| self.bvh.triangle(index as usize).face_normal())
            .unwrap_or(Vec3::Z);
        HitDetail {
            normal,
            material: data.material.clone(),
            texture: data.texture.clone(),
            tex_coord: Vec2::ZERO,
        }
    }
}

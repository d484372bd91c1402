//! Triangle primitive for the mesh engine.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection. The
//! barycentric coordinates of a hit double as interpolation weights for
//! per-vertex normals and texture coordinates.

use beam_math::{Aabb, Ray, Vec2, Vec3};

use crate::engine::PolygonId;

/// Padding applied to bounding boxes so axis-aligned triangles stay
/// hittable.
const BBOX_PADDING: f32 = 0.0001;

/// One corner of a triangle: the position plus whatever attributes were
/// current when the vertex was submitted.
#[derive(Clone, Copy, Debug)]
pub struct Corner {
    pub position: Vec3,
    pub normal: Option<Vec3>,
    pub uv: Option<Vec2>,
}

impl Corner {
    /// A corner with no captured attributes.
    pub fn bare(position: Vec3) -> Self {
        Self {
            position,
            normal: None,
            uv: None,
        }
    }
}

/// A ray-triangle intersection: distance plus barycentric weights of the
/// second and third corners.
#[derive(Clone, Copy, Debug)]
pub struct TriangleHit {
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

/// A triangle carrying per-corner attributes and its owning polygon.
#[derive(Clone, Debug)]
pub struct Triangle {
    corners: [Corner; 3],
    /// Face normal from the winding order (zero for degenerate triangles)
    face_normal: Vec3,
    polygon: PolygonId,
    bbox: Aabb,
}

impl Triangle {
    /// Create a triangle from three corners.
    pub fn new(corners: [Corner; 3], polygon: PolygonId) -> Self {
        let edge1 = corners[1].position - corners[0].position;
        let edge2 = corners[2].position - corners[0].position;
        let face_normal = edge1.cross(edge2).normalize_or_zero();

        let mut bbox = Aabb::from_points(corners[0].position, corners[1].position);
        bbox.grow(corners[2].position);

        Self {
            corners,
            face_normal,
            polygon,
            bbox: bbox.padded(BBOX_PADDING),
        }
    }

    /// The polygon this triangle was cut from.
    pub fn polygon(&self) -> PolygonId {
        self.polygon
    }

    /// Face normal from the winding order.
    pub fn face_normal(&self) -> Vec3 {
        self.face_normal
    }

    /// Padded bounding box.
    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// Möller-Trumbore ray-triangle intersection.
    ///
    /// Returns the hit with `t_min <= t <= t_max`, or `None`.
    pub fn hit(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<TriangleHit> {
        let edge1 = self.corners[1].position - self.corners[0].position;
        let edge2 = self.corners[2].position - self.corners[0].position;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-8 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.corners[0].position;
        let u = f * s.dot(h);

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if t < t_min || t > t_max {
            return None;
        }

        Some(TriangleHit { t, u, v })
    }

    /// Normal at barycentric (u, v): interpolated when every corner has
    /// one, otherwise the face normal.
    pub fn normal_at(&self, u: f32, v: f32) -> Vec3 {
        match (
            self.corners[0].normal,
            self.corners[1].normal,
            self.corners[2].normal,
        ) {
            (Some(n0), Some(n1), Some(n2)) => {
                ((1.0 - u - v) * n0 + u * n1 + v * n2).normalize_or_zero()
            }
            _ => self.face_normal,
        }
    }

    /// Texture coordinate at barycentric (u, v): interpolated when every
    /// corner has one, otherwise zero.
    pub fn tex_coord_at(&self, u: f32, v: f32) -> Vec2 {
        match (self.corners[0].uv, self.corners[1].uv, self.corners[2].uv) {
            (Some(t0), Some(t1), Some(t2)) => (1.0 - u - v) * t0 + u * t1 + v * t2,
            _ => Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        // XY plane at z = -1, normal +Z by winding
        Triangle::new(
            [
                Corner::bare(Vec3::new(-1.0, -1.0, -1.0)),
                Corner::bare(Vec3::new(1.0, -1.0, -1.0)),
                Corner::bare(Vec3::new(0.0, 1.0, -1.0)),
            ],
            PolygonId(0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = tri.hit(&ray, 0.001, f32::INFINITY).unwrap();
        assert!((hit.t - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));

        assert!(tri.hit(&ray, 0.001, f32::INFINITY).is_none());
    }

    #[test]
    fn test_triangle_respects_t_bounds() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(tri.hit(&ray, 0.001, 0.5).is_none());
        assert!(tri.hit(&ray, 1.5, f32::INFINITY).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::X);

        assert!(tri.hit(&ray, 0.001, f32::INFINITY).is_none());
    }

    #[test]
    fn test_face_normal_from_winding() {
        let tri = unit_triangle();
        assert!((tri.face_normal() - Vec3::Z).length() < 1e-6);
        assert_eq!(tri.normal_at(0.3, 0.3), tri.face_normal());
    }

    #[test]
    fn test_interpolates_corner_attributes() {
        let mut corners = [
            Corner::bare(Vec3::new(0.0, 0.0, 0.0)),
            Corner::bare(Vec3::new(1.0, 0.0, 0.0)),
            Corner::bare(Vec3::new(0.0, 1.0, 0.0)),
        ];
        corners[0].normal = Some(Vec3::Z);
        corners[1].normal = Some(Vec3::Z);
        corners[2].normal = Some(Vec3::Z);
        corners[0].uv = Some(Vec2::new(0.0, 0.0));
        corners[1].uv = Some(Vec2::new(1.0, 0.0));
        corners[2].uv = Some(Vec2::new(0.0, 1.0));
        let tri = Triangle::new(corners, PolygonId(3));

        let uv = tri.tex_coord_at(0.25, 0.5);
        assert!((uv - Vec2::new(0.25, 0.5)).length() < 1e-6);
        assert!((tri.normal_at(0.25, 0.5) - Vec3::Z).length() < 1e-6);
        assert_eq!(tri.polygon(), PolygonId(3));
    }

    #[test]
    fn test_missing_attribute_falls_back() {
        let mut corners = [
            Corner::bare(Vec3::new(0.0, 0.0, 0.0)),
            Corner::bare(Vec3::new(1.0, 0.0, 0.0)),
            Corner::bare(Vec3::new(0.0, 1.0, 0.0)),
        ];
        // Two of three corners have attributes; that is not enough.
        corners[0].normal = Some(Vec3::Y);
        corners[1].normal = Some(Vec3::Y);
        corners[0].uv = Some(Vec2::ONE);
        let tri = Triangle::new(corners, PolygonId(0));

        assert_eq!(tri.normal_at(0.1, 0.1), tri.face_normal());
        assert_eq!(tri.tex_coord_at(0.1, 0.1), Vec2::ZERO);
    }

    #[test]
    fn test_barycentrics_at_corners() {
        let tri = unit_triangle();
        // Aim at the second corner; u should approach 1.
        let ray = Ray::new(
            Vec3::new(0.99, -0.99, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        );
        let hit = tri.hit(&ray, 0.001, f32::INFINITY).unwrap();
        assert!(hit.u > 0.97);
        assert!(hit.v < 0.02);
    }
}

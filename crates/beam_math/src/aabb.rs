use crate::{Ray, Vec3};

/// Axis-aligned bounding box stored as min/max corners.
///
/// Used by the intersection engine's BVH to bound triangles and prune
/// traversal with the slab test.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box containing nothing; the union with any box yields that box.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a box from two corner points, in either order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing both `a` and `b`.
    pub fn union(a: &Aabb, b: &Aabb) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Grow the box to include `point`.
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Center of the box.
    pub fn centroid(&self) -> Vec3 {
        0.5 * (self.min + self.max)
    }

    /// Index of the axis with the largest extent (0 = x, 1 = y, 2 = z).
    pub fn longest_axis(&self) -> usize {
        let extent = self.max - self.min;
        if extent.x > extent.y {
            if extent.x > extent.z {
                0
            } else {
                2
            }
        } else if extent.y > extent.z {
            1
        } else {
            2
        }
    }

    /// Return the box expanded by `delta` on every side.
    ///
    /// Axis-aligned triangles produce zero-thickness boxes that the slab
    /// test can miss through floating-point cancellation; padding keeps
    /// them hittable.
    pub fn padded(self, delta: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(delta),
            max: self.max + Vec3::splat(delta),
        }
    }

    /// Slab test: does `ray` cross the box anywhere in `(t_min, t_max)`?
    pub fn hit(&self, ray: &Ray, mut t_min: f32, mut t_max: f32) -> bool {
        for axis in 0..3 {
            let inv = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max <= t_min {
                return false;
            }
        }
        true
    }
}

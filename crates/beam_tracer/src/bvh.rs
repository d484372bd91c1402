//! Bounding volume hierarchy over triangles.
//!
//! Median-split construction: sort by centroid on the longest axis, halve,
//! recurse. Leaves hold index ranges into one reordered triangle vector.

use beam_math::{Aabb, Ray};

use crate::engine::PolygonId;
use crate::triangle::{Triangle, TriangleHit};

/// Maximum triangles per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - a branch with two children or a leaf with a triangle range.
enum BvhNode {
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    Leaf {
        start: usize,
        end: usize,
        bbox: Aabb,
    },
    Empty,
}

/// Triangle set plus its acceleration tree.
///
/// Triangles are reordered during construction; indices returned by
/// [`nearest_hit`](Self::nearest_hit) refer to the reordered set exposed
/// through [`triangle`](Self::triangle).
pub struct Bvh {
    triangles: Vec<Triangle>,
    root: BvhNode,
}

impl Bvh {
    /// An empty hierarchy; every query misses.
    pub fn empty() -> Self {
        Self {
            triangles: Vec::new(),
            root: BvhNode::Empty,
        }
    }

    /// Build a hierarchy over `triangles`.
    pub fn build(mut triangles: Vec<Triangle>) -> Self {
        let root = if triangles.is_empty() {
            BvhNode::Empty
        } else {
            Self::build_range(&mut triangles, 0)
        };
        Self { triangles, root }
    }

    /// Recursive median-split construction over a sub-slice starting at
    /// `offset` in the full triangle vector.
    fn build_range(triangles: &mut [Triangle], offset: usize) -> BvhNode {
        let n = triangles.len();

        let bounds = triangles
            .iter()
            .fold(Aabb::EMPTY, |acc, t| Aabb::union(&acc, &t.bounding_box()));

        if n <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                start: offset,
                end: offset + n,
                bbox: bounds,
            };
        }

        // Split on the axis where the centroids spread the most
        let centroid_bounds = triangles.iter().fold(Aabb::EMPTY, |acc, t| {
            let c = t.bounding_box().centroid();
            Aabb::union(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        triangles.sort_unstable_by(|a, b| {
            let a_val = a.bounding_box().centroid()[axis];
            let b_val = b.bounding_box().centroid()[axis];
            a_val
                .partial_cmp(&b_val)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = n / 2;
        let (left_half, right_half) = triangles.split_at_mut(mid);
        let left = Self::build_range(left_half, offset);
        let right = Self::build_range(right_half, offset + mid);

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox: bounds,
        }
    }

    /// Nearest triangle hit with `t` in `[t_min, t_max]`, skipping
    /// triangles that belong to `exclude`.
    pub fn nearest_hit(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        exclude: Option<PolygonId>,
    ) -> Option<(usize, TriangleHit)> {
        let mut best = None;
        let mut closest = t_max;
        self.visit(&self.root, ray, t_min, &mut closest, exclude, &mut best);
        best
    }

    fn visit(
        &self,
        node: &BvhNode,
        ray: &Ray,
        t_min: f32,
        closest: &mut f32,
        exclude: Option<PolygonId>,
        best: &mut Option<(usize, TriangleHit)>,
    ) {
        match node {
            BvhNode::Empty => {}

            BvhNode::Leaf { start, end, bbox } => {
                if !bbox.hit(ray, t_min, *closest) {
                    return;
                }
                for index in *start..*end {
                    let triangle = &self.triangles[index];
                    if exclude == Some(triangle.polygon()) {
                        continue;
                    }
                    if let Some(hit) = triangle.hit(ray, t_min, *closest) {
                        *closest = hit.t;
                        *best = Some((index, hit));
                    }
                }
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, t_min, *closest) {
                    return;
                }
                // The left visit shrinks `closest`, bounding the right one
                self.visit(left, ray, t_min, closest, exclude, best);
                self.visit(right, ray, t_min, closest, exclude, best);
            }
        }
    }

    /// Triangle by index into the reordered set.
    pub fn triangle(&self, index: usize) -> &Triangle {
        &self.triangles[index]
    }

    /// All triangles in reordered storage order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True when no triangles are stored.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

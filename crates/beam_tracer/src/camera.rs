//! Primary-ray generation.

use beam_math::{Ray, Vec3};

/// Generates camera-space primary rays for a view frustum.
///
/// The frustum is derived from a vertical field of view and an aspect
/// ratio; the image plane sits at z = -1 and rays leave the origin. For
/// pixel (row, col) and sub-sample (sx, sy) on an n x n grid:
///
/// ```text
/// x = xmin + (col + (sx+1)/(n+1)) / width  * -2 * xmin
/// y = ymin + (row + (sy+1)/(n+1)) / height * -2 * ymin
/// ```
///
/// with `ymin = -tan(vfov/2)` and `xmin = ymin * aspect`. n = 1 yields one
/// sample through the pixel center.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    xmin: f32,
    ymin: f32,
}

impl Camera {
    /// Create a camera from a vertical field of view (degrees) and an
    /// aspect ratio (width over height).
    pub fn new(vfov_deg: f32, aspect: f32) -> Self {
        let ymin = -(vfov_deg.to_radians() / 2.0).tan();
        let xmin = ymin * aspect;
        Self { xmin, ymin }
    }

    /// Primary ray for sub-sample (sx, sy) of pixel (row, col).
    ///
    /// The direction is normalized; the origin is always zero.
    pub fn sample_ray(
        &self,
        row: u32,
        col: u32,
        sx: u32,
        sy: u32,
        n: u32,
        width: u32,
        height: u32,
    ) -> Ray {
        let fx = (sx + 1) as f32 / (n + 1) as f32;
        let fy = (sy + 1) as f32 / (n + 1) as f32;

        let x = self.xmin + (col as f32 + fx) / width as f32 * (-2.0 * self.xmin);
        let y = self.ymin + (row as f32 + fy) / height as f32 * (-2.0 * self.ymin);

        Ray::new(Vec3::ZERO, Vec3::new(x, y, -1.0).normalize())
    }
}

//! World-transform stack for scene traversal.
//!
//! Mirrors the matrix handling of an immediate-mode scene walk: the top of
//! the stack is the current cumulative transform, `push` duplicates it,
//! `rotate`/`translate` right-compose onto it, and `reset` restarts the
//! stack from a look-at view transform.

use glam::{Mat4, Vec3};

/// Stack of affine transforms whose top is the current world transform.
///
/// The stack always holds at least one entry. `push` copies the top, so
/// edits to the new top never alias the enclosing level. Vertices are
/// transformed with [`Mat4::transform_point3`] on [`top`](Self::top),
/// normals and other directions with [`Mat4::transform_vector3`].
#[derive(Debug, Clone)]
pub struct TransformStack {
    stack: Vec<Mat4>,
}

impl TransformStack {
    /// Create a stack holding a single identity transform.
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::IDENTITY],
        }
    }

    /// Clear the stack and seed it with a look-at view transform.
    ///
    /// `eye` is the camera position, `center` the point looked at, `up` the
    /// approximate up direction. Afterwards the stack holds exactly one
    /// entry mapping world space into camera space.
    pub fn reset(&mut self, eye: Vec3, center: Vec3, up: Vec3) {
        self.stack.clear();
        self.stack.push(Mat4::look_at_rh(eye, center, up));
    }

    /// Duplicate the top entry.
    pub fn push(&mut self) {
        let top = self.top();
        self.stack.push(top);
    }

    /// Remove the top entry.
    ///
    /// # Panics
    ///
    /// Panics if only one entry remains; the base transform cannot be
    /// popped.
    pub fn pop(&mut self) {
        assert!(
            self.stack.len() > 1,
            "transform stack underflow: cannot pop the base transform"
        );
        self.stack.pop();
    }

    /// Right-compose the top entry with a rotation of `angle_deg` degrees
    /// about `axis` (which need not be unit length).
    pub fn rotate(&mut self, angle_deg: f32, axis: Vec3) {
        let rotation = Mat4::from_axis_angle(axis.normalize(), angle_deg.to_radians());
        *self.top_mut() *= rotation;
    }

    /// Right-compose the top entry with a translation by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        *self.top_mut() *= Mat4::from_translation(delta);
    }

    /// The current world transform.
    pub fn top(&self) -> Mat4 {
        *self.stack.last().expect("transform stack is never empty")
    }

    /// Number of entries on the stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        self.stack.last_mut().expect("transform stack is never empty")
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_edit_pop_restores_top() {
        let mut stack = TransformStack::new();
        stack.translate(Vec3::new(1.0, 2.0, 3.0));
        let before = stack.top();

        stack.push();
        stack.translate(Vec3::new(7.0, -4.0, 0.5));
        stack.rotate(30.0, Vec3::Y);
        stack.pop();

        assert!(stack.top().abs_diff_eq(before, 1e-6));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_reset_maps_eye_to_origin() {
        let mut stack = TransformStack::new();
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let center = Vec3::ZERO;
        stack.reset(eye, center, Vec3::Y);

        assert_eq!(stack.depth(), 1);
        let eye_cam = stack.top().transform_point3(eye);
        assert!(eye_cam.length() < 1e-5);

        // The look-at target sits straight ahead, on the camera -Z axis.
        let center_cam = stack.top().transform_point3(center);
        assert!(center_cam.x.abs() < 1e-5);
        assert!(center_cam.y.abs() < 1e-5);
        assert!((center_cam.z + eye.length()).abs() < 1e-4);
    }

    #[test]
    fn test_rotate_degrees_about_z() {
        let mut stack = TransformStack::new();
        stack.rotate(90.0, Vec3::Z);

        let p = stack.top().transform_point3(Vec3::X);
        assert!((p - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_compose_order_is_right_multiplication() {
        // translate then rotate must give T * R, so a point is rotated
        // first and translated second.
        let mut stack = TransformStack::new();
        stack.translate(Vec3::new(5.0, 0.0, 0.0));
        stack.rotate(90.0, Vec3::Z);

        let p = stack.top().transform_point3(Vec3::X);
        assert!((p - Vec3::new(5.0, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_translate_ignores_vectors() {
        let mut stack = TransformStack::new();
        stack.translate(Vec3::new(10.0, 20.0, 30.0));

        let v = stack.top().transform_vector3(Vec3::X);
        assert!((v - Vec3::X).length() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "transform stack underflow")]
    fn test_pop_base_panics() {
        let mut stack = TransformStack::new();
        stack.pop();
    }
}

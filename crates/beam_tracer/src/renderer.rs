//! Renderer capability seam.

use std::sync::Arc;

use beam_core::{Frame, Material, SceneParams, Texture};
use beam_math::{Vec2, Vec3};
use thiserror::Error;

/// Errors a render pass can raise.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The pass was never begun (or already finished)
    #[error("no scene building: call begin_scene before end_scene")]
    NoScene,
}

/// Progress report handed to the host's yield callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderProgress {
    /// Rows fully rendered so far.
    pub rows_completed: u32,
    /// Total rows in the pass.
    pub total_rows: u32,
}

/// A renderer driven by the host's scene traversal.
///
/// The host opens a pass with `begin_scene`, interleaves transform-stack
/// operations with polygon streaming in any order, then calls `end_scene`
/// to finalize the geometry and render into the supplied frame. During
/// rendering, `on_yield` periodically takes control so the host can drain
/// pending events; the pass blocks until it returns. Streaming calls made
/// outside a pass are absorbed with a warning.
pub trait Renderer {
    /// Start a pass: reset all state and adopt the camera and lights.
    fn begin_scene(&mut self, params: SceneParams) -> Result<(), RenderError>;

    /// Duplicate the top transform.
    fn push_transform(&mut self);

    /// Discard the top transform.
    ///
    /// Popping the base transform is a precondition violation and panics.
    fn pop_transform(&mut self);

    /// Right-compose a rotation of `angle_deg` degrees about `axis` onto
    /// the top transform.
    fn rotate(&mut self, angle_deg: f32, axis: Vec3);

    /// Right-compose a translation by `delta` onto the top transform.
    fn translate(&mut self, delta: Vec3);

    /// Material for subsequently streamed polygons.
    fn set_material(&mut self, material: Arc<Material>);

    /// Texture for subsequently streamed polygons; `None` clears it.
    fn set_texture(&mut self, texture: Option<Arc<Texture>>);

    /// Open a polygon.
    fn begin_polygon(&mut self);

    /// Submit a vertex position in model space.
    fn vertex(&mut self, position: Vec3);

    /// Submit a vertex normal in model space, paired positionally with
    /// the vertices.
    fn normal(&mut self, normal: Vec3);

    /// Submit a texture coordinate, paired positionally with the
    /// vertices.
    fn tex_coord(&mut self, uv: Vec2);

    /// Close the open polygon and hand it to the engine under the current
    /// transform.
    fn end_polygon(&mut self);

    /// Finalize geometry and render the pass into `frame`.
    fn end_scene(
        &mut self,
        frame: &mut Frame<'_>,
        on_yield: &mut dyn FnMut(RenderProgress),
    ) -> Result<(), RenderError>;
}

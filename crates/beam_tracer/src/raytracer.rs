//! The ray tracing renderer.

use std::sync::Arc;
use std::time::Instant;

use beam_core::{Color, Frame, Material, Polygon, SceneParams, Texture};
use beam_math::{TransformStack, Vec2, Vec3};

use crate::camera::Camera;
use crate::engine::{stream_polygon, IntersectionEngine};
use crate::mesh_engine::MeshEngine;
use crate::renderer::{RenderError, RenderProgress, Renderer};
use crate::shading::shade_ray;
use crate::RenderSettings;

/// Rows rendered between yields to the host.
const YIELD_INTERVAL: u32 = 50;

/// Where the current pass stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PassState {
    /// No scene begun
    Idle,
    /// Accepting transforms and polygons
    Building,
    /// Geometry frozen; the pass rendered or rendering
    Done,
}

/// Offline ray tracer implementing [`Renderer`] over a pluggable
/// intersection engine.
///
/// One pass runs `begin_scene` -> streaming -> `end_scene`. The pass is
/// synchronous and single-threaded; `end_scene` blocks until the frame is
/// complete, handing control to the host's yield callback every
/// [`YIELD_INTERVAL`] rows. Streaming calls arriving outside a building
/// pass are absorbed with a warning rather than failing the render.
pub struct Raytracer<E: IntersectionEngine = MeshEngine> {
    engine: E,
    settings: RenderSettings,
    transforms: TransformStack,
    params: SceneParams,
    state: PassState,
    // Streaming state
    material: Option<Arc<Material>>,
    texture: Option<Arc<Texture>>,
    open: Option<Polygon>,
    polygon_count: u32,
}

impl Raytracer<MeshEngine> {
    /// Ray tracer over the bundled mesh engine with default settings.
    pub fn new() -> Self {
        Self::with_engine(MeshEngine::new())
    }
}

impl Default for Raytracer<MeshEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: IntersectionEngine> Raytracer<E> {
    /// Ray tracer over a caller-supplied engine.
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            settings: RenderSettings::default(),
            transforms: TransformStack::new(),
            params: SceneParams::default(),
            state: PassState::Idle,
            material: None,
            texture: None,
            open: None,
            polygon_count: 0,
        }
    }

    /// Set the render settings (builder style).
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Current render settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Mutable render settings.
    pub fn settings_mut(&mut self) -> &mut RenderSettings {
        &mut self.settings
    }

    /// Borrow the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn building(&self, what: &str) -> bool {
        if self.state == PassState::Building {
            true
        } else {
            log::warn!("{what} ignored outside scene building");
            false
        }
    }
}

impl<E: IntersectionEngine> Renderer for Raytracer<E> {
    fn begin_scene(&mut self, params: SceneParams) -> Result<(), RenderError> {
        self.engine.initialize();
        self.transforms.reset(params.eye, params.center, params.up);
        self.params = params;
        self.material = None;
        self.texture = None;
        self.open = None;
        self.polygon_count = 0;
        self.state = PassState::Building;
        Ok(())
    }

    fn push_transform(&mut self) {
        if self.building("push_transform") {
            self.transforms.push();
        }
    }

    fn pop_transform(&mut self) {
        if self.building("pop_transform") {
            self.transforms.pop();
        }
    }

    fn rotate(&mut self, angle_deg: f32, axis: Vec3) {
        if self.building("rotate") {
            self.transforms.rotate(angle_deg, axis);
        }
    }

    fn translate(&mut self, delta: Vec3) {
        if self.building("translate") {
            self.transforms.translate(delta);
        }
    }

    fn set_material(&mut self, material: Arc<Material>) {
        if self.building("set_material") {
            self.material = Some(material);
        }
    }

    fn set_texture(&mut self, texture: Option<Arc<Texture>>) {
        if self.building("set_texture") {
            self.texture = texture;
        }
    }

    fn begin_polygon(&mut self) {
        if !self.building("begin_polygon") {
            return;
        }
        if self.open.is_some() {
            log::warn!("begin_polygon while a polygon is open; discarding the open one");
        }
        self.open = Some(Polygon::new(self.material.clone(), self.texture.clone()));
    }

    fn vertex(&mut self, position: Vec3) {
        match &mut self.open {
            Some(polygon) => polygon.add_vertex(position),
            None => log::warn!("vertex outside begin_polygon/end_polygon"),
        }
    }

    fn normal(&mut self, normal: Vec3) {
        match &mut self.open {
            Some(polygon) => polygon.add_normal(normal),
            None => log::warn!("normal outside begin_polygon/end_polygon"),
        }
    }

    fn tex_coord(&mut self, uv: Vec2) {
        match &mut self.open {
            Some(polygon) => polygon.add_tex_coord(uv),
            None => log::warn!("tex_coord outside begin_polygon/end_polygon"),
        }
    }

    fn end_polygon(&mut self) {
        let Some(polygon) = self.open.take() else {
            log::warn!("end_polygon without begin_polygon");
            return;
        };
        stream_polygon(&mut self.engine, &self.transforms.top(), &polygon);
        self.polygon_count += 1;
    }

    fn end_scene(
        &mut self,
        frame: &mut Frame<'_>,
        on_yield: &mut dyn FnMut(RenderProgress),
    ) -> Result<(), RenderError> {
        if self.state != PassState::Building {
            return Err(RenderError::NoScene);
        }
        if self.open.is_some() {
            log::warn!("end_scene with an unterminated polygon; discarding it");
            self.open = None;
        }

        let start = Instant::now();
        self.engine.loading_complete();
        // Geometry is frozen from here; stray streaming calls (from the
        // yield callback, say) are absorbed
        self.state = PassState::Done;

        let width = frame.width();
        let height = frame.height();
        let n = self.settings.samples_per_side();
        let samples = (n * n) as f32;
        let camera = Camera::new(self.params.vfov, self.params.aspect);
        let world = self.transforms.top();

        for row in 0..height {
            for col in 0..width {
                let mut pixel = Color::ZERO;
                for sy in 0..n {
                    for sx in 0..n {
                        let ray = camera.sample_ray(row, col, sx, sy, n, width, height);
                        pixel += shade_ray(
                            &self.engine,
                            &ray,
                            &self.params.lights,
                            &world,
                            &self.settings,
                        );
                    }
                }
                frame.put_pixel(row, col, pixel / samples);
            }
            if row % YIELD_INTERVAL == 0 {
                on_yield(RenderProgress {
                    rows_completed: row + 1,
                    total_rows: height,
                });
            }
        }

        log::info!(
            "rendered {}x{} ({} polygons, {} samples/pixel) in {:.2?}",
            width,
            height,
            self.polygon_count,
            n * n,
            start.elapsed()
        );
        Ok(())
    }
}

//! Beam tracer - offline polygonal ray tracing.
//!
//! The host drives a [`Renderer`] with camera parameters, transform-stack
//! operations, and streamed polygons; [`Raytracer`] casts supersampled
//! primary rays through a pluggable [`IntersectionEngine`] and shades hits
//! with multi-light ambient/diffuse/specular terms, shadow rays, texture
//! lookup, and distance fog. [`MeshEngine`] is the bundled engine: fan
//! triangulation over a median-split BVH.

mod engine;
mod triangle;
mod bvh;
mod mesh_engine;
mod camera;
mod shading;
mod config;
mod renderer;
mod raytracer;

pub use engine::{stream_polygon, HitDetail, IntersectionEngine, PolygonId, SurfaceHit};
pub use triangle::{Corner, Triangle, TriangleHit};
pub use bvh::Bvh;
pub use mesh_engine::MeshEngine;
pub use camera::Camera;
pub use shading::{fog_blend, shade_ray, MAX_TRACE_DISTANCE};
pub use config::RenderSettings;
pub use renderer::{RenderError, RenderProgress, Renderer};
pub use raytracer::Raytracer;

/// Re-export commonly used types from the foundation crates
pub use beam_core::{Color, Frame, Light, Material, Polygon, SceneParams, Texture};
pub use beam_math::{Ray, TransformStack, Vec2, Vec3};

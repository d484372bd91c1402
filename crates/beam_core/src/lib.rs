//! Beam core - scene data shared between hosts and renderers.
//!
//! This crate provides:
//!
//! - **Surface data**: [`Material`] and [`Texture`], shared by `Arc`
//! - **Scene data**: [`Light`], [`SceneParams`], the transient [`Polygon`]
//! - **Output**: [`Frame`], a borrowed row-major RGB byte target
//!
//! Renderers live in `beam_tracer`; everything here is renderer-agnostic.

pub mod frame;
pub mod material;
pub mod polygon;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use frame::{quantize_channel, Frame, FrameError};
pub use material::{Color, Material};
pub use polygon::Polygon;
pub use scene::{Light, SceneParams};
pub use texture::{Texture, TextureError, TextureResult};

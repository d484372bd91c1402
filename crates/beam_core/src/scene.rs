//! Scene-level parameters shared between hosts and renderers.

use beam_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::Color;

/// A point light with per-term colors.
///
/// The position is stored exactly as the host supplied it; renderers
/// interpret it through the scene transform current at shading time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Light position in the host's coordinates.
    pub position: Vec3,
    /// Ambient contribution per RGB channel.
    pub ambient: Color,
    /// Diffuse contribution per RGB channel.
    pub diffuse: Color,
    /// Specular contribution per RGB channel.
    pub specular: Color,
}

impl Light {
    /// Create a light from its position and per-term colors.
    pub fn new(position: Vec3, ambient: Color, diffuse: Color, specular: Color) -> Self {
        Self {
            position,
            ambient,
            diffuse,
            specular,
        }
    }

    /// Light whose three terms share one color.
    pub fn uniform(position: Vec3, color: Color) -> Self {
        Self {
            position,
            ambient: color,
            diffuse: color,
            specular: color,
        }
    }
}

/// Camera and lighting parameters for one render pass.
///
/// The host assembles these once per pass; renderers read them and never
/// write back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneParams {
    /// Camera position.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub center: Vec3,
    /// Approximate up direction.
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub vfov: f32,
    /// Viewport aspect ratio (width over height).
    pub aspect: f32,
    /// Point lights active for the pass.
    pub lights: Vec<Light>,
}

impl SceneParams {
    /// Create scene parameters with no lights.
    pub fn new(eye: Vec3, center: Vec3, up: Vec3, vfov: f32, aspect: f32) -> Self {
        Self {
            eye,
            center,
            up,
            vfov,
            aspect,
            lights: Vec::new(),
        }
    }

    /// Add a light (builder style).
    pub fn with_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            center: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            vfov: 90.0,
            aspect: 1.0,
            lights: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_light() {
        let l = Light::uniform(Vec3::new(0.0, 3.0, 0.0), Vec3::splat(0.5));
        assert_eq!(l.ambient, l.diffuse);
        assert_eq!(l.diffuse, l.specular);
        assert_eq!(l.position, Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_with_light_appends() {
        let params = SceneParams::default()
            .with_light(Light::uniform(Vec3::X, Vec3::ONE))
            .with_light(Light::uniform(Vec3::Y, Vec3::ONE));
        assert_eq!(params.lights.len(), 2);
        assert_eq!(params.lights[0].position, Vec3::X);
    }

    #[test]
    fn test_scene_params_serde_round_trip() {
        let params = SceneParams::new(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            60.0,
            1.5,
        )
        .with_light(Light::uniform(Vec3::new(0.0, 3.0, 0.0), Vec3::splat(0.9)));

        let json = serde_json::to_string(&params).unwrap();
        let back: SceneParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}

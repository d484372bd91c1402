//! Surface reflectance description.

use beam_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Phong-style reflectance of a surface.
///
/// Polygons reference a material by `Arc`; the host owns the set and keeps
/// it alive for the duration of a render pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Ambient reflectance per RGB channel.
    pub ambient: Color,
    /// Diffuse reflectance per RGB channel.
    pub diffuse: Color,
    /// Specular reflectance per RGB channel.
    pub specular: Color,
    /// Specular exponent; higher values give tighter highlights.
    pub shininess: f32,
}

impl Material {
    /// Create a material from its reflectance triples.
    pub fn new(ambient: Color, diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Matte material: ambient and diffuse share `color`, no highlight.
    pub fn matte(color: Color) -> Self {
        Self {
            ambient: color,
            diffuse: color,
            specular: Color::ZERO,
            shininess: 1.0,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        // OpenGL-style defaults: dim ambient, bright diffuse, no highlight
        Self {
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ZERO,
            shininess: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matte_material() {
        let m = Material::matte(Vec3::new(0.3, 0.5, 0.7));
        assert_eq!(m.ambient, m.diffuse);
        assert_eq!(m.specular, Vec3::ZERO);
    }

    #[test]
    fn test_default_material() {
        let m = Material::default();
        assert_eq!(m.ambient, Vec3::splat(0.2));
        assert_eq!(m.diffuse, Vec3::splat(0.8));
        assert_eq!(m.shininess, 1.0);
    }

    #[test]
    fn test_material_serde_round_trip() {
        let m = Material::new(
            Vec3::new(0.1, 0.2, 0.3),
            Vec3::new(0.4, 0.5, 0.6),
            Vec3::new(0.7, 0.8, 0.9),
            32.0,
        );
        let json = serde_json::to_string(&m).unwrap();
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}

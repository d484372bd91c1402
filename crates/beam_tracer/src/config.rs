//! Render settings.

use beam_core::Color;
use beam_math::Vec3;
use serde::{Deserialize, Serialize};

/// Highest antialiasing level honored; higher requests clamp here.
const MAX_AA_LEVEL: u32 = 8;

/// Tunable render parameters, serializable so hosts can keep presets in
/// JSON.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Antialiasing level; the sub-pixel grid is 2^aa_level per side
    pub aa_level: u32,
    /// Color blended in by distance and returned outright on a miss
    pub fog_color: Color,
    /// Fog extinction coefficient; higher values thicken the fog
    pub extinction: f32,
}

impl RenderSettings {
    /// Settings with the defaults: no antialiasing, pale fog, extinction
    /// 1e-5.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the antialiasing level (builder style).
    pub fn with_aa_level(mut self, aa_level: u32) -> Self {
        self.aa_level = aa_level;
        self
    }

    /// Set the fog color and extinction coefficient (builder style).
    pub fn with_fog(mut self, fog_color: Color, extinction: f32) -> Self {
        self.fog_color = fog_color;
        self.extinction = extinction;
        self
    }

    /// Side length of the sub-pixel sample grid: 2^aa_level, clamped at
    /// 2^8.
    pub fn samples_per_side(&self) -> u32 {
        1 << self.aa_level.min(MAX_AA_LEVEL)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            aa_level: 0,
            fog_color: Vec3::new(0.862, 0.859, 0.874),
            extinction: 1e-5,
        }
    }
}

//! Resolved fog parameters read by the per-pixel shading.

use crate::core::types::{Vec2, Vec4};
use crate::fog::noise_pattern::NoisePattern;

/// Default fog color (130/255 gray, opaque).
pub const DEFAULT_FOG_COLOR: [f32; 4] = [130.0 / 255.0, 130.0 / 255.0, 130.0 / 255.0, 1.0];

/// Height fog parameters shared by both variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FogParameters {
    /// Blend multiplier, conventionally 0-3.
    pub density: f32,
    /// World Y at and below which fog reaches full density.
    pub start: f32,
    /// World Y at and above which there is no fog.
    pub end: f32,
    /// RGBA; only RGB is blended.
    pub color: Vec4,
}

impl Default for FogParameters {
    fn default() -> Self {
        Self {
            density: 1.0,
            start: 0.0,
            end: 2.0,
            color: Vec4::from_array(DEFAULT_FOG_COLOR),
        }
    }
}

/// Extra inputs for the animated variant.
#[derive(Clone, Debug)]
pub struct NoiseParameters {
    pub pattern: NoisePattern,
    /// Scroll speed in pattern tiles per second along world X / Z.
    pub speed: Vec2,
    /// How strongly the noise perturbs the fog weight, conventionally 0-3.
    pub amount: f32,
    /// World units covered by one tile of the pattern.
    pub world_scale: f32,
}

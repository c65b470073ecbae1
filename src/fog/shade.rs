//! Per-pixel height fog shading.
//!
//! Everything here is a pure function of its arguments so the frame pass can
//! run it over pixels in any order and on any thread.

use crate::core::types::{Vec2, Vec3, Vec4};
use crate::fog::params::{FogParameters, NoiseParameters};
use crate::math::FrustumCornerRays;

/// Height of `y` within the fog band: 0 at `start`, 1 at `end`, clamped.
///
/// A zero-width band is a hard step: 0 at or below `start`, 1 above it.
#[inline]
pub fn fog_factor(height: f32, params: &FogParameters) -> f32 {
    let span = params.end - params.start;
    if span == 0.0 {
        return if height > params.start { 1.0 } else { 0.0 };
    }
    ((height - params.start) / span).clamp(0.0, 1.0)
}

/// Blend weight toward the fog color for a surface at `height`.
///
/// Full `density` (saturated to 1) at or below `start`, zero at or above `end`.
#[inline]
pub fn fog_weight(height: f32, params: &FogParameters) -> f32 {
    ((1.0 - fog_factor(height, params)) * params.density).clamp(0.0, 1.0)
}

/// Signed noise perturbation at a world position, in `[-amount/2, amount/2]`.
///
/// The pattern is laid over the XZ plane and scrolls with `time`.
#[inline]
pub fn noise_modulation(world_position: Vec3, noise: &NoiseParameters, time: f32) -> f32 {
    let coord = Vec2::new(world_position.x, world_position.z) / noise.world_scale
        + noise.speed * time;
    (noise.pattern.sample(coord) - 0.5) * noise.amount
}

/// Fog weight with the animated noise applied.
#[inline]
pub fn animated_fog_weight(
    world_position: Vec3,
    params: &FogParameters,
    noise: &NoiseParameters,
    time: f32,
) -> f32 {
    let base = (1.0 - fog_factor(world_position.y, params)) * params.density;
    (base * (1.0 + noise_modulation(world_position, noise, time))).clamp(0.0, 1.0)
}

/// World position of the surface behind a pixel.
///
/// `depth` multiplies the interpolated ray directly, so it must be in the
/// units the rays were scaled for (eye depth for unit rays, linear 0..1
/// depth for rays scaled by the far plane).
#[inline]
pub fn reconstruct_world_position(
    depth: f32,
    uv: Vec2,
    rays: &FrustumCornerRays,
    camera_position: Vec3,
) -> Vec3 {
    camera_position + depth * rays.at_uv(uv)
}

/// Blend the fog color over `source`. Alpha is carried from the source.
#[inline]
pub fn apply_fog(source: Vec4, fog_color: Vec4, weight: f32) -> Vec4 {
    source.truncate().lerp(fog_color.truncate(), weight).extend(source.w)
}

/// Shade one pixel.
///
/// `noise` selects the animated variant; `time` is ignored without it.
#[allow(clippy::too_many_arguments)]
pub fn shade(
    source: Vec4,
    depth: f32,
    uv: Vec2,
    rays: &FrustumCornerRays,
    camera_position: Vec3,
    params: &FogParameters,
    noise: Option<&NoiseParameters>,
    time: f32,
) -> Vec4 {
    let world = reconstruct_world_position(depth, uv, rays, camera_position);
    let weight = match noise {
        Some(noise) => animated_fog_weight(world, params, noise, time),
        None => fog_weight(world.y, params),
    };
    apply_fog(source, params.color, weight)
}

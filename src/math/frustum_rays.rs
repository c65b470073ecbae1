//! Frustum corner rays for depth-based position reconstruction
//!
//! Each ray points from the camera to a near-plane corner and is rescaled so
//! that its component along the forward axis is exactly 1. Multiplying the
//! (screen-interpolated) ray by an eye-space depth then lands on the surface
//! seen through that pixel, without inverting a projection matrix.

use crate::core::camera::CameraFrame;
use crate::core::types::{Vec2, Vec3};

pub const BOTTOM_LEFT: usize = 0;
pub const BOTTOM_RIGHT: usize = 1;
pub const TOP_RIGHT: usize = 2;
pub const TOP_LEFT: usize = 3;

/// The four corner rays of one frame, ordered bottom-left, bottom-right,
/// top-right, top-left.
///
/// Only valid for the camera state they were built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrustumCornerRays {
    pub rays: [Vec3; 4],
}

impl FrustumCornerRays {
    #[inline]
    pub fn bottom_left(&self) -> Vec3 {
        self.rays[BOTTOM_LEFT]
    }

    #[inline]
    pub fn bottom_right(&self) -> Vec3 {
        self.rays[BOTTOM_RIGHT]
    }

    #[inline]
    pub fn top_right(&self) -> Vec3 {
        self.rays[TOP_RIGHT]
    }

    #[inline]
    pub fn top_left(&self) -> Vec3 {
        self.rays[TOP_LEFT]
    }

    /// Bilinearly interpolate the ray for a screen UV (v = 0 at the bottom).
    #[inline]
    pub fn at_uv(&self, uv: Vec2) -> Vec3 {
        let bottom = self.bottom_left().lerp(self.bottom_right(), uv.x);
        let top = self.top_left().lerp(self.top_right(), uv.x);
        bottom.lerp(top, uv.y)
    }

    /// Rays multiplied by `factor`.
    ///
    /// With `factor = far`, a linear 0..1 depth sample can be used directly as
    /// the multiplier instead of eye depth.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            rays: self.rays.map(|r| r * factor),
        }
    }
}

/// Builds [`FrustumCornerRays`] from camera intrinsics and orientation.
pub struct FrustumRayBuilder;

impl FrustumRayBuilder {
    /// Compute the corner rays.
    ///
    /// `fov_degrees` is the vertical field of view. Degenerate input (zero
    /// near plane, non-finite values) yields NaN/Inf rays rather than an error.
    pub fn compute(
        fov_degrees: f32,
        near: f32,
        aspect: f32,
        right: Vec3,
        up: Vec3,
        forward: Vec3,
    ) -> FrustumCornerRays {
        let half_height = near * (fov_degrees * 0.5).to_radians().tan();
        let to_right = right * half_height * aspect;
        let to_top = up * half_height;
        let center = forward * near;

        let corners = [
            center - to_top - to_right,
            center + to_right - to_top,
            center + to_top + to_right,
            center + to_top - to_right,
        ];

        FrustumCornerRays {
            rays: corners.map(|corner| {
                let scale = corner.length() / near;
                corner.normalize() * scale
            }),
        }
    }
}

/// Compute corner rays for a camera snapshot.
pub fn compute_corner_rays(frame: &CameraFrame) -> FrustumCornerRays {
    FrustumRayBuilder::compute(
        frame.fov_degrees,
        frame.near,
        frame.aspect,
        frame.right,
        frame.up,
        frame.forward,
    )
}

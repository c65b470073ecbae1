//! View-ray math for screen-space reconstruction

pub mod frustum_rays;

pub use frustum_rays::{compute_corner_rays, FrustumCornerRays, FrustumRayBuilder};

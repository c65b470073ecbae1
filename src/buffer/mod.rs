//! CPU-side frame buffers read and written by the fog pass

pub mod color;
pub mod depth;

pub use color::ColorImage;
pub use depth::{linearize_device_depth, DepthImage};

use crate::core::types::Vec2;

/// Screen UV of a pixel center. Row 0 is the top of the image, so v is
/// flipped to put v = 0 on the bottom edge.
#[inline]
pub fn pixel_uv(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) / width as f32,
        1.0 - (y as f32 + 0.5) / height as f32,
    )
}

//! Full-frame fog compositing.
//!
//! Rays are built once on the calling thread, then every output pixel is
//! shaded independently with rayon. Each row is a disjoint `&mut` slice, so
//! the pass needs no locking.

use rayon::prelude::*;

use crate::buffer::{pixel_uv, ColorImage, DepthImage};
use crate::core::camera::CameraFrame;
use crate::core::error::Error;
use crate::core::types::{Result, Vec3};
use crate::fog::config::FogSettings;
use crate::fog::program::FogProgram;
use crate::fog::shade::shade;
use crate::math::{compute_corner_rays, FrustumCornerRays};

/// Per-frame inputs shared read-only by every pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FogFrame {
    /// Corner rays scaled by the far plane, so linear 0..1 depth
    /// reconstructs the camera-relative offset directly.
    pub rays: FrustumCornerRays,
    pub camera_position: Vec3,
    /// Animation time in seconds.
    pub time: f32,
}

impl FogFrame {
    /// Build the frame state for the camera's current pose.
    pub fn new(camera: &CameraFrame, time: f32) -> Self {
        Self {
            rays: compute_corner_rays(camera).scaled(camera.far),
            camera_position: camera.position,
            time,
        }
    }
}

/// Composite fog into `dest`.
///
/// With `program == None` the source is copied through unchanged.
pub fn composite_into(
    program: Option<&FogProgram>,
    frame: &FogFrame,
    source: &ColorImage,
    depth: &DepthImage,
    dest: &mut ColorImage,
) -> Result<()> {
    if source.dimensions() != depth.dimensions() {
        return Err(Error::DimensionMismatch {
            color: source.dimensions(),
            depth: depth.dimensions(),
        });
    }
    if dest.dimensions() != source.dimensions() {
        *dest = ColorImage::new(source.width(), source.height(), Default::default());
    }

    let Some(program) = program else {
        log::debug!("No fog program, passing frame through");
        dest.pixels_mut().copy_from_slice(source.pixels());
        return Ok(());
    };

    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Ok(());
    }

    let params = program.params();
    let noise = program.noise();
    let src = source.pixels();
    let depths = depth.values();

    dest.pixels_mut()
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let base = y * width as usize;
            for (x, out) in row.iter_mut().enumerate() {
                let i = base + x;
                let uv = pixel_uv(x as u32, y as u32, width, height);
                *out = shade(
                    src[i],
                    depths[i],
                    uv,
                    &frame.rays,
                    frame.camera_position,
                    params,
                    noise,
                    frame.time,
                );
            }
        });

    Ok(())
}

/// Composite fog into a new image.
pub fn composite(
    program: Option<&FogProgram>,
    frame: &FogFrame,
    source: &ColorImage,
    depth: &DepthImage,
) -> Result<ColorImage> {
    let mut dest = ColorImage::new(source.width(), source.height(), Default::default());
    composite_into(program, frame, source, depth, &mut dest)?;
    Ok(dest)
}

/// Host-facing fog effect: owns the (optional) program and runs the frame.
pub struct FogPass {
    program: Option<FogProgram>,
}

impl FogPass {
    /// Build the program from settings. A failure is logged and leaves the
    /// pass in pass-through mode.
    pub fn new(settings: &FogSettings) -> Self {
        let program = match FogProgram::build(settings) {
            Ok(program) => Some(program),
            Err(e) => {
                log::warn!("Fog program unavailable, fog disabled: {}", e);
                None
            }
        };
        Self { program }
    }

    pub fn with_program(program: Option<FogProgram>) -> Self {
        Self { program }
    }

    #[inline]
    pub fn program(&self) -> Option<&FogProgram> {
        self.program.as_ref()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.program.is_some()
    }

    /// The pass reconstructs positions from depth, so hosts must render a
    /// depth buffer whenever it is attached.
    #[inline]
    pub fn requires_depth(&self) -> bool {
        true
    }

    /// Composite one frame. `time` drives the noise scroll.
    pub fn render(
        &self,
        camera: &CameraFrame,
        time: f32,
        source: &ColorImage,
        depth: &DepthImage,
    ) -> Result<ColorImage> {
        let frame = FogFrame::new(camera, time);
        let start = std::time::Instant::now();
        let out = composite(self.program(), &frame, source, depth)?;
        log::debug!("Fog pass {}x{} in {:.2}ms", source.width(), source.height(),
            start.elapsed().as_secs_f64() * 1000.0);
        Ok(out)
    }
}

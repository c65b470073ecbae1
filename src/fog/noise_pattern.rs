//! Tileable 2D scalar noise used to animate the fog.

use std::f64::consts::TAU;
use std::path::Path;

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rayon::prelude::*;

use crate::core::error::Error;
use crate::core::types::{Result, Vec2};

/// Grid of values in [0, 1], sampled with wrap-around addressing.
#[derive(Clone, Debug, PartialEq)]
pub struct NoisePattern {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl NoisePattern {
    pub fn from_values(width: u32, height: u32, values: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidNoise(format!(
                "pattern must not be empty ({width}x{height})"
            )));
        }
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(Error::BufferSize {
                width,
                height,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { width, height, values })
    }

    /// Generate a seamless square pattern from fractal Perlin noise.
    ///
    /// Each axis is mapped onto a circle in 4D noise space, so the pattern
    /// wraps in both directions. `frequency` is roughly the number of
    /// features across one tile.
    pub fn procedural(size: u32, seed: u32, frequency: f32, octaves: u32) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidNoise("procedural size must be > 0".into()));
        }

        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(octaves.max(1) as usize)
            .set_persistence(0.5)
            .set_lacunarity(2.0);
        let radius = frequency as f64 / TAU;
        let n = size as usize;

        let values: Vec<f32> = (0..n * n)
            .into_par_iter()
            .map(|i| {
                let a = TAU * (i % n) as f64 / n as f64;
                let b = TAU * (i / n) as f64 / n as f64;
                let p = [
                    radius * a.cos(),
                    radius * a.sin(),
                    radius * b.cos(),
                    radius * b.sin(),
                ];
                (fbm.get(p) as f32 * 0.5 + 0.5).clamp(0.0, 1.0)
            })
            .collect();

        Self::from_values(size, size, values)
    }

    /// Load a pattern from an image, using its luma channel.
    pub fn from_image(path: &Path) -> Result<Self> {
        let img = image::open(path)?.to_luma8();
        let values = img.pixels().map(|p| p.0[0] as f32 / 255.0).collect();
        Self::from_values(img.width(), img.height(), values)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn texel(&self, x: i64, y: i64) -> f32 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.values[y * self.width as usize + x]
    }

    /// Bilinear sample at normalized coordinates; one unit is one tile.
    ///
    /// Non-finite coordinates sample the tile origin.
    pub fn sample(&self, uv: Vec2) -> f32 {
        let x = wrap_unit(uv.x) * self.width as f32 - 0.5;
        let y = wrap_unit(uv.y) * self.height as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (ix, iy) = (x0 as i64, y0 as i64);

        let bottom = lerp(self.texel(ix, iy), self.texel(ix + 1, iy), fx);
        let top = lerp(self.texel(ix, iy + 1), self.texel(ix + 1, iy + 1), fx);
        lerp(bottom, top, fy)
    }
}

/// Fold a coordinate into one tile so texel indices stay small.
#[inline]
fn wrap_unit(v: f32) -> f32 {
    if v.is_finite() { v.rem_euclid(1.0) } else { 0.0 }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

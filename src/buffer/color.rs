//! RGBA color buffer

use std::path::Path;

use image::RgbaImage;

use crate::core::error::Error;
use crate::core::types::{Result, Vec4};

/// Row-major RGBA image in linear float, row 0 at the top.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorImage {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl ColorImage {
    /// Create an image filled with one color.
    pub fn new(width: u32, height: u32, fill: Vec4) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Wrap existing pixels. Fails if the count does not match the size.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Vec4>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
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
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Vec4] {
        &mut self.pixels
    }

    /// Pixel at (x, y). Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Vec4) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert from an 8-bit image (values divided by 255).
    pub fn from_rgba8(img: &RgbaImage) -> Self {
        let pixels = img
            .pixels()
            .map(|p| Vec4::from_array(p.0.map(|c| c as f32 / 255.0)))
            .collect();
        Self {
            width: img.width(),
            height: img.height(),
            pixels,
        }
    }

    /// Convert to an 8-bit image, clamping to [0, 1].
    pub fn to_rgba8(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let c = self.get(x, y).clamp(Vec4::ZERO, Vec4::ONE) * 255.0;
            image::Rgba(c.round().to_array().map(|v| v as u8))
        })
    }

    /// Load any format the `image` crate understands.
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path)?.to_rgba8();
        Ok(Self::from_rgba8(&img))
    }

    /// Save as 8-bit RGBA; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_rgba8().save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_size_check() {
        let err = ColorImage::from_pixels(2, 2, vec![Vec4::ONE; 3]).unwrap_err();
        assert!(matches!(err, Error::BufferSize { expected: 4, actual: 3, .. }));
        assert!(ColorImage::from_pixels(2, 2, vec![Vec4::ONE; 4]).is_ok());
    }

    #[test]
    fn test_get_set_row_major() {
        let mut img = ColorImage::new(3, 2, Vec4::ZERO);
        img.set(2, 1, Vec4::ONE);
        assert_eq!(img.pixels()[5], Vec4::ONE);
        assert_eq!(img.get(2, 1), Vec4::ONE);
        assert_eq!(img.get(0, 0), Vec4::ZERO);
    }

    #[test]
    fn test_rgba8_conversion() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, image::Rgba([255, 0, 51, 255]));
        rgba.put_pixel(1, 0, image::Rgba([0, 128, 0, 0]));

        let img = ColorImage::from_rgba8(&rgba);
        assert!((img.get(0, 0) - Vec4::new(1.0, 0.0, 0.2, 1.0)).length() < 1e-6);

        assert_eq!(img.to_rgba8(), rgba);
    }

    #[test]
    fn test_to_rgba8_clamps() {
        let img = ColorImage::new(1, 1, Vec4::new(2.0, -1.0, 0.5, 1.0));
        let out = img.to_rgba8();
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 128, 255]);
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/color.png");
        let img = ColorImage::new(4, 3, Vec4::new(1.0, 0.0, 0.0, 1.0));
        img.save(&path).unwrap();

        let loaded = ColorImage::load(&path).unwrap();
        assert_eq!(loaded, img);
    }
}

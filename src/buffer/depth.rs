//! Linear depth buffer

use std::path::Path;

use image::{ImageBuffer, Luma};

use crate::core::error::Error;
use crate::core::types::Result;

/// Convert a 0..1 device depth value from a right-handed perspective
/// projection (near maps to 0, far to 1) into linear 0..1 depth.
///
/// The result is eye depth divided by `far`.
#[inline]
pub fn linearize_device_depth(device: f32, near: f32, far: f32) -> f32 {
    let eye = near * far / (far - device * (far - near));
    eye / far
}

/// Row-major linear depth, 0 at the camera and 1 at the far plane.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthImage {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl DepthImage {
    pub fn new(width: u32, height: u32, fill: f32) -> Self {
        Self {
            width,
            height,
            values: vec![fill; width as usize * height as usize],
        }
    }

    /// Wrap existing linear depth values.
    pub fn from_values(width: u32, height: u32, values: Vec<f32>) -> Result<Self> {
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

    /// Build from a device depth buffer, linearizing every sample.
    pub fn from_device_depth(
        width: u32,
        height: u32,
        device: &[f32],
        near: f32,
        far: f32,
    ) -> Result<Self> {
        let values = device
            .iter()
            .map(|&d| linearize_device_depth(d, near, far))
            .collect();
        Self::from_values(width, height, values)
    }

    /// Interpret a 16-bit grayscale image as depth (0..65535 → 0..1).
    pub fn from_luma16(img: &ImageBuffer<Luma<u16>, Vec<u16>>) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            values: img.pixels().map(|p| p.0[0] as f32 / u16::MAX as f32).collect(),
        }
    }

    /// Encode as a 16-bit grayscale image, clamping to [0, 1].
    pub fn to_luma16(&self) -> ImageBuffer<Luma<u16>, Vec<u16>> {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let d = self.get(x, y).clamp(0.0, 1.0);
            Luma([(d * u16::MAX as f32).round() as u16])
        })
    }

    /// Load a depth image. Color images are reduced to luma first.
    pub fn load(path: &Path) -> Result<Self> {
        let img = image::open(path)?.to_luma16();
        Ok(Self::from_luma16(&img))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.to_luma16().save(path)?;
        Ok(())
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
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, depth: f32) {
        let i = y as usize * self.width as usize + x as usize;
        self.values[i] = depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linearize_endpoints() {
        let (near, far) = (0.5, 200.0);
        assert!((linearize_device_depth(0.0, near, far) - near / far).abs() < 1e-6);
        assert!((linearize_device_depth(1.0, near, far) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_linearize_matches_projection() {
        let (near, far) = (0.1, 100.0);
        let proj = glam::Mat4::perspective_rh(1.0, 1.0, near, far);
        for eye in [0.5_f32, 3.0, 42.0, 99.0] {
            let clip = proj * glam::Vec4::new(0.0, 0.0, -eye, 1.0);
            let device = clip.z / clip.w;
            let linear = linearize_device_depth(device, near, far);
            assert!((linear * far - eye).abs() / eye < 1e-3, "eye {eye}");
        }
    }

    #[test]
    fn test_from_values_size_check() {
        assert!(DepthImage::from_values(2, 2, vec![0.0; 5]).is_err());
        let depth = DepthImage::from_values(2, 1, vec![0.25, 0.75]).unwrap();
        assert_eq!(depth.get(1, 0), 0.75);
    }

    #[test]
    fn test_luma16_decode() {
        let mut img = ImageBuffer::<Luma<u16>, Vec<u16>>::new(2, 1);
        img.put_pixel(0, 0, Luma([0]));
        img.put_pixel(1, 0, Luma([u16::MAX]));
        let depth = DepthImage::from_luma16(&img);
        assert_eq!(depth.values(), &[0.0, 1.0]);
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depth.png");
        let mut depth = DepthImage::new(3, 2, 0.5);
        depth.set(0, 1, 1.0);
        depth.save(&path).unwrap();

        let loaded = DepthImage::load(&path).unwrap();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get(0, 1), 1.0);
        assert!((loaded.get(2, 0) - 0.5).abs() < 1e-4);
    }
}

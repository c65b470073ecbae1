//! Error types for the fog compositor

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Color buffer is {color:?} but depth buffer is {depth:?}")]
    DimensionMismatch {
        color: (u32, u32),
        depth: (u32, u32),
    },

    #[error("Buffer of {width}x{height} needs {expected} values, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Noise error: {0}")]
    InvalidNoise(String),
}

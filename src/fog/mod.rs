//! Screen-space height fog.
//!
//! A host builds a [`FogProgram`] (or a [`FogPass`] that owns one) from
//! [`FogSettings`], then each frame hands the pass a camera snapshot, the
//! animation time, the rendered color and its linear depth. Without a program
//! the pass is a pass-through copy.

pub mod config;
pub mod noise_pattern;
pub mod params;
pub mod pass;
pub mod program;
pub mod shade;
pub mod uniform;

// Re-exports
pub use config::{FogSettings, NoiseSettings, NoiseSource};
pub use noise_pattern::NoisePattern;
pub use params::{FogParameters, NoiseParameters};
pub use pass::{composite, composite_into, FogFrame, FogPass};
pub use program::FogProgram;
pub use shade::{fog_weight, shade};
pub use uniform::FogUniform;

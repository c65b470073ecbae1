//! Heightfog - screen-space height fog post-processing

pub mod core;
pub mod math;
pub mod buffer;
pub mod fog;

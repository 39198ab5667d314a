//! # Raster Images
//!
//! Decoded pixel buffers and the loader that produces them from files.

pub mod loader;
pub mod types;

pub use loader::ImageLoader;
pub use types::{readable_size, CompositeResult, RasterImage, SourceImage};

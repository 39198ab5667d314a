//! # Bulk-Watermark
//!
//! Batch-apply a watermark image onto photos, preview the result, and export
//! the composites as PNG files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use bulk_watermark::{
//!     composition::BatchEngine,
//!     config::Config,
//!     export::ExportWriter,
//!     raster::ImageLoader,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let watermark = ImageLoader::default_watermark()?;
//!
//! let engine = BatchEngine::new(&config);
//! let photos = vec![PathBuf::from("beach.jpg"), PathBuf::from("city.png")];
//! let report = engine.run(&photos, &watermark, &config.placement).await;
//!
//! let exported = ExportWriter::new(&config.export.output_dir).write_report(&report);
//! println!("{} written, {} failed", exported.written.len(), report.failed().count() + exported.failed.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Compositing a single image
//!
//! ```rust
//! use bulk_watermark::{composite, Anchor, PlacementConfig, RasterImage};
//!
//! let photo = RasterImage::new_filled(1000, 800, [30, 30, 30, 255]);
//! let mark = RasterImage::new_filled(100, 50, [255, 255, 255, 255]);
//! let config = PlacementConfig {
//!     size_percent: 10.0,
//!     opacity: 1.0,
//!     anchor: Anchor::BottomRight,
//!     offset_x: 0,
//!     offset_y: 0,
//! };
//!
//! let result = composite(&photo, &mark, &config).unwrap();
//! assert_eq!(result.get_pixel(950, 775), [255, 255, 255, 255]);
//! ```
//!
//! ## Architecture
//!
//! - [`composition`] - Compositor, batch engine and preview session
//! - [`placement`] - Anchor, placement parameters and drag handling
//! - [`raster`] - Image buffers and loading
//! - [`export`] - Output naming and PNG writing
//! - [`config`] - Configuration management

pub mod composition;
pub mod config;
pub mod error;
pub mod export;
pub mod placement;
pub mod raster;

// Re-export commonly used types for convenience
pub use crate::{
    composition::{composite, BatchEngine, Compositor, PreviewSession},
    config::Config,
    error::{Result, WatermarkError},
    placement::{Anchor, PlacementConfig},
    raster::{CompositeResult, ImageLoader, RasterImage},
};

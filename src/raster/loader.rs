use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{LoadError, Result, WatermarkError};
use crate::raster::types::{readable_size, RasterImage, SourceImage};

/// Watermark used when the user does not supply one
const DEFAULT_WATERMARK_PNG: &[u8] = include_bytes!("../../assets/watermark.png");

/// Decodes photo and watermark files into rasters
pub struct ImageLoader;

impl ImageLoader {
    /// Read and decode an image file.
    ///
    /// Decoding runs on the blocking pool so large photos do not stall the
    /// runtime.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<SourceImage> {
        let path = path.as_ref();
        let label = path.display().to_string();

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            warn!("Failed to read {}: {}", label, e);
            LoadError::NotFound { path: label.clone() }
        })?;

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string);
        let byte_size = bytes.len() as u64;

        let decode_label = label.clone();
        let image = tokio::task::spawn_blocking(move || Self::decode(&bytes, &decode_label))
            .await
            .map_err(|e| WatermarkError::generic(format!("decode task for {} failed: {}", label, e)))??;

        debug!(
            "Loaded {} ({}x{}, {})",
            label,
            image.width(),
            image.height(),
            readable_size(byte_size)
        );

        Ok(SourceImage::new(name, image).with_byte_size(byte_size))
    }

    /// Decode an in-memory encoded image; `label` names it in errors
    pub fn decode(bytes: &[u8], label: &str) -> Result<RasterImage> {
        let image = image::load_from_memory(bytes).map_err(|e| LoadError::DecodeFailure {
            path: label.to_string(),
            reason: e.to_string(),
        })?;
        Ok(RasterImage::from_dynamic(image))
    }

    /// The bundled default watermark
    pub fn default_watermark() -> Result<RasterImage> {
        Self::decode(DEFAULT_WATERMARK_PNG, "bundled watermark")
    }

    /// Load the watermark at `path`, or the bundled one when no path is given
    pub async fn load_watermark(path: Option<&Path>) -> Result<RasterImage> {
        match path {
            Some(path) => {
                info!("Using watermark {:?}", path);
                Ok(Self::load(path).await?.image)
            }
            None => {
                info!("Using bundled watermark");
                Self::default_watermark()
            }
        }
    }
}

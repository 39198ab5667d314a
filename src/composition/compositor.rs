use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::composition::blend;
use crate::error::{CompositeError, Result};
use crate::placement::PlacementConfig;
use crate::raster::{CompositeResult, RasterImage};

/// Resampling filter used when scaling the watermark.
///
/// Nearest-neighbour is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    /// Bilinear
    #[default]
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Where the scaled watermark lands on the base image.
///
/// `x`/`y` are the top-left corner and may be negative or beyond the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkPlacement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl WatermarkPlacement {
    /// Whether any part of the rectangle overlaps a `width` x `height` canvas
    pub fn intersects(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x < i64::from(width)
            && self.y < i64::from(height)
            && self.x + i64::from(self.width) > 0
            && self.y + i64::from(self.height) > 0
    }
}

/// Renders a watermark onto a base image.
///
/// Compositing is a pure function of the two images, the placement and the
/// filter: the same inputs always give the same pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor {
    filter: ResampleFilter,
}

impl Compositor {
    pub fn new(filter: ResampleFilter) -> Self {
        Self { filter }
    }

    /// Compute the scaled watermark rectangle without rendering anything
    pub fn placement(
        &self,
        base: &RasterImage,
        watermark: &RasterImage,
        config: &PlacementConfig,
    ) -> Result<WatermarkPlacement> {
        if watermark.width() == 0 {
            return Err(CompositeError::InvalidWatermark {
                width: watermark.width(),
                height: watermark.height(),
            }
            .into());
        }

        let width = config.target_width(base.width());
        let aspect = f64::from(watermark.height()) / f64::from(watermark.width());
        let height = (f64::from(width) * aspect).round() as u32;

        let (x0, y0) = config.anchor.origin(base.width(), base.height(), width, height);

        Ok(WatermarkPlacement {
            x: x0 + i64::from(config.offset_x),
            y: y0 + i64::from(config.offset_y),
            width,
            height,
        })
    }

    /// Render `watermark` onto a copy of `base`.
    ///
    /// Neither input is modified. On error no buffer is produced.
    pub fn composite(
        &self,
        base: &RasterImage,
        watermark: &RasterImage,
        config: &PlacementConfig,
    ) -> Result<CompositeResult> {
        let placement = self.placement(base, watermark, config)?;
        let mut canvas = base.as_image().clone();

        debug!(
            "Watermark {}x{} at ({}, {}) on {}x{}, opacity {:.2}",
            placement.width,
            placement.height,
            placement.x,
            placement.y,
            base.width(),
            base.height(),
            config.opacity
        );

        if config.opacity > 0.0 && placement.intersects(base.width(), base.height()) {
            let scaled = self.scale_watermark(watermark, placement.width, placement.height);
            blend::blend_at(&mut canvas, &scaled, placement.x, placement.y, config.opacity);
        }

        Ok(CompositeResult::new(canvas))
    }

    /// Resample in premultiplied space so fully transparent pixels carry no
    /// colour into the visible edge.
    fn scale_watermark(&self, watermark: &RasterImage, width: u32, height: u32) -> RgbaImage {
        let premul = blend::premultiply(watermark.as_image());
        let scaled = imageops::resize(&premul, width, height, self.filter.into());
        blend::unpremultiply(&scaled)
    }
}

/// Composite with the default (bilinear) filter
pub fn composite(
    base: &RasterImage,
    watermark: &RasterImage,
    config: &PlacementConfig,
) -> Result<CompositeResult> {
    Compositor::default().composite(base, watermark, config)
}

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    composition::compositor::Compositor,
    config::{BatchConfig, Config},
    error::Result,
    export::{fallback_source_name, output_filename},
    placement::PlacementConfig,
    raster::{readable_size, CompositeResult, ImageLoader, RasterImage, SourceImage},
};

/// Outcome for one image of a batch
#[derive(Debug)]
pub struct BatchItem {
    /// Position of the image in the batch input
    pub index: usize,

    /// Original file name, when the image came from a file
    pub source_name: Option<String>,

    /// File name the composite should be exported under
    pub output_name: String,

    /// The composite, or why this image could not be produced
    pub outcome: Result<CompositeResult>,
}

impl BatchItem {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Name used in logs: source name if known, otherwise the output name
    pub fn label(&self) -> &str {
        self.source_name.as_deref().unwrap_or(&self.output_name)
    }
}

/// Per-image results of a batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items that produced a composite, with the composite
    pub fn succeeded(&self) -> impl Iterator<Item = (&BatchItem, &CompositeResult)> {
        self.items
            .iter()
            .filter_map(|item| item.outcome.as_ref().ok().map(|result| (item, result)))
    }

    /// Items that failed
    pub fn failed(&self) -> impl Iterator<Item = &BatchItem> {
        self.items.iter().filter(|item| !item.is_ok())
    }

    /// True when every image was composited
    pub fn is_complete(&self) -> bool {
        self.items.iter().all(BatchItem::is_ok)
    }
}

/// Applies one watermark and one placement to many images.
///
/// A failure on one image is recorded against that image and the rest of the
/// batch carries on.
pub struct BatchEngine {
    compositor: Compositor,
    batch: BatchConfig,
    /// Worker pool for parallel batches, built once per engine
    pool: Option<rayon::ThreadPool>,
}

impl BatchEngine {
    pub fn new(config: &Config) -> Self {
        let batch = config.batch.clone();
        let pool = if batch.parallel {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(batch.processing_threads)
                .build()
            {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!("Could not start worker pool ({}), compositing sequentially", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            compositor: Compositor::new(config.render.filter),
            batch,
            pool,
        }
    }

    /// Composite every already-loaded image
    pub fn composite_all(
        &self,
        sources: &[SourceImage],
        watermark: &RasterImage,
        placement: &PlacementConfig,
    ) -> BatchReport {
        let placement = *placement;
        debug!(
            "Compositing {} images ({})",
            sources.len(),
            if self.batch.parallel { "parallel" } else { "sequential" }
        );

        let items = match &self.pool {
            Some(pool) if sources.len() > 1 => pool.install(|| {
                sources
                    .par_iter()
                    .enumerate()
                    .map(|(index, source)| self.composite_one(index, source, watermark, &placement))
                    .collect::<Vec<_>>()
            }),
            _ => self.composite_sequential(sources, watermark, &placement),
        };

        BatchReport { items }
    }

    /// Load every path and composite it.
    ///
    /// Unreadable or undecodable files become failed items.
    pub async fn run(
        &self,
        inputs: &[PathBuf],
        watermark: &RasterImage,
        placement: &PlacementConfig,
    ) -> BatchReport {
        info!("🖼️  Processing {} images", inputs.len());

        let mut items = Vec::with_capacity(inputs.len());
        for (index, path) in inputs.iter().enumerate() {
            let item = match ImageLoader::load(path).await {
                Ok(source) => {
                    if let Some(size) = source.byte_size {
                        debug!("   {} ({})", path.display(), readable_size(size));
                    }
                    self.composite_one(index, &source, watermark, placement)
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    let source_name = file_name(path);
                    BatchItem {
                        index,
                        output_name: item_output_name(index, source_name.as_deref()),
                        source_name,
                        outcome: Err(e),
                    }
                }
            };
            items.push(item);
        }

        let report = BatchReport { items };
        info!(
            "   ✅ {} composited, {} failed",
            report.succeeded().count(),
            report.failed().count()
        );
        report
    }

    fn composite_sequential(
        &self,
        sources: &[SourceImage],
        watermark: &RasterImage,
        placement: &PlacementConfig,
    ) -> Vec<BatchItem> {
        sources
            .iter()
            .enumerate()
            .map(|(index, source)| self.composite_one(index, source, watermark, placement))
            .collect()
    }

    fn composite_one(
        &self,
        index: usize,
        source: &SourceImage,
        watermark: &RasterImage,
        placement: &PlacementConfig,
    ) -> BatchItem {
        let output_name = item_output_name(index, source.name.as_deref());

        let outcome = self.compositor.composite(&source.image, watermark, placement);
        if let Err(e) = &outcome {
            warn!("Failed to composite {}: {}", output_name, e);
        }

        BatchItem {
            index,
            source_name: source.name.clone(),
            output_name,
            outcome,
        }
    }
}

/// Unnamed items are exported as `image_<index + 1>_wm.png`
fn item_output_name(index: usize, source_name: Option<&str>) -> String {
    match source_name {
        Some(name) => output_filename(Some(name)),
        None => output_filename(Some(&fallback_source_name(index))),
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CompositeError, LoadError, WatermarkError};
    use crate::export::encode_png;
    use tempfile::tempdir;

    fn sources() -> Vec<SourceImage> {
        vec![
            SourceImage::new(Some("beach.jpg".to_string()), RasterImage::new_filled(200, 100, [0, 0, 0, 255])),
            SourceImage::new(None, RasterImage::new_filled(64, 64, [0, 0, 255, 255])),
            SourceImage::new(Some("city.png".to_string()), RasterImage::new_filled(120, 300, [9, 9, 9, 255])),
        ]
    }

    fn watermark() -> RasterImage {
        RasterImage::new_filled(40, 20, [255, 255, 255, 255])
    }

    #[test]
    fn test_composite_all_names_and_order() {
        let engine = BatchEngine::new(&Config::default());
        let report = engine.composite_all(&sources(), &watermark(), &PlacementConfig::default());

        assert!(report.is_complete());
        let names: Vec<_> = report.items.iter().map(|item| item.output_name.as_str()).collect();
        assert_eq!(names, ["beach_wm.png", "image_2_wm.png", "city_wm.png"]);

        let (_, city) = report.succeeded().nth(2).unwrap();
        assert_eq!((city.width(), city.height()), (120, 300));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut config = Config::default();
        let sequential = BatchEngine::new(&config).composite_all(&sources(), &watermark(), &config.placement);

        config.batch.parallel = true;
        config.batch.processing_threads = 2;
        let parallel = BatchEngine::new(&config).composite_all(&sources(), &watermark(), &config.placement);

        for ((_, a), (_, b)) in sequential.succeeded().zip(parallel.succeeded()) {
            assert_eq!(a.as_rgba_bytes(), b.as_rgba_bytes());
        }
        assert_eq!(parallel.succeeded().count(), 3);
    }

    #[test]
    fn test_parallel_engine_reuses_pool() {
        let mut config = Config::default();
        config.batch.parallel = true;
        config.batch.processing_threads = 2;
        let engine = BatchEngine::new(&config);
        assert!(engine.pool.is_some());

        let first = engine.composite_all(&sources(), &watermark(), &config.placement);
        let second = engine.composite_all(&sources(), &watermark(), &config.placement);

        assert!(first.is_complete());
        assert!(second.is_complete());
        assert_eq!(second.len(), 3);
        for ((_, a), (_, b)) in first.succeeded().zip(second.succeeded()) {
            assert_eq!(a.as_rgba_bytes(), b.as_rgba_bytes());
        }
    }

    #[test]
    fn test_sequential_engine_has_no_pool() {
        let engine = BatchEngine::new(&Config::default());
        assert!(engine.pool.is_none());
    }

    #[test]
    fn test_invalid_watermark_fails_every_item() {
        let engine = BatchEngine::new(&Config::default());
        let empty = RasterImage::new_filled(0, 0, [0, 0, 0, 0]);
        let report = engine.composite_all(&sources(), &empty, &PlacementConfig::default());

        assert_eq!(report.failed().count(), 3);
        assert!(report.items.iter().all(|item| matches!(
            item.outcome,
            Err(WatermarkError::Composite(CompositeError::InvalidWatermark { .. }))
        )));
    }

    #[tokio::test]
    async fn test_decode_failure_does_not_abort_batch() {
        let dir = tempdir().unwrap();

        let good = dir.path().join("good.png");
        let png = encode_png("good.png", &crate::raster::CompositeResult::new(
            RasterImage::new_filled(50, 40, [10, 10, 10, 255]).into_image(),
        ))
        .unwrap();
        std::fs::write(&good, png).unwrap();

        let broken = dir.path().join("broken.jpg");
        std::fs::write(&broken, b"not an image").unwrap();

        let also_good = dir.path().join("also_good.png");
        std::fs::copy(&good, &also_good).unwrap();

        let engine = BatchEngine::new(&Config::default());
        let report = engine
            .run(&[good, broken, also_good], &watermark(), &PlacementConfig::default())
            .await;

        assert_eq!(report.len(), 3);
        assert_eq!(report.succeeded().count(), 2);

        let failed: Vec<_> = report.failed().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].index, 1);
        assert_eq!(failed[0].output_name, "broken_wm.png");
        assert!(matches!(
            failed[0].outcome,
            Err(WatermarkError::Load(LoadError::DecodeFailure { .. }))
        ));
    }

    #[tokio::test]
    async fn test_unnamed_load_failure_uses_fallback_name() {
        let dir = tempdir().unwrap();
        let unnamed = dir.path().join("..");
        assert!(unnamed.file_name().is_none());

        let engine = BatchEngine::new(&Config::default());
        let report = engine
            .run(&[unnamed], &watermark(), &PlacementConfig::default())
            .await;

        let failed: Vec<_> = report.failed().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].source_name, None);
        assert_eq!(failed[0].output_name, "image_1_wm.png");
    }
}

use std::collections::HashSet;
use std::fs::create_dir_all;
use std::path::PathBuf;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use tracing::{debug, info, warn};

use crate::composition::BatchReport;
use crate::error::{ExportError, Result, WatermarkError};
use crate::raster::{readable_size, CompositeResult};

/// Encode a composite as PNG; `name` is only used in errors
pub fn encode_png(name: &str, result: &CompositeResult) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(result.as_rgba_bytes(), result.width(), result.height(), ColorType::Rgba8)
        .map_err(|e| ExportError::EncodeFailed {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
    Ok(buffer)
}

/// A composite that could not be written
#[derive(Debug)]
pub struct ExportFailure {
    /// Position of the image in the batch input
    pub index: usize,
    pub output_name: String,
    pub error: WatermarkError,
}

/// What [`ExportWriter::write_report`] managed to write
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<ExportFailure>,
}

impl ExportSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes composites as PNG files into one output directory
pub struct ExportWriter {
    dir: PathBuf,
}

impl ExportWriter {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Write one composite as `<dir>/<name>`, creating the directory if needed
    pub fn write(&self, name: &str, result: &CompositeResult) -> Result<PathBuf> {
        create_dir_all(&self.dir).map_err(|e| ExportError::WriteFailed {
            path: self.dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let bytes = encode_png(name, result)?;
        let path = self.dir.join(name);
        std::fs::write(&path, &bytes).map_err(|e| ExportError::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!("Wrote {} ({})", path.display(), readable_size(bytes.len() as u64));
        Ok(path)
    }

    /// Write every successful item of a batch. Items that failed to
    /// composite are skipped; an item that fails to write is recorded and
    /// the remaining items are still written.
    ///
    /// Items sharing an output name overwrite each other; the last one wins.
    pub fn write_report(&self, report: &BatchReport) -> ExportSummary {
        let mut seen = HashSet::new();
        let mut summary = ExportSummary::default();

        for (item, result) in report.succeeded() {
            if !seen.insert(item.output_name.as_str()) {
                warn!("{} is produced by more than one input, overwriting", item.output_name);
            }
            match self.write(&item.output_name, result) {
                Ok(path) => summary.written.push(path),
                Err(error) => {
                    warn!("Could not export {}: {}", item.output_name, error);
                    summary.failed.push(ExportFailure {
                        index: item.index,
                        output_name: item.output_name.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            "📁 Exported {} images to {:?} ({} failed)",
            summary.written.len(),
            self.dir,
            summary.failed.len()
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::BatchEngine;
    use crate::config::Config;
    use crate::placement::PlacementConfig;
    use crate::raster::{ImageLoader, RasterImage, SourceImage};
    use tempfile::tempdir;

    #[test]
    fn test_png_round_trips_pixels() {
        let raster = RasterImage::new_filled(3, 2, [1, 2, 3, 128]);
        let result = CompositeResult::new(raster.clone().into_image());

        let png = encode_png("t.png", &result).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        assert_eq!(ImageLoader::decode(&png, "t.png").unwrap(), raster);
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempdir().unwrap();
        let writer = ExportWriter::new(dir.path().join("watermarked"));
        let result = CompositeResult::new(RasterImage::new_filled(2, 2, [0, 0, 0, 255]).into_image());

        let path = writer.write("x_wm.png", &result).unwrap();
        assert!(path.ends_with("watermarked/x_wm.png"));
        assert!(path.exists());
    }

    #[test]
    fn test_write_report_skips_failures() {
        let dir = tempdir().unwrap();
        let sources = vec![
            SourceImage::new(Some("a.jpg".to_string()), RasterImage::new_filled(30, 30, [0, 0, 0, 255])),
            SourceImage::new(Some("b.jpg".to_string()), RasterImage::new_filled(30, 30, [0, 0, 0, 255])),
        ];
        let engine = BatchEngine::new(&Config::default());
        let mut report = engine.composite_all(
            &sources,
            &RasterImage::new_filled(5, 5, [255, 255, 255, 255]),
            &PlacementConfig::default(),
        );
        report.items[1].outcome = Err(crate::error::WatermarkError::generic("boom"));

        let writer = ExportWriter::new(dir.path());
        let summary = writer.write_report(&report);

        assert!(summary.is_complete());
        assert_eq!(summary.written.len(), 1);
        assert!(dir.path().join("a_wm.png").exists());
        assert!(!dir.path().join("b_wm.png").exists());
    }

    #[test]
    fn test_write_failure_does_not_stop_export() {
        let dir = tempdir().unwrap();
        // A directory squatting on the first output name makes that write fail
        std::fs::create_dir(dir.path().join("a_wm.png")).unwrap();

        let sources = vec![
            SourceImage::new(Some("a.jpg".to_string()), RasterImage::new_filled(20, 20, [0, 0, 0, 255])),
            SourceImage::new(Some("b.jpg".to_string()), RasterImage::new_filled(20, 20, [0, 0, 0, 255])),
        ];
        let report = BatchEngine::new(&Config::default()).composite_all(
            &sources,
            &RasterImage::new_filled(5, 5, [255, 255, 255, 255]),
            &PlacementConfig::default(),
        );

        let summary = ExportWriter::new(dir.path()).write_report(&report);

        assert!(!summary.is_complete());
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].index, 0);
        assert_eq!(summary.failed[0].output_name, "a_wm.png");
        assert!(matches!(
            summary.failed[0].error,
            WatermarkError::Export(ExportError::WriteFailed { .. })
        ));
        assert_eq!(summary.written, vec![dir.path().join("b_wm.png")]);
        assert!(dir.path().join("b_wm.png").is_file());
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    composition::ResampleFilter,
    error::{ConfigError, Result},
    placement::PlacementConfig,
};

/// Main configuration for bulk watermarking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Watermark size, opacity and position
    pub placement: PlacementConfig,

    /// Rendering settings
    pub render: RenderConfig,

    /// Batch processing settings
    pub batch: BatchConfig,

    /// Preview interaction settings
    pub preview: PreviewConfig,

    /// Output settings
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.placement.validate()?;
        self.batch.validate()?;
        Ok(())
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Filter used to scale the watermark
    pub filter: ResampleFilter,
}

/// Batch processing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Composite images on a worker pool instead of one by one
    pub parallel: bool,

    /// Number of worker threads when `parallel` is set
    pub processing_threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            processing_threads: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    fn validate(&self) -> Result<()> {
        if self.processing_threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "batch.processing_threads".to_string(),
                value: self.processing_threads.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// Preview interaction configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Let pointer drags on a preview move the watermark
    pub allow_drag: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the composites are written to
    pub output_dir: PathBuf,

    /// Watermark image; the bundled one is used when unset
    pub watermark: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("watermarked"),
            watermark: None,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::placement::Anchor;

/// Smallest watermark width the compositor will ever draw, in pixels
pub const MIN_WATERMARK_WIDTH: u32 = 8;

/// Every user-tunable parameter controlling watermark size, transparency and
/// position.
///
/// This is a plain `Copy` value: callers change it between compositor calls,
/// the compositor only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Watermark width as a percentage of the base image width, in (0, 100]
    pub size_percent: f32,

    /// Uniform opacity multiplier applied to every watermark pixel (0.0-1.0)
    pub opacity: f32,

    /// Reference point for placement
    pub anchor: Anchor,

    /// Horizontal offset from the anchor position, in pixels
    pub offset_x: i32,

    /// Vertical offset from the anchor position, in pixels
    pub offset_y: i32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            size_percent: 20.0,
            opacity: 0.9,
            anchor: Anchor::TopRight,
            offset_x: -20,
            offset_y: 20,
        }
    }
}

impl PlacementConfig {
    /// Return a copy with the pointer movement added to the offsets
    pub fn apply_drag_delta(self, dx: i32, dy: i32) -> Self {
        Self {
            offset_x: self.offset_x.saturating_add(dx),
            offset_y: self.offset_y.saturating_add(dy),
            ..self
        }
    }

    pub fn with_anchor(self, anchor: Anchor) -> Self {
        Self { anchor, ..self }
    }

    pub fn with_offset(self, offset_x: i32, offset_y: i32) -> Self {
        Self { offset_x, offset_y, ..self }
    }

    /// Target watermark width for a base image `base_width` pixels wide
    pub fn target_width(&self, base_width: u32) -> u32 {
        let scaled = (f64::from(base_width) * f64::from(self.size_percent) / 100.0).round();
        // NaN and negatives saturate to 0 here and are lifted by the floor
        (scaled as u32).max(MIN_WATERMARK_WIDTH)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.size_percent > 0.0 && self.size_percent <= 100.0) {
            return Err(ConfigError::InvalidValue {
                key: "placement.size_percent".to_string(),
                value: self.size_percent.to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::InvalidValue {
                key: "placement.opacity".to_string(),
                value: self.opacity.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CompositeError;

/// Reference point on the base image that the watermark is placed against
/// before the pixel offset is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl Anchor {
    /// All anchors in a stable order
    pub const ALL: [Anchor; 5] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::Center,
    ];

    /// Textual name used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
            Anchor::Center => "center",
        }
    }

    /// Top-left corner of a `mark_w` x `mark_h` rectangle placed at this
    /// anchor on a `canvas_w` x `canvas_h` canvas.
    ///
    /// Results may be negative when the mark is larger than the canvas.
    /// `center` floors half-pixel positions.
    pub fn origin(&self, canvas_w: u32, canvas_h: u32, mark_w: u32, mark_h: u32) -> (i64, i64) {
        let free_w = i64::from(canvas_w) - i64::from(mark_w);
        let free_h = i64::from(canvas_h) - i64::from(mark_h);

        match self {
            Anchor::TopLeft => (0, 0),
            Anchor::TopRight => (free_w, 0),
            Anchor::BottomLeft => (0, free_h),
            Anchor::BottomRight => (free_w, free_h),
            Anchor::Center => (free_w.div_euclid(2), free_h.div_euclid(2)),
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::TopRight
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = CompositeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.as_str() == s.trim())
            .ok_or_else(|| CompositeError::InvalidAnchor { value: s.to_string() })
    }
}

impl TryFrom<String> for Anchor {
    type Error = CompositeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Anchor> for String {
    fn from(anchor: Anchor) -> Self {
        anchor.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_names() {
        for anchor in Anchor::ALL {
            assert_eq!(anchor.as_str().parse::<Anchor>().unwrap(), anchor);
        }
    }

    #[test]
    fn test_unknown_anchor_is_rejected() {
        let err = "middle-left".parse::<Anchor>().unwrap_err();
        assert_eq!(err, CompositeError::InvalidAnchor { value: "middle-left".to_string() });
    }

    #[test]
    fn test_origins() {
        assert_eq!(Anchor::TopLeft.origin(1000, 800, 100, 50), (0, 0));
        assert_eq!(Anchor::TopRight.origin(1000, 800, 100, 50), (900, 0));
        assert_eq!(Anchor::BottomLeft.origin(1000, 800, 100, 50), (0, 750));
        assert_eq!(Anchor::BottomRight.origin(1000, 800, 100, 50), (900, 750));
        assert_eq!(Anchor::Center.origin(1000, 800, 100, 50), (450, 375));
    }

    #[test]
    fn test_origin_of_oversized_mark_is_negative() {
        assert_eq!(Anchor::BottomRight.origin(10, 10, 16, 12), (-6, -2));
        assert_eq!(Anchor::Center.origin(10, 10, 13, 10), (-2, 0));
    }
}

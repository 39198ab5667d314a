//! # Watermark Placement
//!
//! Everything that decides *where* and *how strongly* the watermark lands on
//! a photo: the anchor corner, the pixel offset, the size relative to the
//! photo width, the opacity, and interactive drag adjustment of the offset.
//!
//! ## Usage
//!
//! ```rust
//! use bulk_watermark::placement::{Anchor, PlacementConfig};
//!
//! let config = PlacementConfig::default()
//!     .with_anchor(Anchor::BottomRight)
//!     .with_offset(-10, -10)
//!     .apply_drag_delta(4, 2);
//!
//! assert_eq!((config.offset_x, config.offset_y), (-6, -8));
//! ```

pub mod anchor;
pub mod drag;
pub mod params;

pub use anchor::Anchor;
pub use drag::DragSession;
pub use params::{PlacementConfig, MIN_WATERMARK_WIDTH};

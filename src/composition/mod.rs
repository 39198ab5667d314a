//! # Compositing
//!
//! The compositor renders one watermark onto one photo. The batch engine runs
//! it over many photos, and the preview session keeps the current inputs and
//! re-renders as they change.

pub mod blend;
pub mod compositor;
pub mod engine;
pub mod session;

// Re-exports for convenience
pub use compositor::{composite, Compositor, ResampleFilter, WatermarkPlacement};
pub use engine::{BatchEngine, BatchItem, BatchReport};
pub use session::PreviewSession;

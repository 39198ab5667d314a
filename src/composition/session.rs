use tracing::{debug, info};

use crate::{
    composition::engine::{BatchEngine, BatchItem, BatchReport},
    config::Config,
    error::Result,
    placement::{DragSession, PlacementConfig},
    raster::{ImageLoader, RasterImage, SourceImage},
};

/// Interactive preview state: the loaded photos, the current watermark and
/// placement, and the most recent render of every photo.
///
/// Every change to the inputs re-renders all previews with the current
/// placement. While a drag is in progress each pointer move nudges the
/// offsets and re-renders.
pub struct PreviewSession {
    engine: BatchEngine,
    watermark: RasterImage,
    images: Vec<SourceImage>,
    placement: PlacementConfig,
    drag: DragSession,
    previews: BatchReport,
}

impl PreviewSession {
    pub fn new(config: &Config, watermark: RasterImage) -> Self {
        Self {
            engine: BatchEngine::new(config),
            watermark,
            images: Vec::new(),
            placement: config.placement,
            drag: DragSession::new(config.preview.allow_drag),
            previews: BatchReport::default(),
        }
    }

    pub fn placement(&self) -> PlacementConfig {
        self.placement
    }

    pub fn images(&self) -> &[SourceImage] {
        &self.images
    }

    pub fn previews(&self) -> &[BatchItem] {
        &self.previews.items
    }

    pub fn report(&self) -> &BatchReport {
        &self.previews
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Replace the loaded photos and render them
    pub fn set_images(&mut self, images: Vec<SourceImage>) {
        info!("Loaded {} images", images.len());
        self.images = images;
        self.render_all();
    }

    pub fn set_watermark(&mut self, watermark: RasterImage) {
        self.watermark = watermark;
        self.render_all();
    }

    pub fn set_placement(&mut self, placement: PlacementConfig) {
        self.placement = placement;
        self.render_all();
    }

    pub fn set_allow_drag(&mut self, allow: bool) {
        self.drag.set_enabled(allow);
        self.render_all();
    }

    /// Re-render every photo with the current watermark and placement.
    /// Does nothing when no photos are loaded.
    pub fn render_all(&mut self) {
        if self.images.is_empty() {
            return;
        }
        self.previews = self.engine.composite_all(&self.images, &self.watermark, &self.placement);
    }

    pub fn pointer_down(&mut self, x: i32, y: i32) {
        self.drag.pointer_down(x, y);
    }

    /// Apply the pointer movement to the offsets and re-render.
    ///
    /// Returns `true` when the previews were re-rendered.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> bool {
        let Some((dx, dy)) = self.drag.pointer_move(x, y) else {
            return false;
        };
        self.placement = self.placement.apply_drag_delta(dx, dy);
        debug!(
            "Drag by ({}, {}), offset now ({}, {})",
            dx, dy, self.placement.offset_x, self.placement.offset_y
        );
        self.render_all();
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    pub fn pointer_cancel(&mut self) {
        self.drag.pointer_cancel();
    }

    /// Back to defaults: no photos, bundled watermark, default placement,
    /// dragging off.
    ///
    /// If the bundled watermark cannot be decoded the session is left as it was.
    pub fn reset(&mut self) -> Result<()> {
        let watermark = ImageLoader::default_watermark()?;
        self.watermark = watermark;
        self.images.clear();
        self.previews = BatchReport::default();
        self.placement = PlacementConfig::default();
        self.drag = DragSession::new(false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Anchor;

    fn session(allow_drag: bool) -> PreviewSession {
        let mut config = Config::default();
        config.preview.allow_drag = allow_drag;
        config.placement = PlacementConfig {
            size_percent: 10.0,
            opacity: 1.0,
            anchor: Anchor::TopLeft,
            offset_x: 0,
            offset_y: 0,
        };
        PreviewSession::new(&config, RasterImage::new_filled(10, 10, [255, 0, 0, 255]))
    }

    fn photo() -> SourceImage {
        SourceImage::new(Some("a.png".to_string()), RasterImage::new_filled(100, 100, [0, 0, 0, 255]))
    }

    #[test]
    fn test_no_images_no_previews() {
        let mut session = session(false);
        session.render_all();
        assert!(session.previews().is_empty());
    }

    #[test]
    fn test_set_images_renders() {
        let mut session = session(false);
        session.set_images(vec![photo(), photo()]);
        assert_eq!(session.previews().len(), 2);
        assert!(session.report().is_complete());
    }

    #[test]
    fn test_drag_moves_watermark_and_rerenders() {
        let mut session = session(true);
        session.set_images(vec![photo()]);

        session.pointer_down(50, 50);
        assert!(session.pointer_move(53, 55));
        assert!(session.pointer_move(55, 55));
        session.pointer_up();
        assert!(!session.pointer_move(90, 90));

        let placement = session.placement();
        assert_eq!((placement.offset_x, placement.offset_y), (5, 5));

        let preview = session.previews()[0].outcome.as_ref().unwrap();
        assert_eq!(preview.get_pixel(5, 5), [255, 0, 0, 255]);
        assert_eq!(preview.get_pixel(4, 4), [0, 0, 0, 255]);
    }

    #[test]
    fn test_drag_disabled_leaves_offsets() {
        let mut session = session(false);
        session.set_images(vec![photo()]);
        session.pointer_down(0, 0);
        assert!(!session.pointer_move(30, 30));
        assert_eq!(session.placement().offset_x, 0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = session(true);
        session.set_images(vec![photo()]);
        session.set_watermark(RasterImage::new_filled(3, 3, [1, 2, 3, 255]));
        session.reset().unwrap();

        assert_eq!(session.watermark, ImageLoader::default_watermark().unwrap());
        assert!(session.images().is_empty());
        assert!(session.previews().is_empty());
        assert_eq!(session.placement(), PlacementConfig::default());
        session.pointer_down(0, 0);
        assert!(!session.is_dragging());
    }
}

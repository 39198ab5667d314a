use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};

/// A decoded image: a fixed-size grid of RGBA8 pixels.
///
/// Immutable once loaded. The compositor only ever borrows it.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    buffer: RgbaImage,
}

impl RasterImage {
    /// Create a raster from an RGBA image buffer
    pub fn new(buffer: RgbaImage) -> Self {
        Self { buffer }
    }

    /// Create a raster with the given dimensions filled with one colour
    pub fn new_filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let buffer = ImageBuffer::from_pixel(width, height, Rgba(color));
        Self { buffer }
    }

    /// Convert any decoded image into RGBA8
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let buffer = match image {
            DynamicImage::ImageRgba8(img) => img,
            other => other.to_rgba8(),
        };
        Self { buffer }
    }

    /// Create a raster from raw RGBA bytes (row-major, 4 bytes per pixel)
    pub fn from_rgba_bytes(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        ImageBuffer::from_raw(width, height, data).map(|buffer| Self { buffer })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Get a pixel at the given coordinates (returns RGBA array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.buffer.get_pixel(x, y).0
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn into_image(self) -> RgbaImage {
        self.buffer
    }
}

/// A loaded photo together with what is known about the file it came from
#[derive(Clone, Debug)]
pub struct SourceImage {
    /// File name (no directory), if the image came from a file
    pub name: Option<String>,

    /// Size of the encoded file in bytes, if known
    pub byte_size: Option<u64>,

    /// Decoded pixels
    pub image: RasterImage,
}

impl SourceImage {
    pub fn new(name: Option<String>, image: RasterImage) -> Self {
        Self { name, byte_size: None, image }
    }

    pub fn with_byte_size(mut self, byte_size: u64) -> Self {
        self.byte_size = Some(byte_size);
        self
    }
}

/// The rendered composite: base image with the watermark blended on top.
///
/// Always the same size as the base image it was rendered from.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeResult {
    buffer: RgbaImage,
}

impl CompositeResult {
    pub(crate) fn new(buffer: RgbaImage) -> Self {
        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.buffer.get_pixel(x, y).0
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Raw RGBA bytes, row-major
    pub fn as_rgba_bytes(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Save the composite as a PNG file
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.buffer.save_with_format(path, image::ImageFormat::Png)
    }
}

/// Human readable byte count, e.g. `1.5 KB`
pub fn readable_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_raster() {
        let raster = RasterImage::new_filled(4, 3, [1, 2, 3, 4]);
        assert_eq!(raster.dimensions(), (4, 3));
        assert_eq!(raster.get_pixel(3, 2), [1, 2, 3, 4]);
    }

    #[test]
    fn test_from_rgba_bytes_checks_length() {
        assert!(RasterImage::from_rgba_bytes(2, 2, vec![0; 16]).is_some());
        assert!(RasterImage::from_rgba_bytes(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_rgb_input_becomes_opaque_rgba() {
        let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        let raster = RasterImage::from_dynamic(DynamicImage::ImageRgb8(rgb));
        assert_eq!(raster.get_pixel(0, 0), [10, 20, 30, 255]);
    }

    #[test]
    fn test_readable_size() {
        assert_eq!(readable_size(0), "0.0 B");
        assert_eq!(readable_size(1536), "1.5 KB");
        assert_eq!(readable_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(readable_size(3 * 1024 * 1024 * 1024 * 1024), "3072.0 GB");
    }
}

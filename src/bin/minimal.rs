// Minimal smoke run of the compositor on synthetic images

use bulk_watermark::{
    composition::Compositor,
    placement::{Anchor, PlacementConfig},
    raster::{ImageLoader, RasterImage},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🖼️  Testing Bulk-Watermark Core Functionality");

    println!("\n1. Creating a test photo...");
    let photo = RasterImage::new_filled(640, 480, [100, 150, 200, 255]);
    println!("   Photo: {}x{}", photo.width(), photo.height());

    println!("\n2. Loading bundled watermark...");
    let watermark = ImageLoader::default_watermark()?;
    println!("   Watermark: {}x{}", watermark.width(), watermark.height());

    println!("\n3. Compositing at every anchor...");
    let compositor = Compositor::default();
    for anchor in Anchor::ALL {
        let config = PlacementConfig::default().with_anchor(anchor).with_offset(0, 0);
        let placement = compositor.placement(&photo, &watermark, &config)?;
        let result = compositor.composite(&photo, &watermark, &config)?;
        assert_eq!((result.width(), result.height()), (640, 480));
        println!(
            "   {:<12} -> {}x{} at ({}, {})",
            anchor.as_str(),
            placement.width,
            placement.height,
            placement.x,
            placement.y
        );
    }

    println!("\n4. Saving a preview...");
    let config = PlacementConfig::default();
    let result = compositor.composite(&photo, &watermark, &config)?;
    match result.save_png("minimal_test_output.png") {
        Ok(()) => println!("   📁 Output saved to: minimal_test_output.png"),
        Err(e) => println!("   ⚠️  Could not save file: {}", e),
    }

    println!("\n🎉 All checks passed! Bulk-Watermark core is working.");
    Ok(())
}

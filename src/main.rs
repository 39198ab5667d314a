use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, Level};

use bulk_watermark::{
    composition::{BatchEngine, ResampleFilter},
    config::Config,
    export::ExportWriter,
    placement::Anchor,
    raster::ImageLoader,
};

#[derive(Parser)]
#[command(
    name = "bulk-watermark",
    version,
    about = "Stamp a watermark onto a batch of photos",
    long_about = "Bulk-Watermark scales a watermark relative to each photo, places it at an anchor corner plus a pixel offset, blends it with the chosen opacity and writes every result as <name>_wm.png."
)]
struct Cli {
    /// Photos to watermark (PNG, JPEG)
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Watermark image (defaults to the bundled watermark)
    #[arg(short, long)]
    watermark: Option<PathBuf>,

    /// Watermark width as a percentage of photo width
    #[arg(long)]
    size: Option<f32>,

    /// Watermark opacity (0.0-1.0)
    #[arg(long)]
    opacity: Option<f32>,

    /// Anchor corner (top-left, top-right, bottom-left, bottom-right, center)
    #[arg(short, long)]
    anchor: Option<Anchor>,

    /// Horizontal offset from the anchor in pixels
    #[arg(long, allow_hyphen_values = true)]
    offset_x: Option<i32>,

    /// Vertical offset from the anchor in pixels
    #[arg(long, allow_hyphen_values = true)]
    offset_y: Option<i32>,

    /// Resampling filter for scaling the watermark
    #[arg(long, value_enum)]
    filter: Option<ResampleFilter>,

    /// Composite on all CPU cores
    #[arg(long)]
    parallel: bool,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command-line values win over the config file
    fn apply_to(&self, config: &mut Config) {
        let placement = &mut config.placement;
        if let Some(size) = self.size {
            placement.size_percent = size;
        }
        if let Some(opacity) = self.opacity {
            placement.opacity = opacity;
        }
        if let Some(anchor) = self.anchor {
            placement.anchor = anchor;
        }
        if let Some(offset_x) = self.offset_x {
            placement.offset_x = offset_x;
        }
        if let Some(offset_y) = self.offset_y {
            placement.offset_y = offset_y;
        }
        if let Some(filter) = self.filter {
            config.render.filter = filter;
        }
        if self.parallel {
            config.batch.parallel = true;
        }
        if let Some(output) = &self.output {
            config.export.output_dir = output.clone();
        }
        if let Some(watermark) = &self.watermark {
            config.export.watermark = Some(watermark.clone());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting Bulk-Watermark v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    cli.apply_to(&mut config);
    config.validate()?;

    let placement = config.placement;
    info!(
        "Placement: {}% wide, opacity {:.2}, {} {:+}/{:+}",
        placement.size_percent, placement.opacity, placement.anchor, placement.offset_x, placement.offset_y
    );

    let watermark = ImageLoader::load_watermark(config.export.watermark.as_deref()).await?;

    let engine = BatchEngine::new(&config);
    let report = engine.run(&cli.images, &watermark, &placement).await;

    let writer = ExportWriter::new(&config.export.output_dir);
    let exported = writer.write_report(&report);

    for item in report.failed() {
        if let Err(e) = &item.outcome {
            error!("{}: {}", item.label(), e.user_message());
        }
    }
    for failure in &exported.failed {
        error!("{}: {}", failure.output_name, failure.error.user_message());
    }

    let failed = report.failed().count() + exported.failed.len();
    if failed == 0 {
        info!("Done! Output saved to: {:?}", config.export.output_dir);
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} of {} images could not be watermarked",
            failed,
            report.len()
        ))
    }
}

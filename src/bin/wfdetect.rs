//! wfdetect - run the detection pipeline on a single image and print the
//! detections as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use wireframe_detect::{Detector, DetectorConfig, ImageSurface};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image file to run detection on.
    image: PathBuf,
    /// Model artifact directory (contains model.onnx and labels.json).
    #[arg(long)]
    model_dir: Option<PathBuf>,
    /// Minimum score for a detection to survive suppression.
    #[arg(long)]
    score_threshold: Option<f32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = DetectorConfig::load()?;
    if let Some(dir) = args.model_dir {
        config.model_dir = dir;
    }
    if let Some(threshold) = args.score_threshold {
        config.suppression.score_threshold = threshold;
    }

    let image = image::open(&args.image)
        .with_context(|| format!("failed to decode image {}", args.image.display()))?;
    let surface = ImageSurface::from_image(&image)?;
    log::info!(
        "decoded {} ({}x{})",
        args.image.display(),
        surface.width(),
        surface.height()
    );

    let detector = Detector::new(&config);
    detector.load(&config.model_dir).await?;
    let detections = detector.detect(&surface).await?;
    log::info!("{} detections", detections.len());

    println!("{}", serde_json::to_string_pretty(&detections)?);
    Ok(())
}

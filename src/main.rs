use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use mnist_canvas_rs::classifier::{ClassifierConfig, DigitRecognizer, HttpClassifier, PredictError};
use mnist_canvas_rs::image_pipeline::{DigitPipeline, PipelineConfig};
use mnist_canvas_rs::logger;

use tracing::{error, info};

/// Normalize a hand-drawn digit snapshot to MNIST format and classify it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Snapshot of the drawing surface (PNG, JPEG, BMP or TIFF)
    input: PathBuf,

    /// Base URL of the classification service
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Also write the normalized 28x28 digit as a grayscale TIFF
    #[arg(long)]
    dump_tiff: Option<PathBuf>,

    /// Print the pixel vector as JSON instead of calling the service
    #[arg(long)]
    offline: bool,

    /// Log per-stage timings
    #[arg(long)]
    timings: bool,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let pipeline = DigitPipeline::new(PipelineConfig::default());
    let snapshot = pipeline.read_file(&args.input)?;
    info!(width = snapshot.width(), height = snapshot.height(), "Snapshot loaded");

    let (outcome, timings) = pipeline.normalize_with_timings(&snapshot)?;
    if args.timings {
        timings.log_summary();
    }

    let Some(digit) = outcome.into_digit() else {
        info!("Canvas is empty, nothing to classify");
        return Ok(());
    };

    if let Some(path) = &args.dump_tiff {
        pipeline.write_digit_file(&digit, path)?;
    }

    if args.offline {
        println!("{}", serde_json::to_string(&digit.pixels)?);
        return Ok(());
    }

    let config = ClassifierConfig::builder()
        .base_url(args.url)
        .timeout(Duration::from_secs(args.timeout_secs))
        .build();
    let recognizer = DigitRecognizer::new(pipeline, HttpClassifier::new(&config)?);

    match recognizer.classify(&digit.pixels) {
        Ok(prediction) => println!("{prediction}"),
        Err(e) => {
            match &e {
                PredictError::Connectivity { reason } => error!(
                    endpoint = recognizer.classifier().endpoint(),
                    %reason,
                    "Classification service unreachable"
                ),
                other => error!("Classification failed: {}", other),
            }
            println!("{e}");
        }
    }

    Ok(())
}

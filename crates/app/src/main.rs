//! digitink - replay a recorded touch trace and classify the drawing
//!
//! Usage: `digitink <trace.json>`
//!
//! Environment:
//! - `DIGITINK_MODEL`: model weights path (default `assets/mnist.safetensors`)
//! - `DIGITINK_CANVAS_SIZE`: canvas dimensions as `WIDTHxHEIGHT`
//! - `DIGITINK_EXPORT`: if set, the finished drawing is also written there as PNG

mod session;
mod trace;

use std::path::Path;
use std::process::ExitCode;

use canvas::RasterSurface;
use digitink_classifier::{ClassifyError, LocalClassifier};
use digitink_config::AppConfig;
use image::RgbaImage;
use thiserror::Error;
use tracing::{error, info, warn};

use session::SketchSession;
use trace::{TouchTrace, TraceError};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error("Failed to export drawing: {0}")]
    Export(#[from] image::ImageError),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Some(trace_path) = std::env::args().nth(1) else {
        eprintln!("usage: digitink <trace.json>");
        return ExitCode::FAILURE;
    };

    let config = AppConfig::from_env();
    match run(&config, Path::new(&trace_path)).await {
        Ok(digit) => {
            println!("{digit}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &AppConfig, trace_path: &Path) -> Result<usize, AppError> {
    let trace = TouchTrace::load(trace_path)?;
    info!(
        "Replaying {} events from {}",
        trace.events.len(),
        trace_path.display()
    );

    let backend = LocalClassifier::load(&config.classifier.model_path)?;
    let mut session = SketchSession::new(&config.canvas, &config.style, backend);

    for event in &trace.events {
        session.handle(*event);
    }

    if let Ok(export_path) = std::env::var("DIGITINK_EXPORT") {
        export_png(session.surface().surface(), Path::new(&export_path))?;
        info!("Exported drawing to {export_path}");
    }

    let digit = session.classify().await?;

    if let Some(expected) = trace.expected {
        if digit == expected as usize {
            info!("Matched expected digit {expected}");
        } else {
            warn!("Predicted {digit}, trace expected {expected}");
        }
    }

    Ok(digit)
}

/// Write the surface as an 8-bit PNG
fn export_png(surface: &RasterSurface, path: &Path) -> Result<(), AppError> {
    let Some(image) = RgbaImage::from_raw(surface.width, surface.height, surface.to_rgba8()) else {
        // to_rgba8 always yields width*height*4 bytes, so this is unreachable
        return Ok(());
    };
    image.save(path)?;
    Ok(())
}

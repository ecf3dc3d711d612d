//! terracolor - synthetic terrain rendered with three colormap strategies
//!
//! This is the main entry point for the terracolor application.

use std::process::ExitCode;
use tracing::info;

use terracolor::logging::{init_tracing, log_error};
use terracolor::render::PngSurface;
use terracolor::{pipeline, Config, Result};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("terracolor: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    init_tracing(&config.log_level);
    info!("Starting terracolor v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        log_error(&e, "Invalid configuration");
        e
    })?;

    let surface = PngSurface::new(&config.output.dir).map_err(|e| {
        log_error(&e, "Failed to prepare output directory");
        e
    })?;

    pipeline::run(&config, surface).map_err(|e| {
        log_error(&e, "Rendering failed");
        e
    })?;

    info!(output_dir = %config.output.dir.display(), "Done");
    Ok(())
}

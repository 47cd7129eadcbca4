mod cli;
mod config;
mod error;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use greyship_core::FractalParams;
use greyship_render::{export_png, render_window, ExportMetadata, GreyBuffer, RenderCancel};

use crate::cli::Cli;
use crate::config::RenderOverrides;
use crate::error::CliError;

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.resolve()?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&RenderOverrides::from(&config))?);
        return Ok(());
    }

    // Fail on bad input before any allocation.
    let window = config.window()?;
    let params = FractalParams::new(config.max_iterations)?;

    info!(
        fractal = config.variant.name(),
        width = window.width,
        height = window.height,
        center = %window.center,
        real_extent = window.real_extent,
        max_iterations = params.max_iterations,
        "Rendering"
    );

    let cancel = Arc::new(RenderCancel::new());
    let result = render_window(&config.variant, &window, config.max_iterations, &cancel)?;

    let counts = &result.counts;
    info!(
        max_count = counts.max_count(),
        max_escape_count = ?counts.max_escape_count(),
        in_set = counts.in_set_count(),
        "Escape counts"
    );
    if let Some(max) = counts.max_escape_count() {
        if params.max_iterations > 0 && max as u32 * 10 >= params.max_iterations as u32 * 9 {
            warn!(
                max_escape_count = max,
                max_iterations = params.max_iterations,
                "Pixels are still escaping near the budget; consider more iterations"
            );
        }
    }

    let grey = GreyBuffer::from_counts(counts, config.flip_rows());
    let metadata = ExportMetadata::new(config.variant, window, params);
    export_png(&grey, &config.output, &metadata)?;

    info!(
        elapsed_ms = result.elapsed.as_millis(),
        "Wrote {}",
        config.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

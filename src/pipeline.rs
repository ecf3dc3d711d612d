//! The demonstration pipeline.
//!
//! Generates the elevation field once, then renders it three times: with the
//! reference preset, with the custom continuous colormap, and with the
//! discrete colormap whose legend ticks sit on the interval boundaries.

use std::time::Instant;
use tracing::info;

use crate::colormaps::ColorMapping;
use crate::config::Config;
use crate::error::Result;
use crate::field::ElevationField;
use crate::logging::{log_field_stats, log_operation_end, log_operation_start};
use crate::render::{FigureSpec, RenderSurface, Renderer};

/// Figure name of the reference rendering
pub const REFERENCE_FIGURE: &str = "reference";
/// Figure name of the continuous colormap rendering
pub const CONTINUOUS_FIGURE: &str = "continuous";
/// Figure name of the discrete colormap rendering
pub const DISCRETE_FIGURE: &str = "discrete";

/// Run the full pipeline against `surface`, returning the generated field
pub fn run<S: RenderSurface>(config: &Config, surface: S) -> Result<(ElevationField, S)> {
    let start = Instant::now();
    log_operation_start("pipeline", Some(&format!("grid={:?}", config.grid)));

    let result = render_all(config, surface);
    log_operation_end("pipeline", start, result.is_ok());
    result
}

fn render_all<S: RenderSurface>(config: &Config, surface: S) -> Result<(ElevationField, S)> {
    // Build every colormap before touching the surface so bad settings fail fast
    let reference = config.reference()?;
    let continuous = config.continuous_colormap()?;
    let discrete = config.discrete_colormap()?;

    let field = ElevationField::generate(&config.grid)?;
    let (rows, cols) = field.shape();
    let non_finite = field.z.iter().filter(|v| !v.is_finite()).count();
    log_field_stats(rows, cols, field.value_range(), non_finite);

    let elevation = field.elevation();
    let mut renderer = Renderer::new(surface, config.render_options());

    renderer.display(
        &FigureSpec::new(
            REFERENCE_FIGURE,
            "Synthetic Elevation Data (for Reference)",
            "Elevation (Synthetic Data)",
        ),
        elevation,
        &ColorMapping::continuous_for(reference, elevation),
        None,
    )?;

    renderer.display(
        &FigureSpec::new(
            CONTINUOUS_FIGURE,
            "Continuous Colormap for Terrain Elevation",
            "Elevation",
        ),
        elevation,
        &ColorMapping::continuous_for(continuous, elevation),
        None,
    )?;

    let ticks = discrete.boundaries().to_vec();
    renderer.display(
        &FigureSpec::new(
            DISCRETE_FIGURE,
            "Discrete Colormap for Specific Elevation Ranges",
            "Elevation Levels",
        ),
        elevation,
        &ColorMapping::Discrete(discrete),
        Some(&ticks),
    )?;

    info!(figures = 3, "All figures rendered");
    Ok((field, renderer.into_surface()))
}

//! Rendering surfaces: where finished figures are shown.

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::ArrayView2;
use tracing::{debug, info};

use super::figure::{render_figure, Figure, FigureSpec, RenderOptions};
use crate::colormaps::ColorMapping;
use crate::error::Result;
use crate::logging::log_timed_operation;

/// Something that can display a finished figure
pub trait RenderSurface {
    /// Show the figure; returns once the surface is done with it
    fn display(&mut self, figure: &Figure) -> Result<()>;
}

/// Writes each figure as `<name>.png` with a `<name>.legend.json` sidecar
#[derive(Debug, Clone)]
pub struct PngSurface {
    output_dir: PathBuf,
}

impl PngSurface {
    /// Create a surface writing into `output_dir`, creating it if needed
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Path of the PNG written for a figure name
    pub fn image_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.png", name))
    }

    /// Path of the legend sidecar written for a figure name
    pub fn legend_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.legend.json", name))
    }
}

impl RenderSurface for PngSurface {
    fn display(&mut self, figure: &Figure) -> Result<()> {
        let image_path = self.image_path(figure.name());
        figure.image.save(&image_path)?;

        let legend_path = self.legend_path(figure.name());
        fs::write(&legend_path, serde_json::to_string_pretty(&figure.legend)?)?;

        info!(
            figure = figure.name(),
            image = %image_path.display(),
            legend = %legend_path.display(),
            width = figure.image.width(),
            height = figure.image.height(),
            "Figure written"
        );
        Ok(())
    }
}

/// Keeps figures in memory
#[derive(Debug, Default)]
pub struct MemorySurface {
    pub figures: Vec<Figure>,
}

impl RenderSurface for MemorySurface {
    fn display(&mut self, figure: &Figure) -> Result<()> {
        self.figures.push(figure.clone());
        Ok(())
    }
}

/// Renders fields and hands the figures to a surface
#[derive(Debug)]
pub struct Renderer<S: RenderSurface> {
    surface: S,
    options: RenderOptions,
}

impl<S: RenderSurface> Renderer<S> {
    pub fn new(surface: S, options: RenderOptions) -> Self {
        Self { surface, options }
    }

    /// Render `data` through `mapping` and display the result.
    ///
    /// `ticks` overrides the legend ticks; discrete mappings default to their boundaries.
    pub fn display(
        &mut self,
        spec: &FigureSpec,
        data: ArrayView2<f64>,
        mapping: &ColorMapping,
        ticks: Option<&[f64]>,
    ) -> Result<()> {
        let operation = format!("render_{}", spec.name);
        log_timed_operation(&operation, || {
            debug!(
                figure = %spec.name,
                colormap = mapping.name(),
                kind = mapping.kind(),
                "Rendering figure"
            );
            let figure = render_figure(data, mapping, spec, ticks, &self.options)?;
            self.surface.display(&figure)
        })
    }

    /// Give back the surface, e.g. to inspect what was displayed
    pub fn into_surface(self) -> S {
        self.surface
    }
}

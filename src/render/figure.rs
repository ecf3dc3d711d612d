//! Raster figures: a colored data panel with a color bar and its legend.

use chrono::{DateTime, Utc};
use image::{ImageBuffer, Rgba as Pixel, RgbaImage};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::colormaps::{to_hex, ColorMapping, Rgba};
use crate::error::{Result, TerraError};

/// Horizontal space between the data panel and the color bar
const BAR_GAP: u32 = 8;

/// Length of a tick mark drawn to the right of the color bar
const TICK_LENGTH: u32 = 6;

/// Largest figure, in pixels, that will be allocated
pub const MAX_FIGURE_PIXELS: u64 = 1 << 26;

const BACKGROUND: Rgba = [255, 255, 255, 255];
const INK: Rgba = [0, 0, 0, 255];

/// Layout parameters for a figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Pixels per data cell along each axis
    pub scale: u32,
    /// Width of the color bar in pixels
    pub colorbar_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 4,
            colorbar_width: 24,
        }
    }
}

/// Identifies a figure and the text that accompanies it
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    /// File stem used by surfaces that persist figures
    pub name: String,
    /// Figure title
    pub title: String,
    /// Color bar label
    pub label: String,
}

impl FigureSpec {
    pub fn new(name: &str, title: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            label: label.to_string(),
        }
    }
}

/// One value-to-color correspondence shown by a legend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LegendEntry {
    /// Color at a single value of a continuous mapping
    Stop { value: f64, color: String },
    /// Color of a discrete bucket `[lower, upper)`
    Interval {
        lower: f64,
        upper: f64,
        color: String,
    },
}

/// Legend describing how a figure's colors relate to data values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub name: String,
    pub title: String,
    pub label: String,
    /// "continuous" or "discrete"
    pub kind: String,
    pub colormap: String,
    pub ticks: Vec<f64>,
    pub entries: Vec<LegendEntry>,
    pub generated_at: DateTime<Utc>,
}

impl Legend {
    /// Build the legend for `mapping`, using `ticks` or the mapping's defaults
    pub fn build(spec: &FigureSpec, mapping: &ColorMapping, ticks: Option<&[f64]>) -> Self {
        let ticks = ticks
            .map(<[f64]>::to_vec)
            .unwrap_or_else(|| mapping.default_ticks());

        let entries = match mapping {
            ColorMapping::Continuous { .. } => ticks
                .iter()
                .map(|&value| LegendEntry::Stop {
                    value,
                    color: to_hex(mapping.map(value)),
                })
                .collect(),
            ColorMapping::Discrete(colormap) => colormap
                .boundaries()
                .windows(2)
                .zip(colormap.colors())
                .map(|(pair, &color)| LegendEntry::Interval {
                    lower: pair[0],
                    upper: pair[1],
                    color: to_hex(color),
                })
                .collect(),
        };

        Self {
            name: spec.name.clone(),
            title: spec.title.clone(),
            label: spec.label.clone(),
            kind: mapping.kind().to_string(),
            colormap: mapping.name().to_string(),
            ticks,
            entries,
            generated_at: Utc::now(),
        }
    }
}

/// A rendered figure ready to be shown on a surface
#[derive(Debug, Clone)]
pub struct Figure {
    pub image: RgbaImage,
    pub legend: Legend,
}

impl Figure {
    /// File stem of the figure
    pub fn name(&self) -> &str {
        &self.legend.name
    }
}

/// Pixel geometry of a figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub panel_width: u32,
    pub panel_height: u32,
    pub bar_left: u32,
    pub bar_width: u32,
    pub width: u32,
    pub height: u32,
}

impl Layout {
    /// Compute the layout for a `rows x cols` field
    pub fn new(rows: usize, cols: usize, options: &RenderOptions) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(TerraError::ImageGeneration {
                message: format!("Cannot render an empty {}x{} field", rows, cols),
            });
        }
        if options.scale == 0 {
            return Err(TerraError::InvalidParameter {
                param: "scale".to_string(),
                message: "Scale must be at least 1 pixel per cell".to_string(),
            });
        }
        if options.colorbar_width == 0 {
            return Err(TerraError::InvalidParameter {
                param: "colorbar_width".to_string(),
                message: "Color bar width must be at least 1 pixel".to_string(),
            });
        }

        let to_pixels = |cells: usize| -> Result<u32> {
            u32::try_from(cells)
                .ok()
                .and_then(|c| c.checked_mul(options.scale))
                .ok_or_else(|| TerraError::ImageGeneration {
                    message: format!(
                        "Field of {}x{} cells at scale {} is too large to render",
                        rows, cols, options.scale
                    ),
                })
        };

        let panel_width = to_pixels(cols)?;
        let panel_height = to_pixels(rows)?;

        let too_wide = || TerraError::ImageGeneration {
            message: format!(
                "Figure for {} columns at scale {} with a {} pixel color bar is too wide",
                cols, options.scale, options.colorbar_width
            ),
        };
        let bar_left = panel_width.checked_add(BAR_GAP).ok_or_else(too_wide)?;
        let width = bar_left
            .checked_add(options.colorbar_width)
            .and_then(|w| w.checked_add(TICK_LENGTH))
            .ok_or_else(too_wide)?;

        let pixels = u64::from(width) * u64::from(panel_height);
        if pixels > MAX_FIGURE_PIXELS {
            return Err(TerraError::ImageGeneration {
                message: format!(
                    "Figure of {}x{} pixels exceeds the limit of {} pixels",
                    width, panel_height, MAX_FIGURE_PIXELS
                ),
            });
        }

        Ok(Self {
            panel_width,
            panel_height,
            bar_left,
            bar_width: options.colorbar_width,
            width,
            height: panel_height,
        })
    }

    /// Image row of a color bar position (0 bottom, 1 top)
    pub fn bar_row(&self, fraction: f64) -> u32 {
        ((1.0 - fraction) * (self.height - 1) as f64).round() as u32
    }
}

/// Render `data` with `mapping`, adding a color bar with tick marks.
///
/// Row 0 of the data is drawn at the top of the image.
pub fn render_figure(
    data: ArrayView2<f64>,
    mapping: &ColorMapping,
    spec: &FigureSpec,
    ticks: Option<&[f64]>,
    options: &RenderOptions,
) -> Result<Figure> {
    let (rows, cols) = data.dim();
    let layout = Layout::new(rows, cols, options)?;
    let scale = options.scale;

    let mut img: RgbaImage =
        ImageBuffer::from_pixel(layout.width, layout.height, Pixel(BACKGROUND));

    // Data panel
    for ((row, col), &value) in data.indexed_iter() {
        let color = Pixel(mapping.map(value));
        let x0 = col as u32 * scale;
        let y0 = row as u32 * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(x0 + dx, y0 + dy, color);
            }
        }
    }

    // Color bar, low values at the bottom
    for y in 0..layout.height {
        let fraction = 1.0 - (y as f64 + 0.5) / layout.height as f64;
        let color = Pixel(mapping.bar_color(fraction));
        for x in layout.bar_left..layout.bar_left + layout.bar_width {
            img.put_pixel(x, y, color);
        }
    }

    let legend = Legend::build(spec, mapping, ticks);

    let tick_start = layout.bar_left + layout.bar_width;
    for &tick in &legend.ticks {
        if let Some(fraction) = mapping.bar_fraction(tick) {
            let y = layout.bar_row(fraction);
            for x in tick_start..tick_start + TICK_LENGTH {
                img.put_pixel(x, y, Pixel(INK));
            }
        }
    }

    Ok(Figure { image: img, legend })
}

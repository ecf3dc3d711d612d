//! Color mapping interface and shared color utilities.
//!
//! `ColorMapping` is what the renderer consumes: either a continuous colormap
//! paired with the normalization of the data it colors, or a discrete
//! colormap that buckets raw values directly.

use colorgrad::Color;
use ndarray::ArrayView2;

use super::continuous::{ContinuousColormap, DEFAULT_LEVELS};
use super::discrete::DiscreteColormap;
use crate::error::{Result, TerraError};
use crate::field::finite_range;

/// An RGBA color with 8 bits per channel
pub type Rgba = [u8; 4];

/// Color used for NaN and infinite values
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Parse a hex (`#rrggbb`) or CSS color name
pub fn parse_color(value: &str) -> Result<Color> {
    Color::from_html(value).map_err(|e| TerraError::InvalidColor {
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// Format a color as `#rrggbb`, or `#rrggbbaa` when it is not opaque
pub fn to_hex(color: Rgba) -> String {
    if color[3] == 255 {
        format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
    } else {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            color[0], color[1], color[2], color[3]
        )
    }
}

/// Get a preset continuous colormap by name
pub fn get_colormap(name: &str) -> Result<ContinuousColormap> {
    let gradient = match name.to_lowercase().as_str() {
        "viridis" => colorgrad::viridis(),
        "plasma" => colorgrad::plasma(),
        "inferno" => colorgrad::inferno(),
        "magma" => colorgrad::magma(),
        "cividis" => colorgrad::cividis(),
        "turbo" => colorgrad::turbo(),
        _ => {
            return Err(TerraError::InvalidParameter {
                param: "colormap".to_string(),
                message: format!("Unknown colormap: {}", name),
            })
        }
    };
    ContinuousColormap::from_gradient(&name.to_lowercase(), gradient, DEFAULT_LEVELS)
}

/// Linear mapping of `[vmin, vmax]` onto `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalize {
    pub vmin: f64,
    pub vmax: f64,
}

impl Normalize {
    /// Create a normalization over `[vmin, vmax]`
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self { vmin, vmax }
    }

    /// Normalization spanning the finite values of `data`.
    ///
    /// Falls back to `[0, 1]` when the data holds no finite value.
    pub fn autoscale(data: ArrayView2<f64>) -> Self {
        let (vmin, vmax) = finite_range(data).unwrap_or((0.0, 1.0));
        Self { vmin, vmax }
    }

    /// Normalized position of `value`; not clipped. A zero-width range maps everything to 0.
    pub fn apply(&self, value: f64) -> f64 {
        if self.vmax > self.vmin {
            (value - self.vmin) / (self.vmax - self.vmin)
        } else {
            0.0
        }
    }
}

/// A colormap ready to color raw data values
#[derive(Debug)]
pub enum ColorMapping {
    /// Gradient colormap applied after normalization
    Continuous {
        colormap: ContinuousColormap,
        norm: Normalize,
    },
    /// Boundary-bucketed colormap applied to raw values
    Discrete(DiscreteColormap),
}

impl ColorMapping {
    /// Continuous mapping normalized to the finite range of `data`
    pub fn continuous_for(colormap: ContinuousColormap, data: ArrayView2<f64>) -> Self {
        ColorMapping::Continuous {
            colormap,
            norm: Normalize::autoscale(data),
        }
    }

    /// Map a raw data value to a color
    pub fn map(&self, value: f64) -> Rgba {
        if !value.is_finite() {
            return TRANSPARENT;
        }
        match self {
            ColorMapping::Continuous { colormap, norm } => {
                colormap.map_normalized(norm.apply(value))
            }
            ColorMapping::Discrete(colormap) => colormap.map(value),
        }
    }

    /// Name of the underlying colormap
    pub fn name(&self) -> &str {
        match self {
            ColorMapping::Continuous { colormap, .. } => colormap.name(),
            ColorMapping::Discrete(colormap) => colormap.name(),
        }
    }

    /// Short label for the mapping kind
    pub fn kind(&self) -> &'static str {
        match self {
            ColorMapping::Continuous { .. } => "continuous",
            ColorMapping::Discrete(_) => "discrete",
        }
    }

    /// Data values spanned by a color bar for this mapping
    pub fn value_span(&self) -> (f64, f64) {
        match self {
            ColorMapping::Continuous { norm, .. } => (norm.vmin, norm.vmax),
            ColorMapping::Discrete(colormap) => {
                let bounds = colormap.boundaries();
                (bounds[0], bounds[bounds.len() - 1])
            }
        }
    }

    /// Ticks used when the caller does not supply any.
    ///
    /// Continuous mappings get five evenly spaced values across the range,
    /// discrete mappings get their boundaries.
    pub fn default_ticks(&self) -> Vec<f64> {
        match self {
            ColorMapping::Continuous { norm, .. } => (0..5)
                .map(|i| norm.vmin + (norm.vmax - norm.vmin) * i as f64 / 4.0)
                .collect(),
            ColorMapping::Discrete(colormap) => colormap.boundaries().to_vec(),
        }
    }

    /// Position of `value` along a color bar, 0 at the bottom and 1 at the top.
    ///
    /// Discrete bars give every bucket an equal share regardless of its width.
    /// Returns `None` for values the bar does not show.
    pub fn bar_fraction(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let fraction = match self {
            ColorMapping::Continuous { norm, .. } => norm.apply(value),
            ColorMapping::Discrete(colormap) => {
                let bounds = colormap.boundaries();
                let buckets = colormap.colors().len();
                if value < bounds[0] || value > bounds[buckets] {
                    return None;
                }
                let i = colormap.bucket(value)?;
                let (lo, hi) = (bounds[i], bounds[i + 1]);
                (i as f64 + ((value - lo) / (hi - lo)).min(1.0)) / buckets as f64
            }
        };
        (0.0..=1.0).contains(&fraction).then_some(fraction)
    }

    /// Color shown at `fraction` along a color bar
    pub fn bar_color(&self, fraction: f64) -> Rgba {
        let fraction = fraction.clamp(0.0, 1.0);
        match self {
            ColorMapping::Continuous { colormap, .. } => colormap.map_normalized(fraction),
            ColorMapping::Discrete(colormap) => {
                let buckets = colormap.colors().len();
                let i = ((fraction * buckets as f64).floor() as usize).min(buckets - 1);
                colormap.colors()[i]
            }
        }
    }
}

//! Continuous colormaps built from evenly spaced anchor colors.
//!
//! The gradient itself is piecewise linear in RGB. Lookups go through a
//! quantized table with a fixed number of levels, so neighbouring values that
//! fall into the same level share a color.

use std::fmt;

use colorgrad::{BlendMode, CustomGradient, Gradient};

use super::colormap::{parse_color, Rgba, TRANSPARENT};
use crate::error::{Result, TerraError};

/// Default number of quantization levels
pub const DEFAULT_LEVELS: usize = 256;

/// A gradient colormap sampled into a lookup table
pub struct ContinuousColormap {
    name: String,
    gradient: Gradient,
    lut: Vec<Rgba>,
}

impl ContinuousColormap {
    /// Build a colormap from anchor colors placed at `i / (n - 1)`.
    pub fn from_anchors<S: AsRef<str>>(name: &str, anchors: &[S], levels: usize) -> Result<Self> {
        if anchors.len() < 2 {
            return Err(TerraError::Config {
                message: format!(
                    "Continuous colormap '{}' needs at least 2 anchor colors, got {}",
                    name,
                    anchors.len()
                ),
            });
        }

        let colors = anchors
            .iter()
            .map(|anchor| parse_color(anchor.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let gradient = CustomGradient::new()
            .colors(&colors)
            .mode(BlendMode::Rgb)
            .build()
            .map_err(|e| TerraError::Gradient {
                message: format!("Failed to build gradient '{}': {}", name, e),
            })?;

        Self::from_gradient(name, gradient, levels)
    }

    /// Wrap an existing gradient, sampling it into `levels` entries
    pub fn from_gradient(name: &str, gradient: Gradient, levels: usize) -> Result<Self> {
        if levels < 2 {
            return Err(TerraError::Config {
                message: format!(
                    "Continuous colormap '{}' needs at least 2 levels, got {}",
                    name, levels
                ),
            });
        }

        let (dmin, dmax) = gradient.domain();
        let lut = (0..levels)
            .map(|k| {
                let t = k as f64 / (levels - 1) as f64;
                gradient.at(dmin + t * (dmax - dmin)).to_rgba8()
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            gradient,
            lut,
        })
    }

    /// Exact gradient color at `t`, clamped to `[0, 1]`.
    ///
    /// Non-finite values map to the transparent sentinel.
    pub fn interpolate(&self, t: f64) -> Rgba {
        if !t.is_finite() {
            return TRANSPARENT;
        }
        let (dmin, dmax) = self.gradient.domain();
        let t = t.clamp(0.0, 1.0);
        self.gradient.at(dmin + t * (dmax - dmin)).to_rgba8()
    }

    /// Quantized color for a normalized value.
    ///
    /// Values outside `[0, 1]` take the end colors; non-finite values map to
    /// the transparent sentinel.
    pub fn map_normalized(&self, t: f64) -> Rgba {
        if !t.is_finite() {
            return TRANSPARENT;
        }
        let levels = self.lut.len();
        let index = (t * levels as f64).floor().clamp(0.0, (levels - 1) as f64) as usize;
        self.lut[index]
    }

    /// Number of quantization levels
    pub fn levels(&self) -> usize {
        self.lut.len()
    }

    /// Get the name of this colormap
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ContinuousColormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuousColormap")
            .field("name", &self.name)
            .field("levels", &self.lut.len())
            .finish()
    }
}

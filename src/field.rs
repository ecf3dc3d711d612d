//! Synthetic elevation field generation.
//!
//! Builds a square coordinate grid and evaluates a radial sine surface over it,
//! which stands in for terrain height in the rendered figures.

use ndarray::{Array1, Array2, ArrayView2, Zip};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TerraError};

/// Sampling of the square `[min, max] x [min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Lower bound on both axes
    #[serde(default = "default_min")]
    pub min: f64,
    /// Upper bound on both axes
    #[serde(default = "default_max")]
    pub max: f64,
    /// Number of samples per axis
    #[serde(default = "default_samples")]
    pub samples: usize,
}

impl GridSpec {
    /// Create a new grid specification
    pub fn new(min: f64, max: f64, samples: usize) -> Self {
        Self { min, max, samples }
    }

    /// Check that the bounds are finite and ordered and that both axes have at least two samples
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(TerraError::Config {
                message: format!(
                    "Grid bounds must be finite, got [{}, {}]",
                    self.min, self.max
                ),
            });
        }

        if self.min >= self.max {
            return Err(TerraError::Config {
                message: format!(
                    "Grid minimum ({}) must be less than maximum ({})",
                    self.min, self.max
                ),
            });
        }

        if self.samples < 2 {
            return Err(TerraError::Config {
                message: format!(
                    "Grid needs at least 2 samples per axis, got {}",
                    self.samples
                ),
            });
        }

        Ok(())
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            samples: default_samples(),
        }
    }
}

fn default_min() -> f64 {
    -5.0
}

fn default_max() -> f64 {
    5.0
}

fn default_samples() -> usize {
    100
}

/// `num` evenly spaced samples over `[start, stop]`, both endpoints included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Array1<f64> {
    match num {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut samples = Array1::from_shape_fn(num, |i| i as f64 * step + start);
            // Accumulated rounding must not move the closing endpoint
            samples[num - 1] = stop;
            samples
        }
    }
}

/// Coordinate matrices from coordinate vectors.
///
/// Both outputs have shape `(y.len(), x.len())`; X varies along columns and Y along rows.
pub fn meshgrid(x: &Array1<f64>, y: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let shape = (y.len(), x.len());
    let xx = Array2::from_shape_fn(shape, |(_, col)| x[col]);
    let yy = Array2::from_shape_fn(shape, |(row, _)| y[row]);
    (xx, yy)
}

/// The generated grid together with the elevation evaluated on it
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationField {
    /// X coordinates
    pub x: Array2<f64>,
    /// Y coordinates
    pub y: Array2<f64>,
    /// Elevation, `sin(sqrt(x^2 + y^2))`
    pub z: Array2<f64>,
}

impl ElevationField {
    /// Evaluate the radial sine surface on the grid described by `spec`
    pub fn generate(spec: &GridSpec) -> Result<Self> {
        spec.validate()?;

        let axis = linspace(spec.min, spec.max, spec.samples);
        let (x, y) = meshgrid(&axis, &axis);

        let z = Zip::from(&x)
            .and(&y)
            .map_collect(|&x, &y| radial_elevation(x, y));

        debug!(
            rows = z.nrows(),
            cols = z.ncols(),
            min = spec.min,
            max = spec.max,
            "Generated elevation field"
        );

        Ok(Self { x, y, z })
    }

    /// Shape of the field as (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.z.dim()
    }

    /// Read-only view of the elevation values
    pub fn elevation(&self) -> ArrayView2<'_, f64> {
        self.z.view()
    }

    /// Minimum and maximum over the finite elevation values
    pub fn value_range(&self) -> Option<(f64, f64)> {
        finite_range(self.z.view())
    }
}

/// The closed-form terrain surface
pub fn radial_elevation(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt().sin()
}

/// Minimum and maximum of the finite values in `data`, `None` if there are none
pub fn finite_range(data: ArrayView2<f64>) -> Option<(f64, f64)> {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

//! Discrete colormaps: fixed colors assigned to boundary-delimited intervals.

use super::colormap::{parse_color, Rgba, TRANSPARENT};
use crate::error::{Result, TerraError};

/// `M` colors over `M + 1` ascending boundaries.
///
/// Bucket `i` covers `[boundaries[i], boundaries[i + 1])`. Values outside the
/// boundaries clip to the first or last bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteColormap {
    name: String,
    colors: Vec<Rgba>,
    boundaries: Vec<f64>,
}

impl DiscreteColormap {
    /// Create a discrete colormap, validating the color/boundary pairing
    pub fn new<S: AsRef<str>>(name: &str, colors: &[S], boundaries: &[f64]) -> Result<Self> {
        if colors.is_empty() {
            return Err(TerraError::Config {
                message: format!("Discrete colormap '{}' needs at least one color", name),
            });
        }

        if boundaries.len() != colors.len() + 1 {
            return Err(TerraError::Config {
                message: format!(
                    "Discrete colormap '{}' has {} colors and needs {} boundaries, got {}",
                    name,
                    colors.len(),
                    colors.len() + 1,
                    boundaries.len()
                ),
            });
        }

        if let Some(bad) = boundaries.iter().find(|b| !b.is_finite()) {
            return Err(TerraError::Config {
                message: format!(
                    "Discrete colormap '{}' has a non-finite boundary: {}",
                    name, bad
                ),
            });
        }

        if let Some(pair) = boundaries.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(TerraError::Config {
                message: format!(
                    "Discrete colormap '{}' boundaries must be strictly ascending, found {} before {}",
                    name, pair[0], pair[1]
                ),
            });
        }

        let colors = colors
            .iter()
            .map(|c| parse_color(c.as_ref()).map(|color| color.to_rgba8()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            colors,
            boundaries: boundaries.to_vec(),
        })
    }

    /// Index of the bucket holding `value`, or `None` for NaN and infinities
    pub fn bucket(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        // Number of boundaries at or below the value
        let below = self.boundaries.partition_point(|&b| b <= value);
        Some(below.saturating_sub(1).min(self.colors.len() - 1))
    }

    /// Color for a raw value; non-finite values map to the transparent sentinel
    pub fn map(&self, value: f64) -> Rgba {
        match self.bucket(value) {
            Some(index) => self.colors[index],
            None => TRANSPARENT,
        }
    }

    /// Bucket colors in ascending order
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Bucket boundaries in ascending order
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Get the name of this colormap
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Rgba = [0, 0, 255, 255];
    const GREEN: Rgba = [0, 255, 0, 255];
    const YELLOW: Rgba = [255, 255, 0, 255];
    const ORANGE: Rgba = [255, 140, 0, 255];
    const BROWN: Rgba = [139, 69, 19, 255];

    fn elevation_levels() -> DiscreteColormap {
        DiscreteColormap::new(
            "elevation_levels",
            &["#0000ff", "#00ff00", "#ffff00", "#ff8c00", "#8B4513"],
            &[-1.0, -0.5, 0.0, 0.5, 1.0, 1.5],
        )
        .unwrap()
    }

    #[test]
    fn test_half_open_buckets() {
        let cmap = elevation_levels();
        assert_eq!(cmap.map(0.0), cmap.map(0.49));
        assert_eq!(cmap.map(0.0), YELLOW);
        assert_eq!(cmap.map(0.5), ORANGE);
        assert_eq!(cmap.bucket(-1.0), Some(0));
        assert_eq!(cmap.bucket(-0.5), Some(1));
        assert_eq!(cmap.bucket(1.0), Some(4));
    }

    #[test]
    fn test_clipping() {
        let cmap = elevation_levels();
        assert_eq!(cmap.map(-10.0), cmap.map(-1.0));
        assert_eq!(cmap.map(10.0), cmap.map(1.2));
        assert_eq!(cmap.map(1.5), BROWN);
        assert_eq!(cmap.map(-1e300), BLUE);
        assert_eq!(cmap.map(f64::MAX), BROWN);
    }

    #[test]
    fn test_terrain_scenario() {
        let cmap = elevation_levels();
        assert_eq!(cmap.map(0.3), YELLOW);
        assert_eq!(cmap.map(-0.7), BLUE);
        assert_eq!(cmap.map(-0.2), GREEN);
        assert_eq!(cmap.map(2.0), BROWN);
    }

    #[test]
    fn test_non_finite_maps_to_sentinel() {
        let cmap = elevation_levels();
        assert_eq!(cmap.bucket(f64::NAN), None);
        assert_eq!(cmap.bucket(f64::INFINITY), None);
        assert_eq!(cmap.bucket(f64::NEG_INFINITY), None);
        assert_eq!(cmap.map(f64::NAN), TRANSPARENT);
        assert_eq!(cmap.map(f64::INFINITY), TRANSPARENT);
        assert_eq!(cmap.map(f64::NEG_INFINITY), TRANSPARENT);
    }

    #[test]
    fn test_validation() {
        let colors = ["#0000ff", "#00ff00"];
        assert!(DiscreteColormap::new("ok", &colors, &[0.0, 1.0, 2.0]).is_ok());
        assert!(DiscreteColormap::new("count", &colors, &[0.0, 1.0]).is_err());
        assert!(DiscreteColormap::new("order", &colors, &[0.0, 2.0, 1.0]).is_err());
        assert!(DiscreteColormap::new("dup", &colors, &[0.0, 1.0, 1.0]).is_err());
        assert!(DiscreteColormap::new("nan", &colors, &[0.0, f64::NAN, 2.0]).is_err());
        assert!(DiscreteColormap::new("color", &["#0000ff", "nope"], &[0.0, 1.0, 2.0]).is_err());

        let empty: [&str; 0] = [];
        assert!(DiscreteColormap::new("empty", &empty, &[0.0]).is_err());
    }
}

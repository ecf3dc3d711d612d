//! Configuration management for terracolor.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colormaps::{get_colormap, ContinuousColormap, DiscreteColormap, DEFAULT_LEVELS};
use crate::error::{Result, TerraError};
use crate::field::GridSpec;
use crate::render::{Layout, RenderOptions};

/// Command-line arguments for terracolor
#[derive(Parser, Debug, Default)]
#[command(name = "terracolor")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory the figures are written to
    #[arg(short, long, env = "TERRACOLOR_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Pixels per grid cell
    #[arg(short, long, env = "TERRACOLOR_SCALE")]
    pub scale: Option<u32>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "TERRACOLOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TERRACOLOR_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Continuous colormap configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousConfig {
    /// Anchor colors, evenly spaced from low to high
    #[serde(default = "default_anchors")]
    pub anchors: Vec<String>,

    /// Number of quantization levels
    #[serde(default = "default_levels")]
    pub levels: usize,
}

/// Discrete colormap configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteConfig {
    /// One color per elevation interval
    #[serde(default = "default_discrete_colors")]
    pub colors: Vec<String>,

    /// Interval boundaries, one more than the number of colors
    #[serde(default = "default_boundaries")]
    pub boundaries: Vec<f64>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the figures are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Pixels per grid cell
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Width of the color bar in pixels
    #[serde(default = "default_colorbar_width")]
    pub colorbar_width: u32,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Grid sampling
    #[serde(default)]
    pub grid: GridSpec,

    /// Colormap used for the reference figure
    #[serde(default = "default_reference_colormap")]
    pub reference_colormap: String,

    /// Custom continuous colormap
    #[serde(default)]
    pub continuous: ContinuousConfig,

    /// Custom discrete colormap
    #[serde(default)]
    pub discrete: DiscreteConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build the configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        // Start with defaults, replaced wholesale by a config file if provided
        let mut config = match &args.config {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Config::default(),
        };

        // Override with command-line arguments and environment variables
        if let Some(dir) = args.output_dir {
            config.output.dir = dir;
        }
        if let Some(scale) = args.scale {
            config.output.scale = scale;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;

        // Building the colormaps checks colors, levels and boundaries
        self.reference()?;
        self.continuous_colormap()?;
        self.discrete_colormap()?;

        if self.output.scale == 0 {
            return Err(TerraError::Config {
                message: "Output scale cannot be 0".to_string(),
            });
        }

        if self.output.colorbar_width == 0 {
            return Err(TerraError::Config {
                message: "Color bar width cannot be 0".to_string(),
            });
        }

        // Figure dimensions must fit before anything is allocated
        Layout::new(self.grid.samples, self.grid.samples, &self.render_options()).map_err(
            |e| TerraError::Config {
                message: e.to_string(),
            },
        )?;

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(TerraError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }

    /// The preset colormap for the reference figure
    pub fn reference(&self) -> Result<ContinuousColormap> {
        get_colormap(&self.reference_colormap).map_err(|e| TerraError::Config {
            message: e.to_string(),
        })
    }

    /// The custom continuous colormap
    pub fn continuous_colormap(&self) -> Result<ContinuousColormap> {
        ContinuousColormap::from_anchors(
            "terrain_cmap",
            &self.continuous.anchors,
            self.continuous.levels,
        )
    }

    /// The custom discrete colormap
    pub fn discrete_colormap(&self) -> Result<DiscreteColormap> {
        DiscreteColormap::new(
            "elevation_levels",
            &self.discrete.colors,
            &self.discrete.boundaries,
        )
    }

    /// Figure layout options
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            scale: self.output.scale,
            colorbar_width: self.output.colorbar_width,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            reference_colormap: default_reference_colormap(),
            continuous: ContinuousConfig::default(),
            discrete: DiscreteConfig::default(),
            output: OutputConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ContinuousConfig {
    fn default() -> Self {
        Self {
            anchors: default_anchors(),
            levels: default_levels(),
        }
    }
}

impl Default for DiscreteConfig {
    fn default() -> Self {
        Self {
            colors: default_discrete_colors(),
            boundaries: default_boundaries(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            scale: default_scale(),
            colorbar_width: default_colorbar_width(),
        }
    }
}

// Default value functions for serde
fn default_reference_colormap() -> String {
    "viridis".to_string()
}

// Blue (water) -> white (snow) -> brown (land)
fn default_anchors() -> Vec<String> {
    ["#0000ff", "#ffffff", "#8B4513"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_levels() -> usize {
    DEFAULT_LEVELS
}

// Blue -> green -> yellow -> orange -> brown
fn default_discrete_colors() -> Vec<String> {
    ["#0000ff", "#00ff00", "#ffff00", "#ff8c00", "#8B4513"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_boundaries() -> Vec<f64> {
    vec![-1.0, -0.5, 0.0, 0.5, 1.0, 1.5]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("figures")
}

fn default_scale() -> u32 {
    4
}

fn default_colorbar_width() -> u32 {
    24
}

fn default_log_level() -> String {
    "info".to_string()
}

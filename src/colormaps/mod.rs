//! Colormap implementations for figure rendering.
//!
//! This module provides named gradient presets, custom continuous colormaps
//! and boundary-bucketed discrete colormaps.

pub mod colormap;
pub mod continuous;
pub mod discrete;

pub use colormap::{get_colormap, parse_color, to_hex, ColorMapping, Normalize, Rgba, TRANSPARENT};
pub use continuous::{ContinuousColormap, DEFAULT_LEVELS};
pub use discrete::DiscreteColormap;

//! # terracolor
//!
//! Synthetic terrain elevation rendered with three colormap strategies.
//!
//! A radial sine surface stands in for terrain height. It is drawn once with a
//! preset colormap for reference, once with a custom blue-white-brown
//! gradient, and once with a discrete colormap that buckets elevations by
//! fixed boundaries.
//!
//! ## Architecture
//!
//! - **Field**: grid and elevation generation
//! - **Colormaps**: continuous and discrete color mappings behind one `ColorMapping`
//! - **Render**: figures with color bars, shown on a `RenderSurface`
//! - **Pipeline**: the fixed three-figure sequence

pub mod colormaps;
pub mod config;
pub mod error;
pub mod field;
pub mod logging;
pub mod pipeline;
pub mod render;

pub use colormaps::{ColorMapping, ContinuousColormap, DiscreteColormap, Rgba};
pub use config::Config;
pub use error::{Result, TerraError};
pub use field::{ElevationField, GridSpec};
pub use render::{Figure, PngSurface, RenderSurface, Renderer};

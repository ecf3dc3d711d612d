//! Figure rendering.
//!
//! Turns a 2D field and a color mapping into an image with a color bar, and
//! hands it to a rendering surface.

pub mod figure;
pub mod surface;

pub use figure::{
    render_figure, Figure, FigureSpec, Layout, Legend, LegendEntry, RenderOptions,
    MAX_FIGURE_PIXELS,
};
pub use surface::{MemorySurface, PngSurface, RenderSurface, Renderer};

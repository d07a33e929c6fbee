//! Depth map visualisation
//!
//! Renders depth grids for inspection, independently of the effect pipeline:
//! a rounded grayscale map or one of the piecewise-linear perceptual colormaps.

mod colormap;
mod renderer;

pub use colormap::ColorMapKind;
pub use renderer::{color_bar, enhance, render_depth, DepthVisualizer};

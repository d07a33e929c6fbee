//! Depth smoothing filters
//!
//! [`smooth`] is the edge-aware filter the effect pipeline runs on the resized
//! depth grid. [`gaussian_blur`] is a plain separable blur for callers that want
//! to denoise raw model output before normalisation.

mod edge_aware;
mod gaussian;

pub use edge_aware::{smooth, SmoothingKernel};
pub use gaussian::gaussian_blur;

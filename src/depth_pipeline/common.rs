//! Common utilities module
//!
//! Shared error type and the grid/raster value types every stage passes around.

pub mod error;
pub mod types;

pub use error::{PipelineError, Result};
pub use types::{DepthGrid, LuminanceBuffer, RasterImage};

//! TIFF input and export
//!
//! Decoding of source images and upstream depth maps, and encoding of rendered
//! rasters and raw depth values, with the compression options of [`ExportConfig`].

mod reader;
mod writer;
mod standard_tiff_reader;
mod standard_tiff_writer;
pub mod types;

pub use reader::RasterReader;
pub use writer::RasterWriter;
pub use standard_tiff_reader::StandardTiffReader;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{ExportConfig, ExportConfigBuilder, TiffCompression};

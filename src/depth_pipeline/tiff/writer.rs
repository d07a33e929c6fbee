use std::io::Write;
use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::common::types::{DepthGrid, RasterImage};
use crate::depth_pipeline::tiff::types::ExportConfig;

pub trait RasterWriter {
    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write, config: &ExportConfig) -> Result<()>;
    fn write_depth(&self, depth: &DepthGrid, output: &mut dyn Write, config: &ExportConfig) -> Result<()>;
}

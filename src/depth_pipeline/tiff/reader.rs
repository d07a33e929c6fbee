use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::common::types::{DepthGrid, RasterImage};

pub trait RasterReader {
    /// Decodes a source image into an opaque-or-alpha RGBA raster.
    fn read_raster(&self, data: &[u8]) -> Result<RasterImage>;

    /// Decodes a single-channel depth map. Values are returned unnormalised.
    fn read_depth(&self, data: &[u8]) -> Result<DepthGrid>;
}

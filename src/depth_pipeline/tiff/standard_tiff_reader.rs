use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::depth_pipeline::common::error::{PipelineError, Result};
use crate::depth_pipeline::common::types::{DepthGrid, RasterImage};
use crate::depth_pipeline::tiff::reader::RasterReader;

/// Reader for baseline TIFF sources and depth maps, backed by the `tiff` crate.
pub struct StandardTiffReader;

fn decode(data: &[u8]) -> Result<(usize, usize, ColorType, DecodingResult)> {
    let mut decoder = Decoder::new(Cursor::new(data))
        .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| PipelineError::DecodeError(e.to_string()))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| PipelineError::DecodeError(e.to_string()))?;
    let result = decoder
        .read_image()
        .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

    debug!("Decoded TIFF: {}x{} {:?}", width, height, color_type);
    Ok((width as usize, height as usize, color_type, result))
}

impl RasterReader for StandardTiffReader {
    fn read_raster(&self, data: &[u8]) -> Result<RasterImage> {
        debug!("Decoding source image, {} bytes", data.len());
        let (width, height, color_type, result) = decode(data)?;

        match (color_type, result) {
            (ColorType::RGB(8), DecodingResult::U8(buf)) => RasterImage::from_rgb8(width, height, &buf),
            (ColorType::RGBA(8), DecodingResult::U8(buf)) => RasterImage::from_rgba8(width, height, buf),
            (ColorType::Gray(8), DecodingResult::U8(buf)) => RasterImage::from_gray8(width, height, &buf),
            (ct, _) => Err(PipelineError::UnsupportedFormat(format!(
                "source color type {:?}",
                ct
            ))),
        }
    }

    fn read_depth(&self, data: &[u8]) -> Result<DepthGrid> {
        debug!("Decoding depth map, {} bytes", data.len());
        let (width, height, color_type, result) = decode(data)?;

        if !matches!(color_type, ColorType::Gray(_)) {
            return Err(PipelineError::UnsupportedFormat(format!(
                "depth color type {:?}, expected single channel",
                color_type
            )));
        }

        // Integer depth is scaled to [0, 1]; float depth is kept as stored
        let values: Vec<f64> = match result {
            DecodingResult::U8(buf) => buf.iter().map(|&v| f64::from(v) / f64::from(u8::MAX)).collect(),
            DecodingResult::U16(buf) => buf.iter().map(|&v| f64::from(v) / f64::from(u16::MAX)).collect(),
            DecodingResult::F32(buf) => buf.iter().map(|&v| f64::from(v)).collect(),
            DecodingResult::F64(buf) => buf,
            _ => {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "depth sample format {:?}",
                    color_type
                )));
            }
        };

        DepthGrid::new(width, height, values)
    }
}

use std::io::{Cursor, Write};

use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{colortype, Compression, TiffEncoder};
use tiff::tags::Predictor;
use tracing::debug;

use crate::depth_pipeline::common::error::{PipelineError, Result};
use crate::depth_pipeline::common::types::{DepthGrid, RasterImage};
use crate::depth_pipeline::tiff::types::{ExportConfig, TiffCompression};
use crate::depth_pipeline::tiff::writer::RasterWriter;

pub struct StandardTiffWriter;

fn compression(config: &ExportConfig) -> Compression {
    match config.compression {
        TiffCompression::None => Compression::Uncompressed,
        TiffCompression::Lzw => Compression::Lzw,
        TiffCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
        TiffCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
        TiffCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
    }
}

fn dimensions(width: usize, height: usize) -> Result<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(PipelineError::InvalidDimensions(width, height)),
    }
}

impl RasterWriter for StandardTiffWriter {
    fn write_raster(&self, image: &RasterImage, output: &mut dyn Write, config: &ExportConfig) -> Result<()> {
        debug!("Encoding RGB TIFF image: {}x{}", image.width(), image.height());
        let (width, height) = dimensions(image.width(), image.height())?;

        let mut buffer = Vec::new();
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?
            .with_compression(compression(config));

        if let Some(predictor_val) = config.predictor {
            let predictor = match predictor_val {
                2 => Predictor::Horizontal,
                _ => Predictor::None,
            };
            encoder = encoder.with_predictor(predictor);
        }

        encoder
            .write_image::<colortype::RGB8>(width, height, &image.to_rgb8())
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }

    fn write_depth(&self, depth: &DepthGrid, output: &mut dyn Write, config: &ExportConfig) -> Result<()> {
        debug!("Encoding float depth TIFF: {}x{}", depth.width(), depth.height());
        let (width, height) = dimensions(depth.width(), depth.height())?;

        let mut buffer = Vec::new();
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?
            .with_compression(compression(config));

        encoder
            .write_image::<colortype::Gray32Float>(width, height, &depth.to_f32_vec())
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("Depth TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

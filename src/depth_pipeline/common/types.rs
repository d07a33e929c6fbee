//! Grid and raster types shared by every pipeline stage

use crate::depth_pipeline::common::error::{PipelineError, Result};

pub(crate) fn checked_len(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions(width, height));
    }
    width
        .checked_mul(height)
        .ok_or_else(|| PipelineError::InvalidInputShape(format!("{}x{} overflows", width, height)))
}

/// Byte length of a `width` x `height` raster with `channels` interleaved bytes per pixel.
fn checked_bytes(width: usize, height: usize, channels: usize) -> Result<usize> {
    checked_len(width, height)?.checked_mul(channels).ok_or_else(|| {
        PipelineError::InvalidInputShape(format!("{}x{}x{} overflows", width, height, channels))
    })
}

/// Two-dimensional grid of depth samples
///
/// Values are stored row-major in double precision. Raw model output may contain
/// NaN or infinite entries until it has been through
/// [`normalize_min_max`](crate::depth_pipeline::normalize::normalize_min_max).
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl DepthGrid {
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(PipelineError::InvalidInputShape(format!(
                "depth grid {}x{} expects {} samples, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Builds a grid from nested rows, rejecting empty or jagged input.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        checked_len(width, height)?;

        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(PipelineError::InvalidInputShape(format!(
                "row {} has {} samples, expected {}",
                y,
                row.len(),
                width
            )));
        }

        Self::new(width, height, rows.concat())
    }

    /// Widens single-precision model output into a grid.
    pub fn from_f32(width: usize, height: usize, data: &[f32]) -> Result<Self> {
        Self::new(width, height, data.iter().map(|&v| f64::from(v)).collect())
    }

    /// A grid with this grid's dimensions and new samples.
    pub(crate) fn same_shape(&self, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn has_dimensions(&self, width: usize, height: usize) -> bool {
        self.width == width && self.height == height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[f64] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.data.iter().map(|&v| v as f32).collect()
    }
}

/// Per-pixel luminance in raster order
///
/// Holds 0-255 values straight out of grayscale conversion and [0, 1] values
/// once levels have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceBuffer {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl LuminanceBuffer {
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if values.len() != expected {
            return Err(PipelineError::InvalidInputShape(format!(
                "luminance buffer {}x{} expects {} values, got {}",
                width,
                height,
                expected,
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub(crate) fn from_raster_order(width: usize, height: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

/// 8-bit RGBA raster, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    /// Interleaved [R, G, B, A, R, G, B, A, ...]
    data: Vec<u8>,
}

impl RasterImage {
    pub const CHANNELS: usize = 4;

    pub fn from_rgba8(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = checked_bytes(width, height, Self::CHANNELS)?;
        if data.len() != expected {
            return Err(PipelineError::InvalidInputShape(format!(
                "RGBA raster {}x{} expects {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Expands packed RGB into an opaque raster.
    pub fn from_rgb8(width: usize, height: usize, rgb: &[u8]) -> Result<Self> {
        let expected = checked_bytes(width, height, 3)?;
        if rgb.len() != expected {
            return Err(PipelineError::InvalidInputShape(format!(
                "RGB raster {}x{} expects {} bytes, got {}",
                width,
                height,
                expected,
                rgb.len()
            )));
        }
        let data = rgb
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_gray8(width: usize, height: usize, gray: &[u8]) -> Result<Self> {
        let pixels = checked_len(width, height)?;
        if gray.len() != pixels {
            return Err(PipelineError::InvalidInputShape(format!(
                "gray raster {}x{} expects {} bytes, got {}",
                width,
                height,
                pixels,
                gray.len()
            )));
        }
        let data = gray.iter().flat_map(|&v| [v, v, v, u8::MAX]).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn solid(width: usize, height: usize, rgb: [u8; 3]) -> Result<Self> {
        let pixels = checked_len(width, height)?;
        checked_bytes(width, height, Self::CHANNELS)?;
        let data = std::iter::repeat_n([rgb[0], rgb[1], rgb[2], u8::MAX], pixels)
            .flatten()
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn same_shape(&self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * Self::CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(Self::CHANNELS)
    }

    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels().flat_map(|px| [px[0], px[1], px[2]]).collect()
    }
}

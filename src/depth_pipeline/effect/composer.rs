use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::depth_pipeline::common::{DepthGrid, LuminanceBuffer, PipelineError, RasterImage, Result};
use crate::depth_pipeline::effect::EffectParams;
use crate::depth_pipeline::resample::{resize, Interpolation};
use crate::depth_pipeline::smoothing::smooth;
use crate::depth_pipeline::tone::adjust_tone;

const MIN_STEEPNESS: f64 = 1e-3;

/// Values derived from [`EffectParams`] that drive the per-pixel blend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionCoefficients {
    pub threshold: f64,
    pub steepness: f64,
    pub red_factor: f64,
    pub blue_factor: f64,
}

impl CompositionCoefficients {
    pub fn from_params(params: &EffectParams) -> Self {
        let p = params.sanitized();
        let steepness = f64::from(p.depth_scale).max(MIN_STEEPNESS);
        let feather = f64::from(p.feather) / 100.0;

        Self {
            threshold: f64::from(p.threshold) / 100.0,
            steepness: steepness / (feather * 10.0 + 1.0),
            red_factor: f64::from(p.red_brightness) / 50.0,
            blue_factor: f64::from(p.blue_brightness) / 50.0,
        }
    }

    /// Logistic weight of the red channel at `depth`; exactly 0.5 at the threshold.
    #[inline]
    pub fn blend(&self, depth: f64) -> f64 {
        let exponent = -self.steepness * (depth - self.threshold);
        1.0 / (1.0 + exponent.exp())
    }

    /// Red and blue channel values. Both truncate after clamping.
    #[inline]
    pub fn channels(&self, luminance: f64, depth: f64) -> (u8, u8) {
        let blend = self.blend(depth);
        let red = self.red_factor * luminance * blend;
        let blue = self.blue_factor * luminance * (1.0 - blend);
        (
            (red * 255.0).clamp(0.0, 255.0) as u8,
            (blue * 255.0).clamp(0.0, 255.0) as u8,
        )
    }
}

/// Combines tone-adjusted luminance and an image-sized depth grid into the
/// red/blue composite.
pub fn compose(
    luminance: &LuminanceBuffer,
    depth: &DepthGrid,
    params: &EffectParams,
    width: usize,
    height: usize,
) -> Result<RasterImage> {
    if luminance.len() != width * height {
        return Err(PipelineError::InvalidInputShape(format!(
            "luminance has {} values, expected {}x{}",
            luminance.len(),
            width,
            height
        )));
    }
    if !depth.has_dimensions(width, height) {
        return Err(PipelineError::InvalidInputShape(format!(
            "depth is {}x{}, expected {}x{}",
            depth.width(),
            depth.height(),
            width,
            height
        )));
    }

    let coefficients = CompositionCoefficients::from_params(params);
    debug!(?coefficients, "Composing {}x{} effect", width, height);

    let gray = luminance.as_slice();
    let mut data = vec![0u8; width * height * RasterImage::CHANNELS];
    data.par_chunks_mut(width * RasterImage::CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            let depth_row = depth.row(y);
            let gray_row = &gray[y * width..(y + 1) * width];
            for (x, px) in row.chunks_exact_mut(RasterImage::CHANNELS).enumerate() {
                let (red, blue) = coefficients.channels(gray_row[x], depth_row[x]);
                px.copy_from_slice(&[red, 0, blue, u8::MAX]);
            }
        });

    RasterImage::from_rgba8(width, height, data)
}

/// Runs the whole effect: depth resize and smoothing, tone adjustment, composition.
///
/// `depth` should already be normalised; it is resized to the source dimensions.
#[instrument(skip_all, fields(width = source.width(), height = source.height()))]
pub fn apply_effect(source: &RasterImage, depth: DepthGrid, params: &EffectParams) -> Result<RasterImage> {
    let width = source.width();
    let height = source.height();
    let params = params.sanitized();

    let resized = resize(depth, width, height, Interpolation::BilinearExact)?;
    let smoothed = smooth(resized, params.smoothing);
    let luminance = adjust_tone(source, &params);

    compose(&luminance, &smoothed, &params, width, height)
}

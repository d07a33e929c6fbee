//! Tone adjustment of the source image
//!
//! Grayscale → levels → gamma, always in that order. Levels turns the 0-255
//! luminance into [0, 1] and gamma expects that range.

use tracing::debug;

use crate::depth_pipeline::common::{LuminanceBuffer, RasterImage};
use crate::depth_pipeline::effect::EffectParams;

const LEVEL_SCALE: f64 = 2.55;
const MIN_LEVEL_RANGE: f64 = 1e-10;
const GAMMA_MIN: f64 = 0.1;
const GAMMA_SPAN: f64 = 2.9;

/// ITU-R BT.601 luminance of each pixel, in 0-255.
pub fn to_grayscale(raster: &RasterImage) -> LuminanceBuffer {
    let values = raster
        .pixels()
        .map(|px| {
            let r = f64::from(px[0]);
            let g = f64::from(px[1]);
            let b = f64::from(px[2]);
            0.299 * r + 0.587 * g + 0.114 * b
        })
        .collect();

    // Dimensions come from a validated raster
    LuminanceBuffer::from_raster_order(raster.width(), raster.height(), values)
}

/// Remaps `[black, white]` (percent of 255) onto `[0, 1]`, clamping the result.
///
/// A white level at or below the black level collapses to a step at `black`.
pub fn apply_levels(buffer: &mut LuminanceBuffer, black_percent: f32, white_percent: f32) {
    let black = f64::from(black_percent) * LEVEL_SCALE;
    let white = f64::from(white_percent) * LEVEL_SCALE;
    let denominator = (white - black).max(MIN_LEVEL_RANGE);

    if white - black < MIN_LEVEL_RANGE {
        debug!(
            "Level range {:.3}..{:.3} is empty, using minimum denominator",
            black, white
        );
    }

    for v in buffer.as_mut_slice() {
        *v = ((*v - black) / denominator).clamp(0.0, 1.0);
    }
}

/// Maps `gamma_percent` (0-100) onto an exponent in [0.1, 3.0].
pub fn gamma_exponent(gamma_percent: f32) -> f64 {
    GAMMA_MIN + (f64::from(gamma_percent) / 100.0) * GAMMA_SPAN
}

/// Raises every value to the exponent for `gamma_percent`.
pub fn apply_gamma(buffer: &mut LuminanceBuffer, gamma_percent: f32) {
    let exponent = gamma_exponent(gamma_percent);
    for v in buffer.as_mut_slice() {
        *v = v.powf(exponent);
    }
}

/// Full tone curve for the effect: grayscale, levels, then gamma.
pub fn adjust_tone(raster: &RasterImage, params: &EffectParams) -> LuminanceBuffer {
    let params = params.sanitized();
    let mut luminance = to_grayscale(raster);
    apply_levels(&mut luminance, params.black_level, params.white_level);
    apply_gamma(&mut luminance, params.gamma);
    luminance
}

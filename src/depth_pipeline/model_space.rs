//! Mapping depth model output back to source image space
//!
//! Depth models run on a fixed square input: the source is scaled so its short
//! side matches the model size, then centre-cropped. [`PreprocessInfo`] records
//! that mapping so the model output can be placed back on a canvas of the scaled
//! size and resized to the source dimensions.

use tracing::{debug, instrument, warn};

use crate::depth_pipeline::common::{DepthGrid, PipelineError, Result};
use crate::depth_pipeline::normalize::normalize_min_max;
use crate::depth_pipeline::resample::{resize, Interpolation};

/// Geometry of the scale-and-crop applied before inference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessInfo {
    pub original_width: usize,
    pub original_height: usize,
    pub scale: f32,
    pub crop_x: usize,
    pub crop_y: usize,
}

impl PreprocessInfo {
    /// Scale the short side to `input_size`, then centre-crop to a square.
    pub fn for_square_input(
        original_width: usize,
        original_height: usize,
        input_size: usize,
    ) -> Result<Self> {
        if original_width == 0 || original_height == 0 {
            return Err(PipelineError::InvalidDimensions(original_width, original_height));
        }
        if input_size == 0 {
            return Err(PipelineError::InvalidInputShape("model input size is zero".into()));
        }

        let scale = input_size as f32 / original_width.min(original_height) as f32;
        let mut info = Self {
            original_width,
            original_height,
            scale,
            crop_x: 0,
            crop_y: 0,
        };
        let (scaled_width, scaled_height) = info.scaled_dimensions();
        info.crop_x = scaled_width.saturating_sub(input_size) / 2;
        info.crop_y = scaled_height.saturating_sub(input_size) / 2;

        debug!(
            "Preprocess (crop): {}x{} -> {}x{} (scale={:.3}, crop={},{})",
            original_width, original_height, scaled_width, scaled_height, scale, info.crop_x, info.crop_y
        );
        Ok(info)
    }

    /// Source dimensions after scaling, before the crop.
    pub fn scaled_dimensions(&self) -> (usize, usize) {
        (
            (self.original_width as f32 * self.scale).round() as usize,
            (self.original_height as f32 * self.scale).round() as usize,
        )
    }
}

/// Depth returned by the upstream estimator, with its crop geometry if the model
/// did not run on the source dimensions directly
#[derive(Debug, Clone)]
pub struct DepthEstimate {
    pub raw: DepthGrid,
    pub preprocess: Option<PreprocessInfo>,
}

impl DepthEstimate {
    pub fn new(raw: DepthGrid) -> Self {
        Self {
            raw,
            preprocess: None,
        }
    }

    pub fn with_preprocess(raw: DepthGrid, preprocess: PreprocessInfo) -> Self {
        Self {
            raw,
            preprocess: Some(preprocess),
        }
    }
}

/// Builds a grid from a flat depth tensor of shape `[1, H, W]` or `[1, 1, H, W]`.
pub fn depth_from_tensor(values: &[f32], shape: &[usize]) -> Result<DepthGrid> {
    let (height, width) = match shape {
        [_, h, w] => (*h, *w),
        [_, _, h, w] => (*h, *w),
        _ => {
            return Err(PipelineError::InvalidInputShape(format!(
                "unexpected depth tensor shape {:?}",
                shape
            )));
        }
    };

    let expected: usize = shape.iter().product();
    if values.len() != expected || expected != width * height {
        return Err(PipelineError::InvalidInputShape(format!(
            "depth tensor {:?} holds {} values, expected a single {}x{} map",
            shape,
            values.len(),
            width,
            height
        )));
    }

    DepthGrid::from_f32(width, height, values)
}

/// Places the model output on a zero canvas of the scaled source size at the
/// crop offsets. Rows or columns that fall outside the canvas are dropped.
pub fn reconstruct_canvas(raw: &DepthGrid, info: &PreprocessInfo) -> Result<DepthGrid> {
    let (canvas_width, canvas_height) = info.scaled_dimensions();
    let mut canvas = DepthGrid::filled(canvas_width, canvas_height, 0.0)?;

    let copy_width = raw.width().min(canvas_width.saturating_sub(info.crop_x));
    let copy_height = raw.height().min(canvas_height.saturating_sub(info.crop_y));
    if copy_width < raw.width() || copy_height < raw.height() {
        warn!(
            "Depth {}x{} at ({}, {}) exceeds canvas {}x{}, clipping",
            raw.width(),
            raw.height(),
            info.crop_x,
            info.crop_y,
            canvas_width,
            canvas_height
        );
    }

    let data = canvas.as_mut_slice();
    for y in 0..copy_height {
        let start = (info.crop_y + y) * canvas_width + info.crop_x;
        data[start..start + copy_width].copy_from_slice(&raw.row(y)[..copy_width]);
    }

    Ok(canvas)
}

/// Turns raw model depth into a normalised grid at `width` x `height`.
///
/// Canvas reconstruction (when `info` is given), pixel-centre bilinear resize,
/// then min/max normalisation.
#[instrument(skip(raw, info), fields(raw_width = raw.width(), raw_height = raw.height()))]
pub fn prepare_depth(
    raw: DepthGrid,
    info: Option<&PreprocessInfo>,
    width: usize,
    height: usize,
) -> Result<DepthGrid> {
    let image_space = match info {
        Some(info) => reconstruct_canvas(&raw, info)?,
        None => raw,
    };

    let mut depth = resize(image_space, width, height, Interpolation::BilinearExact)?;
    let outcome = normalize_min_max(&mut depth);
    debug!(?outcome, "Depth prepared at {}x{}", width, height);
    Ok(depth)
}

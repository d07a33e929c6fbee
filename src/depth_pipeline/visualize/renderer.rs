use std::borrow::Cow;

use tracing::debug;

use crate::depth_pipeline::common::{DepthGrid, PipelineError, RasterImage, Result};
use crate::depth_pipeline::resample::{resample, Interpolation};
use crate::depth_pipeline::visualize::ColorMapKind;

/// Renders `grid` at `target_width` x `target_height` through `kind`.
///
/// Grayscale resizes with pixel-centre bilinear interpolation and rounds
/// `value * 255`. Perceptual maps sample the nearest depth value and truncate.
pub fn render_depth(
    grid: &DepthGrid,
    target_width: usize,
    target_height: usize,
    kind: ColorMapKind,
) -> Result<RasterImage> {
    let interpolation = match kind {
        ColorMapKind::Grayscale => Interpolation::BilinearExact,
        _ => Interpolation::Nearest,
    };

    let sized = if grid.has_dimensions(target_width, target_height) {
        Cow::Borrowed(grid)
    } else {
        Cow::Owned(resample(grid, target_width, target_height, interpolation)?)
    };

    let data: Vec<u8> = match kind {
        ColorMapKind::Grayscale => sized
            .as_slice()
            .iter()
            .flat_map(|&v| {
                let gray = (v * 255.0).clamp(0.0, 255.0).round() as u8;
                [gray, gray, gray, u8::MAX]
            })
            .collect(),
        _ => sized
            .as_slice()
            .iter()
            .flat_map(|&v| {
                let [r, g, b] = kind.map(v as f32);
                [r, g, b, u8::MAX]
            })
            .collect(),
    };

    debug!(
        "Rendered {} depth map {}x{}",
        kind, target_width, target_height
    );
    RasterImage::from_rgba8(target_width, target_height, data)
}

/// Vertical legend sweeping 0 (top) to 1 (bottom) through `kind`.
pub fn color_bar(width: usize, height: usize, kind: ColorMapKind) -> Result<RasterImage> {
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidDimensions(width, height));
    }

    let mut data = Vec::with_capacity(width * height * RasterImage::CHANNELS);
    for y in 0..height {
        let value = if height > 1 {
            y as f32 / (height - 1) as f32
        } else {
            0.0
        };
        let [r, g, b] = kind.map(value);
        for _ in 0..width {
            data.extend_from_slice(&[r, g, b, u8::MAX]);
        }
    }

    RasterImage::from_rgba8(width, height, data)
}

/// Contrast/brightness adjustment of a rendered depth map around mid-gray.
pub fn enhance(raster: &RasterImage, contrast: f32, brightness: f32) -> RasterImage {
    let adjust = |c: u8| -> u8 {
        let v = (f32::from(c) - 128.0) * contrast + 128.0 + brightness;
        (v as i32).clamp(0, 255) as u8
    };

    let data = raster
        .pixels()
        .flat_map(|px| [adjust(px[0]), adjust(px[1]), adjust(px[2]), px[3]])
        .collect();

    raster.same_shape(data)
}

/// Renderer with a default colormap for callers that do not pick one per call
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthVisualizer {
    colormap: ColorMapKind,
}

impl DepthVisualizer {
    pub fn new(colormap: ColorMapKind) -> Self {
        Self { colormap }
    }

    pub fn colormap(&self) -> ColorMapKind {
        self.colormap
    }

    pub fn set_colormap(&mut self, colormap: ColorMapKind) {
        debug!("Color map changed to: {}", colormap);
        self.colormap = colormap;
    }

    pub fn render(&self, grid: &DepthGrid, width: usize, height: usize) -> Result<RasterImage> {
        self.render_with(grid, width, height, None)
    }

    pub fn render_with(
        &self,
        grid: &DepthGrid,
        width: usize,
        height: usize,
        kind: Option<ColorMapKind>,
    ) -> Result<RasterImage> {
        render_depth(grid, width, height, kind.unwrap_or(self.colormap))
    }

    pub fn color_bar(&self, width: usize, height: usize) -> Result<RasterImage> {
        color_bar(width, height, self.colormap)
    }
}

//! Depth grid resampling
//!
//! Every resize in the pipeline goes through [`resize`] or [`resample`], which
//! dispatch on [`Interpolation`]. Output rows are filled in parallel; each output
//! sample depends only on the source grid, so the result does not depend on
//! scheduling.

mod bicubic;
mod bilinear;

use rayon::prelude::*;
use tracing::debug;

use crate::depth_pipeline::common::types::checked_len;
use crate::depth_pipeline::common::{DepthGrid, PipelineError, Result};

/// Interpolation mode for depth resizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Pixel-centre bilinear (`(x + 0.5) * scale - 0.5`, clamped before sampling)
    #[default]
    BilinearExact,
    /// Catmull-Rom cubic on a 4x4 neighbourhood, corner-aligned (`x * scale`)
    Bicubic,
    /// Nearest source sample, corner-aligned
    Nearest,
}

/// Resizes `grid` to `target_width` x `target_height`.
///
/// When the grid already has the target dimensions it is returned as is.
pub fn resize(
    grid: DepthGrid,
    target_width: usize,
    target_height: usize,
    mode: Interpolation,
) -> Result<DepthGrid> {
    if grid.has_dimensions(target_width, target_height) {
        return Ok(grid);
    }
    resample(&grid, target_width, target_height, mode)
}

/// Resamples `grid` into a newly allocated grid of the target dimensions.
pub fn resample(
    grid: &DepthGrid,
    target_width: usize,
    target_height: usize,
    mode: Interpolation,
) -> Result<DepthGrid> {
    if target_width == 0 || target_height == 0 {
        return Err(PipelineError::InvalidInputShape(format!(
            "cannot resize to {}x{}",
            target_width, target_height
        )));
    }
    let len = checked_len(target_width, target_height)?;

    debug!(
        "Resampling depth {}x{} -> {}x{} ({:?})",
        grid.width(),
        grid.height(),
        target_width,
        target_height,
        mode
    );

    let scale_x = grid.width() as f64 / target_width as f64;
    let scale_y = grid.height() as f64 / target_height as f64;

    let mut data = vec![0.0f64; len];
    data.par_chunks_mut(target_width)
        .enumerate()
        .for_each(|(y, row)| match mode {
            Interpolation::BilinearExact => bilinear::fill_row(grid, row, y, scale_x, scale_y),
            Interpolation::Bicubic => bicubic::fill_row(grid, row, y, scale_x, scale_y),
            Interpolation::Nearest => fill_row_nearest(grid, row, y, scale_x, scale_y),
        });

    DepthGrid::new(target_width, target_height, data)
}

fn fill_row_nearest(src: &DepthGrid, row: &mut [f64], y: usize, scale_x: f64, scale_y: f64) {
    let src_y = ((y as f64 * scale_y) as usize).min(src.height() - 1);
    let src_row = src.row(src_y);
    for (x, out) in row.iter_mut().enumerate() {
        let src_x = ((x as f64 * scale_x) as usize).min(src.width() - 1);
        *out = src_row[src_x];
    }
}

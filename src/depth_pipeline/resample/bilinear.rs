//! Pixel-centre bilinear resampling
//!
//! Source coordinates use the half-pixel offset `(x + 0.5) * scale - 0.5` and are
//! clamped into the grid *before* the neighbours are looked up, so border
//! samples replicate the edge value.

use crate::depth_pipeline::common::DepthGrid;

pub(super) fn fill_row(src: &DepthGrid, row: &mut [f64], y: usize, scale_x: f64, scale_y: f64) {
    let max_x = (src.width() - 1) as f64;
    let max_y = (src.height() - 1) as f64;

    let src_y = ((y as f64 + 0.5) * scale_y - 0.5).clamp(0.0, max_y);
    for (x, out) in row.iter_mut().enumerate() {
        let src_x = ((x as f64 + 0.5) * scale_x - 0.5).clamp(0.0, max_x);
        *out = sample(src, src_x, src_y);
    }
}

/// Bilinear sample at an in-range source coordinate.
#[inline]
pub(super) fn sample(src: &DepthGrid, x: f64, y: f64) -> f64 {
    let x1 = x.floor() as usize;
    let y1 = y.floor() as usize;
    let x2 = (x1 + 1).min(src.width() - 1);
    let y2 = (y1 + 1).min(src.height() - 1);

    let dx = x - x1 as f64;
    let dy = y - y1 as f64;

    let v11 = src.get(x1, y1);
    let v12 = src.get(x2, y1);
    let v21 = src.get(x1, y2);
    let v22 = src.get(x2, y2);

    v11 * (1.0 - dx) * (1.0 - dy) + v12 * dx * (1.0 - dy) + v21 * (1.0 - dx) * dy + v22 * dx * dy
}

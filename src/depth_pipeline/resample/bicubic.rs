//! Catmull-Rom bicubic resampling
//!
//! Corner-aligned (`x * scale`, no half-pixel offset), unlike the bilinear path.
//! The 4x4 neighbourhood is clamped at the borders and the kernel is applied along
//! x first, then along y.

use crate::depth_pipeline::common::DepthGrid;

pub(super) fn fill_row(src: &DepthGrid, row: &mut [f64], y: usize, scale_x: f64, scale_y: f64) {
    let src_y = y as f64 * scale_y;
    for (x, out) in row.iter_mut().enumerate() {
        *out = sample(src, x as f64 * scale_x, src_y);
    }
}

#[inline]
fn sample(src: &DepthGrid, x: f64, y: f64) -> f64 {
    let x1 = x.floor() as isize;
    let y1 = y.floor() as isize;
    let dx = x - x1 as f64;
    let dy = y - y1 as f64;

    let max_x = src.width() as isize - 1;
    let max_y = src.height() as isize - 1;

    let mut columns = [0.0f64; 4];
    for (j, column) in columns.iter_mut().enumerate() {
        let py = (y1 - 1 + j as isize).clamp(0, max_y) as usize;
        let p = |i: isize| src.get((x1 - 1 + i).clamp(0, max_x) as usize, py);
        *column = cubic(p(0), p(1), p(2), p(3), dx);
    }

    cubic(columns[0], columns[1], columns[2], columns[3], dy)
}

#[inline]
fn cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    p1 + 0.5
        * t
        * (p2 - p0 + t * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3 + t * (3.0 * (p1 - p2) + p3 - p0)))
}

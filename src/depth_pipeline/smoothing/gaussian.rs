use rayon::prelude::*;
use tracing::debug;

use crate::depth_pipeline::common::DepthGrid;

/// Normalised 1D weights, at most `max_size` taps. `None` when `2 * sigma^2`
/// underflows to zero.
fn kernel(sigma: f64, max_size: usize) -> Option<Vec<f64>> {
    let two_sigma_sq = 2.0 * sigma * sigma;
    if two_sigma_sq == 0.0 {
        return None;
    }

    let mut size = ((6.0 * sigma).ceil() as usize).min(max_size);
    if size % 2 == 0 {
        size += 1;
    }
    let half = (size / 2) as isize;

    let mut weights: Vec<f64> = (-half..=half)
        .map(|i| {
            let x = i as f64;
            (-(x * x) / two_sigma_sq).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.iter_mut().for_each(|w| *w /= sum);
    Some(weights)
}

/// Separable Gaussian blur with clamped edges.
///
/// The kernel spans `ceil(6 * sigma)` samples, rounded up to an odd count and
/// capped at `2 * max(width, height) + 1`. Non-positive or non-finite `sigma`,
/// or one too small to weight any neighbour, returns a copy of the input.
pub fn gaussian_blur(grid: &DepthGrid, sigma: f64) -> DepthGrid {
    if !sigma.is_finite() || sigma <= 0.0 {
        return grid.clone();
    }

    let width = grid.width();
    let height = grid.height();
    let Some(weights) = kernel(sigma, 2 * width.max(height) + 1) else {
        debug!("Gaussian sigma {:e} underflows, returning input", sigma);
        return grid.clone();
    };
    let half = (weights.len() / 2) as isize;

    let mut horizontal = vec![0.0f64; width * height];
    horizontal
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out_row)| {
            let row = grid.row(y);
            for (x, out) in out_row.iter_mut().enumerate() {
                *out = weights
                    .iter()
                    .enumerate()
                    .map(|(k, w)| {
                        let sx = (x as isize + k as isize - half).clamp(0, width as isize - 1);
                        row[sx as usize] * w
                    })
                    .sum();
            }
        });

    let mut output = vec![0.0f64; width * height];
    output
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, out_row)| {
            for (x, out) in out_row.iter_mut().enumerate() {
                *out = weights
                    .iter()
                    .enumerate()
                    .map(|(k, w)| {
                        let sy = (y as isize + k as isize - half).clamp(0, height as isize - 1);
                        horizontal[sy as usize * width + x] * w
                    })
                    .sum();
            }
        });

    debug!(
        "Gaussian blur sigma={:.2}, kernel size={}",
        sigma,
        weights.len()
    );
    grid.same_shape(output)
}

//! Bilateral-style edge-aware smoothing
//!
//! Weights combine spatial distance and value difference. Both Gaussians share the
//! same sigma, and the weights are computed on samples scaled to 0-255 while the
//! grid itself stays in [0, 1].

use rayon::prelude::*;
use tracing::debug;

use crate::depth_pipeline::common::DepthGrid;

const DIAMETER: usize = 5;
const VALUE_SCALE: f64 = 255.0;

/// Filter parameters derived from a 0-100 smoothing strength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingKernel {
    pub sigma: f64,
    pub radius: usize,
}

impl SmoothingKernel {
    /// Returns `None` when `strength_percent` maps to no smoothing at all.
    pub fn from_strength(strength_percent: f32) -> Option<Self> {
        let smoothing_radius = f64::from(strength_percent) / 10.0;
        if smoothing_radius.is_nan() || smoothing_radius <= 0.0 {
            return None;
        }
        Some(Self {
            sigma: (smoothing_radius * 10.0).max(1.0),
            radius: DIAMETER / 2,
        })
    }
}

/// Applies edge-aware smoothing at `strength_percent` (0-100).
///
/// Strength at or below zero hands the grid back untouched.
pub fn smooth(grid: DepthGrid, strength_percent: f32) -> DepthGrid {
    match SmoothingKernel::from_strength(strength_percent) {
        Some(kernel) => filter(&grid, kernel),
        None => grid,
    }
}

fn filter(grid: &DepthGrid, kernel: SmoothingKernel) -> DepthGrid {
    let width = grid.width();
    let height = grid.height();
    let radius = kernel.radius as isize;
    let two_sigma_sq = 2.0 * kernel.sigma * kernel.sigma;

    debug!(
        "Edge-aware smoothing {}x{} with sigma {:.3}",
        width, height, kernel.sigma
    );

    let mut data = vec![0.0f64; width * height];
    data.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            let center = grid.get(x, y) * VALUE_SCALE;
            let mut weight_sum = 0.0;
            let mut value_sum = 0.0;

            for dy in -radius..=radius {
                let yy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                let spatial_y = (dy * dy) as f64;

                for dx in -radius..=radius {
                    let xx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                    let spatial = (-(spatial_y + (dx * dx) as f64) / two_sigma_sq).exp();

                    let neighbor = grid.get(xx, yy) * VALUE_SCALE;
                    let diff = neighbor - center;
                    let range = (-(diff * diff) / two_sigma_sq).exp();

                    let weight = spatial * range;
                    weight_sum += weight;
                    value_sum += neighbor * weight;
                }
            }

            *out = if weight_sum > 0.0 {
                (value_sum / weight_sum) / VALUE_SCALE
            } else {
                grid.get(x, y)
            };
        }
    });

    grid.same_shape(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn step_grid() -> DepthGrid {
        let data = (0..64).map(|i| if i % 8 < 4 { 0.1 } else { 0.9 }).collect();
        DepthGrid::new(8, 8, data).unwrap()
    }

    #[test]
    fn test_zero_strength_is_noop() {
        let grid = step_grid();
        assert_eq!(smooth(grid.clone(), 0.0), grid);
        assert_eq!(smooth(grid.clone(), -5.0), grid);
        assert_eq!(smooth(grid.clone(), f32::NAN), grid);
    }

    #[test]
    fn test_kernel_from_strength() {
        assert_eq!(SmoothingKernel::from_strength(0.0), None);
        let kernel = SmoothingKernel::from_strength(50.0).unwrap();
        assert_eq!(kernel.radius, 2);
        assert_abs_diff_eq!(kernel.sigma, 50.0, epsilon = 1e-9);
        // Tiny strengths still get a usable sigma
        let kernel = SmoothingKernel::from_strength(0.01).unwrap();
        assert_eq!(kernel.sigma, 1.0);
    }

    #[test]
    fn test_flat_grid_is_unchanged() {
        let grid = DepthGrid::filled(6, 4, 0.4).unwrap();
        let smoothed = smooth(grid, 100.0);
        for &v in smoothed.as_slice() {
            assert_abs_diff_eq!(v, 0.4, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_step_edge_is_preserved() {
        // 0.8 * 255 = 204 apart: the range weight all but removes cross-edge neighbours
        let smoothed = smooth(step_grid(), 10.0);
        assert_abs_diff_eq!(smoothed.get(3, 4), 0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(smoothed.get(4, 4), 0.9, epsilon = 1e-6);
    }

    #[test]
    fn test_output_stays_within_input_range() {
        let data = (0..30).map(|i| ((i * 7) % 11) as f64 / 10.0).collect();
        let grid = DepthGrid::new(6, 5, data).unwrap();
        let smoothed = smooth(grid, 100.0);
        assert!(
            smoothed
                .as_slice()
                .iter()
                .all(|&v| (-1e-12..=1.0 + 1e-12).contains(&v))
        );
    }
}

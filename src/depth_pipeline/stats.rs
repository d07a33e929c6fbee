//! Summary statistics for depth diagnostics

use tracing::debug;

use crate::depth_pipeline::common::DepthGrid;

/// Statistics over the finite samples of a buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation; zero with fewer than two finite samples
    pub std_dev: f64,
    pub finite_count: usize,
    pub total_count: usize,
}

impl GridStats {
    /// NaN and infinite samples are skipped. With no finite samples every
    /// statistic is zero.
    pub fn of(values: &[f64]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;

        for &v in values.iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }

        if count == 0 {
            return Self {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                std_dev: 0.0,
                finite_count: 0,
                total_count: values.len(),
            };
        }

        let mean = sum / count as f64;
        let std_dev = if count > 1 {
            let squares: f64 = values
                .iter()
                .filter(|v| v.is_finite())
                .map(|&v| (v - mean) * (v - mean))
                .sum();
            (squares / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        Self {
            min,
            max,
            mean,
            std_dev,
            finite_count: count,
            total_count: values.len(),
        }
    }

    pub fn non_finite_count(&self) -> usize {
        self.total_count - self.finite_count
    }
}

/// Logs the statistics of `grid` under `name` at debug level.
pub fn log_stats(name: &str, grid: &DepthGrid) -> GridStats {
    let stats = GridStats::of(grid.as_slice());
    debug!(
        "{} ({}x{}): min={:.4}, max={:.4}, mean={:.4}, std={:.4}, non-finite={}",
        name,
        grid.width(),
        grid.height(),
        stats.min,
        stats.max,
        stats.mean,
        stats.std_dev,
        stats.non_finite_count()
    );
    stats
}

//! Min/max normalisation of depth samples
//!
//! The scan and the division always run in `f64`, also for `f32` buffers, so that
//! repeated normalise/resize cycles do not accumulate single-precision error.

use tracing::debug;

use crate::depth_pipeline::common::DepthGrid;

/// Floating-point sample type that can be normalised in place.
pub trait Sample: Copy {
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

impl Sample for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}

impl Sample for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

/// What a normalisation pass did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizeOutcome {
    /// Finite samples were rescaled from `[min, max]` onto `[0, 1]`.
    Scaled { min: f64, max: f64 },
    /// Every finite sample had the same value; samples were shifted to 0, not divided.
    Flat { value: f64 },
    /// No finite samples; everything was set to 0.
    Empty,
}

/// Normalises a depth grid onto `[0, 1]` in place. Non-finite samples become 0.
pub fn normalize_min_max(grid: &mut DepthGrid) -> NormalizeOutcome {
    normalize_slice(grid.as_mut_slice())
}

/// Normalises a flat buffer onto `[0, 1]` in place. Non-finite samples become 0.
pub fn normalize_slice<T: Sample>(values: &mut [T]) -> NormalizeOutcome {
    let mut min = f64::MAX;
    let mut max = -f64::MAX;
    let mut finite = 0usize;

    for v in values.iter().map(|v| v.to_f64()).filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
        finite += 1;
    }

    if finite == 0 {
        debug!("Normalisation found no finite samples, zeroing {} values", values.len());
        values.iter_mut().for_each(|v| *v = T::from_f64(0.0));
        return NormalizeOutcome::Empty;
    }

    let range = max - min;
    if range > 0.0 {
        for v in values.iter_mut() {
            let value = v.to_f64();
            *v = if value.is_finite() {
                T::from_f64((value - min) / range)
            } else {
                T::from_f64(0.0)
            };
        }
        NormalizeOutcome::Scaled { min, max }
    } else {
        debug!("Normalisation range is zero (value {}), skipping division", min);
        for v in values.iter_mut() {
            let value = v.to_f64();
            *v = if value.is_finite() {
                T::from_f64(value - min)
            } else {
                T::from_f64(0.0)
            };
        }
        NormalizeOutcome::Flat { value: min }
    }
}

//! Slicing heights along the vertical axis.

use crate::errors::SliceError;
use crate::float_types::{EPSILON, Real};

/// Upper bound on the number of heights a step size may produce for one mesh
pub const MAX_HEIGHTS: usize = 100_000;

/// How heights are spread between the top and bottom of a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingStrategy {
    /// Exactly `n` evenly spaced heights, top and bottom included.
    Count(usize),
    /// Heights every `step` units starting at the top, down to the bottom.
    Step(Real),
}

impl SamplingStrategy {
    /// Heights for the range `[z_min, z_max]`, ordered from `z_max` downwards.
    pub fn heights(&self, z_min: Real, z_max: Real) -> Result<Vec<Real>, SliceError> {
        match *self {
            SamplingStrategy::Count(n) => Ok(sample_heights(z_min, z_max, n)),
            SamplingStrategy::Step(step) => step_heights(z_min, z_max, step),
        }
    }
}

/// `n` evenly spaced heights from `z_max` down to `z_min`, both inclusive.
///
/// `n == 1` gives `[z_max]` and `n == 0` gives nothing.
///
/// ```
/// # use ctslice::heights::sample_heights;
/// assert_eq!(sample_heights(0.0, 1.0, 3), vec![1.0, 0.5, 0.0]);
/// assert_eq!(sample_heights(0.0, 1.0, 1), vec![1.0]);
/// ```
pub fn sample_heights(z_min: Real, z_max: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![z_max],
        _ => {
            let last = (n - 1) as Real;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        // pin the endpoint so rounding never leaves it above z_min
                        z_min
                    } else {
                        z_max + (z_min - z_max) * (i as Real / last)
                    }
                })
                .collect()
        },
    }
}

/// Heights `z_max, z_max - step, ...` while they stay at or above `z_min`.
///
/// A non-positive or non-finite step yields `[z_max]`. A step so small that the range
/// would need more than [`MAX_HEIGHTS`] heights is refused with
/// [`SliceError::TooManyHeights`].
pub fn step_heights(z_min: Real, z_max: Real, step: Real) -> Result<Vec<Real>, SliceError> {
    if !(step.is_finite() && step > 0.0) {
        return Ok(vec![z_max]);
    }
    let span = (z_max - z_min).max(0.0);
    // tolerate rounding so an exact multiple still reaches z_min
    let count = (span / step + EPSILON).floor() + 1.0;
    if count.is_nan() || count > MAX_HEIGHTS as Real {
        return Err(SliceError::TooManyHeights {
            step,
            span,
            limit: MAX_HEIGHTS,
        });
    }
    Ok((0..count as usize).map(|i| z_max - step * i as Real).collect())
}

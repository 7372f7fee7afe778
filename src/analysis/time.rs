//! This module provides the time-domain RMSSD (Root Mean Square of Successive Differences)
//! reduction, generic over the floating-point width of the samples.
//!
//! The reduction runs in four steps, all at the width of the samples:
//!
//! 1. successive differences `x[i+1] - x[i]`
//! 2. squares of the differences, in place
//! 3. a strictly left-to-right running sum of the squares
//! 4. division by the number of differences followed by the square root of that width
//!
//! The order of operations is fixed so that results at different widths differ only by their
//! rounding behaviour.
//!
//! # Example
//!
//! ```rust
//! use hrv_rmssd::analysis::time::calc_rmssd;
//!
//! let rmssd = calc_rmssd(&[1.0f64, 2.0, 4.0]).unwrap();
//! assert_eq!(rmssd, 2.5f64.sqrt());
//! ```

use log::trace;
use nalgebra::DVector;

use crate::error::Result;
use crate::precision::Precision;
use crate::preprocessing::validation::ValidatedSamples;

/// Successive differences of `data`, `data[i + 1] - data[i]`.
///
/// The result has one element less than `data`, and is empty for fewer than two samples.
pub fn successive_differences<P: Precision>(data: &[P]) -> DVector<P> {
    DVector::from_fn(data.len().saturating_sub(1), |i, _| data[i + 1].minus(data[i]))
}

/// Calculates the RMSSD of a validated sample sequence.
///
/// The sum of squares is accumulated strictly in sequence order. `DVector::dot` is not used
/// because its unrolled accumulation changes the summation order.
pub fn rmssd<P: Precision>(samples: &ValidatedSamples<'_, P>) -> P {
    let mut successive_diffs = successive_differences(samples.as_slice());
    trace!(
        "Calculating {} RMSSD with successive differences: {:?}",
        P::WIDTH,
        successive_diffs.as_slice()
    );

    successive_diffs.apply(|diff| *diff = diff.times(*diff));
    let sum = successive_diffs
        .iter()
        .fold(P::zero(), |sum, &square| sum.plus(square));
    let mean = sum.divided_by(P::from_count(samples.difference_count()));
    mean.square_root()
}

/// Calculates the Root Mean Square of Successive Differences (RMSSD) from a slice of RR intervals.
///
/// # Arguments
///
/// * `data` - RR intervals in measurement order, at any supported width.
///
/// # Returns
///
/// * `Result<P>` - The RMSSD at the width of `data`.
///
/// # Errors
///
/// Returns [`RmssdError::InsufficientData`](crate::error::RmssdError::InsufficientData) if `data`
/// contains fewer than two elements.
pub fn calc_rmssd<P: Precision>(data: &[P]) -> Result<P> {
    let samples = ValidatedSamples::new(data)?;
    Ok(rmssd(&samples))
}

//! The full RMSSD pipeline: ingestion, validation and reduction at one floating-point width.
//!
//! [`compute_rmssd_as`] runs the pipeline for a width chosen at compile time. [`compute_rmssd`]
//! takes the width as a runtime [`Width`] tag and dispatches once to the matching
//! monomorphized pipeline.
//!
//! # Example
//!
//! ```rust
//! use hrv_rmssd::{compute_rmssd, RoundingPolicy, Rmssd, Width};
//!
//! let rmssd = compute_rmssd(&["1.0", "2.0", "4.0"], Width::Standard, RoundingPolicy::None).unwrap();
//! assert_eq!(rmssd, Rmssd::Standard(2.5f64.sqrt()));
//! ```

use log::debug;
use twofloat::TwoFloat;

use crate::analysis::time::rmssd;
use crate::error::Result;
use crate::precision::{Precision, Rmssd, Width};
use crate::preprocessing::ingest::{parse_samples, RoundingPolicy};
use crate::preprocessing::validation::ValidatedSamples;

/// Computes the RMSSD of `tokens` at the width of `P`.
///
/// The sample sequence is parsed fresh for this call and dropped once the result is known.
///
/// # Errors
///
/// - [`RmssdError::Parse`](crate::error::RmssdError::Parse) for the first token that is not a
///   decimal in the range of `P`.
/// - [`RmssdError::InsufficientData`](crate::error::RmssdError::InsufficientData) when fewer than
///   two tokens are supplied.
pub fn compute_rmssd_as<P: Precision, S: AsRef<str>>(
    tokens: &[S],
    rounding: RoundingPolicy,
) -> Result<P> {
    debug!(
        "Computing {}-bit RMSSD over {} samples, rounding {:?}",
        P::WIDTH.bits(),
        tokens.len(),
        rounding
    );
    let samples = parse_samples::<P, S>(tokens, rounding)?;
    let samples = ValidatedSamples::new(&samples)?;
    Ok(rmssd(&samples))
}

/// Computes the RMSSD of `tokens` at the runtime-selected `width`.
pub fn compute_rmssd<S: AsRef<str>>(
    tokens: &[S],
    width: Width,
    rounding: RoundingPolicy,
) -> Result<Rmssd> {
    match width {
        Width::Narrow => compute_rmssd_as::<f32, S>(tokens, rounding).map(Rmssd::Narrow),
        Width::Standard => compute_rmssd_as::<f64, S>(tokens, rounding).map(Rmssd::Standard),
        Width::Extended => compute_rmssd_as::<TwoFloat, S>(tokens, rounding).map(Rmssd::Extended),
    }
}

//! Validation gate between ingestion and the RMSSD reducer.
//!
//! [`ValidatedSamples`] can only be constructed through [`ValidatedSamples::new`], and the reducer
//! only accepts that type, so a sequence that is too short never reaches the reduction.

use crate::error::{Result, RmssdError};
use crate::precision::Precision;

/// Minimum number of samples needed to form one successive difference.
pub const MIN_SAMPLES: usize = 2;

/// A borrowed sample sequence known to hold at least [`MIN_SAMPLES`] values.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedSamples<'a, P> {
    samples: &'a [P],
}

impl<'a, P: Precision> ValidatedSamples<'a, P> {
    /// Checks the sample count and passes the sequence through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RmssdError::InsufficientData`] when `samples` has fewer than two elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use hrv_rmssd::preprocessing::validation::ValidatedSamples;
    ///
    /// assert!(ValidatedSamples::new(&[0.8f64, 0.9]).is_ok());
    /// assert!(ValidatedSamples::new(&[0.8f64]).is_err());
    /// ```
    pub fn new(samples: &'a [P]) -> Result<Self> {
        if samples.len() < MIN_SAMPLES {
            return Err(RmssdError::InsufficientData {
                required: MIN_SAMPLES,
                actual: samples.len(),
            });
        }
        Ok(Self { samples })
    }

    pub fn as_slice(&self) -> &'a [P] {
        self.samples
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Number of successive differences, always at least one.
    pub fn difference_count(&self) -> usize {
        self.samples.len() - 1
    }
}

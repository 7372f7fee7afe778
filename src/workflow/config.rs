//! Run plan configuration.
//!
//! A [`RunPlan`] lists the [`Evaluation`]s to perform, in output order, together with the data file
//! and the number of decimal places shown per result. Plans are loaded from YAML; every field is
//! optional and falls back to [`RunPlan::default`], which evaluates every width unrounded and
//! then rounded to [`DEFAULT_ROUND_TO`] places.
//!
//! ```yaml
//! data_file: rr.txt
//! display_places: 20
//! evaluations:
//!   - width: narrow
//!   - width: extended
//!     round_to: 4
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::precision::{Width, DEFAULT_DISPLAY_PLACES};
use crate::preprocessing::ingest::RoundingPolicy;

/// Decimal places used by the rounded half of the default plan.
pub const DEFAULT_ROUND_TO: u32 = 3;

/// One RMSSD computation: a width and an optional number of decimal places to round samples to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub width: Width,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_to: Option<u32>,
}

impl Evaluation {
    pub fn new(width: Width, round_to: Option<u32>) -> Self {
        Self { width, round_to }
    }

    pub fn rounding(&self) -> RoundingPolicy {
        RoundingPolicy::from(self.round_to)
    }

    /// Heading printed above the result, e.g. `double (rounded to 3 decimal places)`.
    pub fn label(&self) -> String {
        match self.round_to {
            None => self.width.label().to_string(),
            Some(places) => format!(
                "{} (rounded to {} decimal places)",
                self.width.label(),
                places
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunPlan {
    /// Text file with one RR interval per line.
    pub data_file: Option<PathBuf>,
    /// Decimal places shown for each result.
    pub display_places: usize,
    /// Computations to run, in output order.
    pub evaluations: Vec<Evaluation>,
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            data_file: None,
            display_places: DEFAULT_DISPLAY_PLACES,
            evaluations: Self::default_evaluations(),
        }
    }
}

impl RunPlan {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading run plan {}", path_ref.display()))?;
        let plan: RunPlan = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing run plan {}", path_ref.display()))?;
        ensure!(
            !plan.evaluations.is_empty(),
            "run plan {} lists no evaluations",
            path_ref.display()
        );
        Ok(plan)
    }

    /// A plan evaluating each of `widths` in order with the same rounding.
    pub fn from_widths(widths: &[Width], round_to: Option<u32>) -> Self {
        Self {
            evaluations: widths
                .iter()
                .map(|&width| Evaluation::new(width, round_to))
                .collect(),
            ..Self::default()
        }
    }

    /// Every width unrounded, then every width rounded to [`DEFAULT_ROUND_TO`] places.
    pub fn default_evaluations() -> Vec<Evaluation> {
        let unrounded = Width::ALL.iter().map(|&width| Evaluation::new(width, None));
        let rounded = Width::ALL
            .iter()
            .map(|&width| Evaluation::new(width, Some(DEFAULT_ROUND_TO)));
        unrounded.chain(rounded).collect()
    }

    pub fn with_data_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_file = Some(path.into());
        self
    }
}

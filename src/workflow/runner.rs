//! Sequential evaluation of a [`RunPlan`].
//!
//! The [`Runner`] reads the sample tokens once and then evaluates each plan entry in order, each
//! to completion before the next starts. Failures are kept per entry.

use anyhow::Context;
use log::{debug, warn};

use crate::error::RmssdError;
use crate::pipeline::compute_rmssd;
use crate::precision::Rmssd;
use crate::source::SampleSource;
use crate::workflow::config::{Evaluation, RunPlan};

/// Result of one plan entry. A failed entry does not stop the entries after it.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationOutcome {
    pub evaluation: Evaluation,
    pub result: Result<Rmssd, RmssdError>,
}

#[derive(Clone, Debug)]
pub struct Runner {
    plan: RunPlan,
}

impl Runner {
    pub fn new(plan: RunPlan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &RunPlan {
        &self.plan
    }

    /// Evaluates every plan entry against `tokens`.
    ///
    /// Entries run one after another in plan order, each to completion, and the outcomes are
    /// returned in that same order.
    pub fn run<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<EvaluationOutcome> {
        let mut outcomes = Vec::with_capacity(self.plan.evaluations.len());
        for evaluation in &self.plan.evaluations {
            let result = compute_rmssd(tokens, evaluation.width, evaluation.rounding());
            match &result {
                Ok(rmssd) => debug!("{} -> {:.20}", evaluation.label(), rmssd),
                Err(err) => warn!("{} failed: {}", evaluation.label(), err),
            }
            outcomes.push(EvaluationOutcome {
                evaluation: *evaluation,
                result,
            });
        }
        outcomes
    }

    /// Reads the tokens once from `source` and evaluates the plan against them.
    pub fn run_source(&self, source: &dyn SampleSource) -> anyhow::Result<Vec<EvaluationOutcome>> {
        let tokens = source
            .read_tokens()
            .context("reading RR interval samples")?;
        Ok(self.run(&tokens))
    }
}

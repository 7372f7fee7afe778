//! Run plans: which widths and rounding policies to evaluate, and in which order.
//!
//! - `config`: the YAML-loadable [`RunPlan`].
//! - `runner`: the [`Runner`] that evaluates a plan sequentially against one set of samples.
pub mod config;
pub mod runner;

pub use config::{Evaluation, RunPlan};
pub use runner::{EvaluationOutcome, Runner};

//! This module contains the preprocessing stages that run before the RMSSD reduction.
//!
//! The `decimal` submodule scans sample tokens into lexically valid decimals.
//! The `ingest` submodule parses and optionally rounds samples at a chosen width.
//! The `validation` submodule rejects sequences too short to reduce.
pub mod decimal;
pub mod ingest;
pub mod validation;

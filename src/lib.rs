//! HRV (Heart Rate Variability) RMSSD at several floating-point widths
//!
//! This crate calculates the Root Mean Square of Successive Differences (RMSSD) of RR intervals at
//! single (`f32`), double (`f64`) and double-double ([`TwoFloat`]) precision, so the sensitivity of
//! the statistic to numeric precision can be compared. Each computation parses, rounds, reduces and
//! takes the square root entirely in the width it was started at.
//!
//! # Example
//!
//! ```rust
//! use hrv_rmssd::{compute_rmssd, RoundingPolicy, Width};
//!
//! let intervals = ["0.812", "0.790", "0.805", "0.831"];
//! for width in Width::ALL {
//!     let rmssd = compute_rmssd(&intervals, width, RoundingPolicy::None).unwrap();
//!     println!("{}-bit: {:.20}", width.bits(), rmssd);
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod pipeline;
pub mod precision;
pub mod preprocessing;
pub mod source;
pub mod workflow;

pub use error::{ParseFailure, RmssdError};
pub use pipeline::{compute_rmssd, compute_rmssd_as};
pub use precision::{Precision, Rmssd, Width};
pub use preprocessing::ingest::RoundingPolicy;
pub use twofloat::TwoFloat;

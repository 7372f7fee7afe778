//! Sample ingestion: decimal tokens to a sequence of values of one floating-point width.
//!
//! Every token is scanned, parsed at the target width and, when a [`RoundingPolicy`] asks for it,
//! rounded to a fixed number of decimal places. Rounding uses the arithmetic of the target width;
//! a value parsed as `f32` is never rounded through `f64`.
//!
//! # Example
//!
//! ```rust
//! use hrv_rmssd::preprocessing::ingest::{parse_samples, RoundingPolicy};
//!
//! let samples = parse_samples::<f64, _>(&["0.8123", "0.7998"], RoundingPolicy::Places(2)).unwrap();
//! assert_eq!(samples, vec![0.81, 0.80]);
//! ```

use crate::error::{ParseFailure, Result, RmssdError};
use crate::precision::Precision;
use crate::preprocessing::decimal::Decimal;

/// How samples are rounded right after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingPolicy {
    /// Keep the parsed value.
    #[default]
    None,
    /// Round to this many decimal places, half-way cases away from zero.
    Places(u32),
}

impl RoundingPolicy {
    /// Number of decimal places to round to, if any.
    pub fn places(&self) -> Option<u32> {
        match self {
            RoundingPolicy::None => None,
            RoundingPolicy::Places(places) => Some(*places),
        }
    }

    /// Applies the policy to a single value.
    pub fn apply<P: Precision>(&self, value: P) -> P {
        match self {
            RoundingPolicy::None => value,
            RoundingPolicy::Places(places) => round_to_places(value, *places),
        }
    }
}

impl From<Option<u32>> for RoundingPolicy {
    fn from(places: Option<u32>) -> Self {
        places.map_or(RoundingPolicy::None, RoundingPolicy::Places)
    }
}

/// Rounds `value` to `places` decimal places in the width of `P`.
///
/// The value is scaled by `10^places`, rounded half away from zero and scaled back. When the
/// scale factor or the scaled value overflows, the width has no digit left at that decimal
/// place and the value is returned unchanged.
pub fn round_to_places<P: Precision>(value: P, places: u32) -> P {
    let multiplier = P::power_of_ten(places);
    let scaled = value.times(multiplier);
    if !multiplier.is_finite() || !scaled.is_finite() {
        return value;
    }
    scaled.round_half_away().divided_by(multiplier)
}

/// Parses one sample token at the width of `P`.
///
/// Surrounding whitespace is ignored. `position` is only used to describe the token in errors.
pub fn parse_sample<P: Precision>(token: &str, position: usize) -> Result<P> {
    let error = |kind| RmssdError::Parse {
        token: token.to_string(),
        position,
        width: P::WIDTH,
        kind,
    };
    let decimal = Decimal::scan(token.trim()).ok_or_else(|| error(ParseFailure::Malformed))?;
    P::from_decimal(&decimal).ok_or_else(|| error(ParseFailure::OutOfRange))
}

/// Parses a sequence of sample tokens at the width of `P` and applies `rounding` to each value.
///
/// Parsing stops at the first invalid token; no partial sequence is returned.
pub fn parse_samples<P: Precision, S: AsRef<str>>(
    tokens: &[S],
    rounding: RoundingPolicy,
) -> Result<Vec<P>> {
    tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            parse_sample::<P>(token.as_ref(), position).map(|value| rounding.apply(value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision::Width;
    use rand::{Rng, SeedableRng};
    use twofloat::TwoFloat;

    #[test]
    fn test_parse_samples_keeps_order() {
        let samples = parse_samples::<f64, _>(&["3.0", "1.0", "2.0"], RoundingPolicy::None).unwrap();
        assert_eq!(samples, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_parse_samples_trims_whitespace() {
        let samples =
            parse_samples::<f32, _>(&[" 0.5", "0.25\r", "\t1"], RoundingPolicy::None).unwrap();
        assert_eq!(samples, vec![0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_parse_samples_malformed_token() {
        let err = parse_samples::<f64, _>(&["1.0", "abc", "2.0"], RoundingPolicy::None).unwrap_err();
        assert_eq!(
            err,
            RmssdError::Parse {
                token: "abc".to_string(),
                position: 1,
                width: Width::Standard,
                kind: ParseFailure::Malformed,
            }
        );
    }

    #[test]
    fn test_parse_samples_reports_first_error() {
        let err = parse_samples::<f32, _>(&["x", "y"], RoundingPolicy::None).unwrap_err();
        match err {
            RmssdError::Parse { token, position, .. } => {
                assert_eq!(token, "x");
                assert_eq!(position, 0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_samples_out_of_range_depends_on_width() {
        let tokens = ["1.0", "1e39"];
        let err = parse_samples::<f32, _>(&tokens, RoundingPolicy::None).unwrap_err();
        assert!(matches!(
            err,
            RmssdError::Parse {
                kind: ParseFailure::OutOfRange,
                width: Width::Narrow,
                position: 1,
                ..
            }
        ));
        assert!(parse_samples::<f64, _>(&tokens, RoundingPolicy::None).is_ok());
        assert!(parse_samples::<TwoFloat, _>(&tokens, RoundingPolicy::None).is_ok());
    }

    #[test]
    fn test_parse_samples_underflow_is_out_of_range() {
        let cases = [
            (Width::Narrow, "1e-50"),
            (Width::Standard, "1e-400"),
            (Width::Extended, "-1e-400"),
        ];
        for (width, token) in cases {
            let tokens = ["0.8", token];
            let result = match width {
                Width::Narrow => parse_samples::<f32, _>(&tokens, RoundingPolicy::None).map(drop),
                Width::Standard => parse_samples::<f64, _>(&tokens, RoundingPolicy::None).map(drop),
                Width::Extended => {
                    parse_samples::<TwoFloat, _>(&tokens, RoundingPolicy::None).map(drop)
                }
            };
            assert_eq!(
                result,
                Err(RmssdError::Parse {
                    token: token.to_string(),
                    position: 1,
                    width,
                    kind: ParseFailure::OutOfRange,
                })
            );
        }
        // an explicit zero is in range at every width
        assert_eq!(
            parse_samples::<f32, _>(&["0e-50"], RoundingPolicy::None).unwrap(),
            vec![0.0]
        );
        assert!(parse_samples::<f64, _>(&["1e-50"], RoundingPolicy::None).is_ok());
    }

    #[test]
    fn test_parse_samples_rejects_non_finite_literals() {
        for token in ["inf", "-infinity", "NaN"] {
            let err = parse_samples::<f64, _>(&[token], RoundingPolicy::None).unwrap_err();
            assert!(matches!(
                err,
                RmssdError::Parse {
                    kind: ParseFailure::Malformed,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_parse_samples_empty_token_is_malformed() {
        let err = parse_samples::<f64, _>(&["1.0", "", "2.0"], RoundingPolicy::None).unwrap_err();
        assert!(matches!(
            err,
            RmssdError::Parse {
                kind: ParseFailure::Malformed,
                position: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_round_to_three_places() {
        let rounding = RoundingPolicy::Places(3);
        let standard = parse_samples::<f64, _>(&["1.23456"], rounding).unwrap();
        assert_eq!(standard, vec![1.235]);
        let narrow = parse_samples::<f32, _>(&["1.23456"], rounding).unwrap();
        assert_eq!(narrow, vec![1.235f32]);
        let extended = parse_samples::<TwoFloat, _>(&["1.23456"], rounding).unwrap();
        assert_eq!(
            extended,
            vec![TwoFloat::from(1235.0).divided_by(TwoFloat::from(1000.0))]
        );
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_places(0.25f64, 1), 0.3);
        assert_eq!(round_to_places(-0.25f64, 1), -0.3);
        assert_eq!(round_to_places(0.5f32, 0), 1.0);
        assert_eq!(round_to_places(-0.5f32, 0), -1.0);
        assert_eq!(
            round_to_places(TwoFloat::from(0.25), 1),
            TwoFloat::from(3.0).divided_by(TwoFloat::from(10.0))
        );
    }

    #[test]
    fn test_extended_rounding_keeps_low_word() {
        let rounded = parse_samples::<TwoFloat, _>(&["0.1234"], RoundingPolicy::Places(1)).unwrap();
        let residual = rounded[0]
            .times(TwoFloat::from(10.0))
            .minus(TwoFloat::from(1.0));
        assert!(residual.hi().abs() < 1e-30);
    }

    #[test]
    fn test_rounding_none_passes_through() {
        let samples = parse_samples::<f64, _>(&["1.23456"], RoundingPolicy::None).unwrap();
        assert_eq!(samples, vec![1.23456]);
        assert_eq!(RoundingPolicy::from(None), RoundingPolicy::None);
        assert_eq!(RoundingPolicy::from(Some(3)).places(), Some(3));
    }

    #[test]
    fn test_rounding_large_places_leaves_value_unchanged() {
        // 10^39 overflows f32, 10^400 overflows f64 and double-double
        assert_eq!(round_to_places(1.5f32, 39), 1.5);
        assert_eq!(round_to_places(1.5f64, 400), 1.5);
        assert_eq!(round_to_places(TwoFloat::from(1.5), 400), TwoFloat::from(1.5));
        // scale factor is finite, scaled value is not
        assert_eq!(round_to_places(1e10f64, 300), 1e10);
        assert_eq!(round_to_places(3.0e30f32, 10), 3.0e30);
    }

    #[test]
    fn test_rounding_many_places_within_range() {
        // all of these places are finer than the resolution of the value
        let value = 0.812345678901234f64;
        let rounded = round_to_places(value, 20);
        assert!((rounded - value).abs() <= f64::EPSILON);
        let value = 0.8123f32;
        let rounded = round_to_places(value, 15);
        assert!((rounded - value).abs() <= f32::EPSILON);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let value: f64 = rng.gen_range(300.0..1500.0);
            let once = round_to_places(value, 3);
            assert_eq!(round_to_places(once, 3), once);

            let narrow = value as f32;
            let once = round_to_places(narrow, 3);
            assert_eq!(round_to_places(once, 3), once);

            let extended = TwoFloat::from(value);
            let once = round_to_places(extended, 3);
            assert_eq!(round_to_places(once, 3), once);
        }
    }
}

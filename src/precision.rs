//! Floating-point widths the RMSSD pipeline can run at.
//!
//! The pipeline is generic over the [`Precision`] trait, which is implemented once per supported width:
//!
//! - [`Width::Narrow`]: `f32`
//! - [`Width::Standard`]: `f64`
//! - [`Width::Extended`]: [`TwoFloat`], a double-double value with roughly 106 significand bits
//!
//! Each implementation carries its own parse, rounding and square root operations, so a computation
//! started at one width never passes through the arithmetic of another width.
//!
//! # Example
//!
//! ```rust
//! use hrv_rmssd::precision::{Precision, Width};
//!
//! assert_eq!(<f32 as Precision>::WIDTH, Width::Narrow);
//! assert_eq!(Width::Standard.bits(), 64);
//! assert_eq!("extended".parse::<Width>().unwrap(), Width::Extended);
//! ```

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use twofloat::TwoFloat;

use crate::preprocessing::decimal::Decimal;

/// Number of decimal places used when a result is displayed without an explicit precision.
pub const DEFAULT_DISPLAY_PLACES: usize = 80;

/// Runtime tag for the floating-point width of a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    /// Single precision (`f32`).
    Narrow,
    /// Double precision (`f64`).
    Standard,
    /// Double-double precision ([`TwoFloat`]).
    Extended,
}

impl Width {
    /// All widths, narrowest first.
    pub const ALL: [Width; 3] = [Width::Narrow, Width::Standard, Width::Extended];

    /// Storage size of one value of this width in bits.
    pub fn bits(self) -> u32 {
        match self {
            Width::Narrow => 32,
            Width::Standard => 64,
            Width::Extended => 128,
        }
    }

    /// Human readable name of the numeric type behind this width.
    pub fn label(self) -> &'static str {
        match self {
            Width::Narrow => "float",
            Width::Standard => "double",
            Width::Extended => "double-double",
        }
    }
}

impl Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string does not name a [`Width`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown width {0:?}, expected narrow, standard or extended")]
pub struct UnknownWidth(pub String);

impl FromStr for Width {
    type Err = UnknownWidth;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "narrow" | "single" | "float" | "f32" => Ok(Width::Narrow),
            "standard" | "double" | "f64" => Ok(Width::Standard),
            "extended" | "double-double" | "twofloat" => Ok(Width::Extended),
            _ => Err(UnknownWidth(s.to_string())),
        }
    }
}

/// Arithmetic required by the RMSSD pipeline, implemented once per floating-point width.
///
/// Implementors must perform every operation in their own width; none of them may convert to a
/// different floating-point type and back. Generic pipeline code only calls these methods, never
/// the operator traits of the underlying type.
pub trait Precision: Copy + Debug + PartialEq + 'static {
    /// The runtime tag of this width.
    const WIDTH: Width;

    fn zero() -> Self;

    fn one() -> Self;

    fn ten() -> Self;

    /// Converts an element count into this width.
    fn from_count(count: usize) -> Self;

    /// Converts a lexically valid decimal into this width.
    ///
    /// Returns `None` when the value lies outside the range of the width: it overflows to an
    /// infinity, or a nonzero decimal underflows to zero.
    fn from_decimal(decimal: &Decimal<'_>) -> Option<Self>;

    fn plus(self, rhs: Self) -> Self;

    fn minus(self, rhs: Self) -> Self;

    fn times(self, rhs: Self) -> Self;

    fn divided_by(self, rhs: Self) -> Self;

    /// Rounds to the nearest integer, with half-way cases rounded away from zero.
    fn round_half_away(self) -> Self;

    fn square_root(self) -> Self;

    fn is_finite(self) -> bool;

    /// Formats the value in fixed notation with `places` digits after the decimal point.
    fn to_decimal_string(self, places: usize) -> String;

    /// Nearest `f64` to the value. Only meant for reporting and comparisons outside the pipeline.
    fn to_f64_lossy(self) -> f64;

    /// `10^exponent`, computed by repeated multiplication in this width.
    ///
    /// Stops early once the power overflows, so the result is then an infinity.
    fn power_of_ten(exponent: u32) -> Self {
        let ten = Self::ten();
        let mut power = Self::one();
        for _ in 0..exponent {
            power = power.times(ten);
            if !power.is_finite() {
                break;
            }
        }
        power
    }
}

macro_rules! impl_native_precision {
    ($float:ty, $width:expr) => {
        impl Precision for $float {
            const WIDTH: Width = $width;

            fn zero() -> Self {
                0.0
            }

            fn one() -> Self {
                1.0
            }

            fn ten() -> Self {
                10.0
            }

            fn from_count(count: usize) -> Self {
                count as $float
            }

            fn from_decimal(decimal: &Decimal<'_>) -> Option<Self> {
                let value = decimal.text().parse::<$float>().ok()?;
                let underflow = value == 0.0 && decimal.has_nonzero_digit();
                if !value.is_finite() || underflow {
                    return None;
                }
                Some(value)
            }

            fn plus(self, rhs: Self) -> Self {
                self + rhs
            }

            fn minus(self, rhs: Self) -> Self {
                self - rhs
            }

            fn times(self, rhs: Self) -> Self {
                self * rhs
            }

            fn divided_by(self, rhs: Self) -> Self {
                self / rhs
            }

            fn round_half_away(self) -> Self {
                self.round()
            }

            fn square_root(self) -> Self {
                self.sqrt()
            }

            fn is_finite(self) -> bool {
                <$float>::is_finite(self)
            }

            fn to_decimal_string(self, places: usize) -> String {
                format!("{:.*}", places, self)
            }

            fn to_f64_lossy(self) -> f64 {
                f64::from(self)
            }
        }
    };
}

impl_native_precision!(f32, Width::Narrow);
impl_native_precision!(f64, Width::Standard);

/// Decimal digits beyond this count cannot change a double-double value and are dropped while
/// parsing, with the decimal exponent adjusted to match.
const EXTENDED_SIGNIFICANT_DIGITS: usize = 36;

/// Largest power of ten applied in one step while scaling a parsed double-double value.
const EXTENDED_SCALE_STEP: i64 = 256;

/// Decimal scales beyond this magnitude certainly overflow or underflow a double-double value.
const EXTENDED_SCALE_LIMIT: i64 = 400;

/// Largest integer part printed digit by digit; larger values fall back to `f64` formatting.
const EXTENDED_INTEGER_LIMIT: f64 = 1.0e38;

/// Floor of a double-double value.
fn floor_extended(value: TwoFloat) -> TwoFloat {
    let hi = value.hi();
    let hi_floor = hi.floor();
    if hi_floor == hi {
        // `hi` is integral, the fractional part lives in `lo`.
        TwoFloat::new_add(hi_floor, value.lo().floor())
    } else {
        // |lo| is below half an ulp of `hi`, so it cannot carry `hi` across an integer.
        TwoFloat::from(hi_floor)
    }
}

/// Double-double sum. Once the leading term overflows the result is that infinity; the error
/// terms of an overflowed sum are NaN.
fn add_extended(a: TwoFloat, b: TwoFloat) -> TwoFloat {
    let lead = a.hi() + b.hi();
    if !lead.is_finite() {
        return TwoFloat::from(lead);
    }
    let sum = a + b;
    if Precision::is_finite(sum) {
        sum
    } else {
        TwoFloat::from(lead)
    }
}

/// Double-double product with the same overflow rule as [`add_extended`].
fn multiply_extended(a: TwoFloat, b: TwoFloat) -> TwoFloat {
    let lead = a.hi() * b.hi();
    if lead.is_finite() {
        let product = a * b;
        if Precision::is_finite(product) {
            return product;
        }
    }

    // Near the top of the range the leading term can overflow while the exact product does
    // not. Multiply at half scale and double both words, which is exact.
    let half_a = TwoFloat::new_add(a.hi() * 0.5, a.lo() * 0.5);
    if !(half_a.hi() * b.hi()).is_finite() {
        return TwoFloat::from(lead);
    }
    let half = half_a * b;
    let hi = half.hi() * 2.0;
    if hi.is_finite() && half.lo().is_finite() {
        TwoFloat::new_add(hi, half.lo() * 2.0)
    } else {
        TwoFloat::from(lead)
    }
}

/// Double-double quotient by long division: three `f64` quotient digits, each taken from the
/// remainder left by the previous ones.
///
/// `TwoFloat`'s own `/` only delivers a correctly rounded high word, so it is not used.
fn divide_extended(a: TwoFloat, b: TwoFloat) -> TwoFloat {
    let q1 = a.hi() / b.hi();
    if !q1.is_finite() {
        return TwoFloat::from(q1);
    }
    let remainder = a - b * TwoFloat::from(q1);
    let q2 = remainder.hi() / b.hi();
    let remainder = remainder - b * TwoFloat::from(q2);
    let q3 = remainder.hi() / b.hi();
    let quotient = TwoFloat::new_add(q1, q2) + TwoFloat::from(q3);
    if Precision::is_finite(quotient) {
        quotient
    } else {
        TwoFloat::from(q1)
    }
}

/// Double-double square root: the `f64` root plus one Newton correction from the exact residual.
fn sqrt_extended(value: TwoFloat) -> TwoFloat {
    let root = value.hi().sqrt();
    if root == 0.0 || !root.is_finite() {
        return TwoFloat::from(root);
    }
    let residual = value - TwoFloat::from(root) * TwoFloat::from(root);
    TwoFloat::new_add(root, residual.hi() / (2.0 * root))
}

fn integer_digits_extended(whole: TwoFloat) -> String {
    if whole.hi().abs() < EXTENDED_INTEGER_LIMIT {
        let integer = whole.hi() as i128 + whole.lo() as i128;
        integer.to_string()
    } else {
        format!("{:.0}", whole.hi())
    }
}

impl Precision for TwoFloat {
    const WIDTH: Width = Width::Extended;

    fn zero() -> Self {
        TwoFloat::from(0.0)
    }

    fn one() -> Self {
        TwoFloat::from(1.0)
    }

    fn ten() -> Self {
        TwoFloat::from(10.0)
    }

    fn from_count(count: usize) -> Self {
        let hi = count as f64;
        let rest = (count as i128 - hi as i128) as f64;
        TwoFloat::new_add(hi, rest)
    }

    fn from_decimal(decimal: &Decimal<'_>) -> Option<Self> {
        let ten = Self::ten();
        let mut mantissa = Self::zero();
        let mut significant = 0;
        let mut dropped = 0i64;
        for digit in decimal.digits() {
            if significant == 0 && digit == 0 {
                continue;
            }
            if significant < EXTENDED_SIGNIFICANT_DIGITS {
                mantissa = mantissa.times(ten).plus(TwoFloat::from(f64::from(digit)));
                significant += 1;
            } else {
                dropped += 1;
            }
        }

        if significant == 0 {
            let sign = if decimal.is_negative() { -1.0 } else { 1.0 };
            return Some(TwoFloat::from(sign * 0.0));
        }

        let fraction_len = i64::try_from(decimal.fraction_len()).unwrap_or(i64::MAX);
        let scale = decimal
            .exponent()
            .saturating_sub(fraction_len)
            .saturating_add(dropped);
        if !(-EXTENDED_SCALE_LIMIT..=EXTENDED_SCALE_LIMIT).contains(&scale) {
            return None;
        }

        let mut value = mantissa;
        let mut remaining = scale;
        while remaining != 0 {
            let step = remaining.clamp(-EXTENDED_SCALE_STEP, EXTENDED_SCALE_STEP);
            let power = Self::power_of_ten(step.unsigned_abs() as u32);
            value = if step > 0 {
                value.times(power)
            } else {
                value.divided_by(power)
            };
            remaining -= step;
        }

        if !Precision::is_finite(value) || value.hi() == 0.0 {
            return None;
        }
        Some(if decimal.is_negative() { -value } else { value })
    }

    fn plus(self, rhs: Self) -> Self {
        add_extended(self, rhs)
    }

    fn minus(self, rhs: Self) -> Self {
        add_extended(self, -rhs)
    }

    fn times(self, rhs: Self) -> Self {
        multiply_extended(self, rhs)
    }

    fn divided_by(self, rhs: Self) -> Self {
        divide_extended(self, rhs)
    }

    fn round_half_away(self) -> Self {
        if self.hi() < 0.0 {
            return -(-self).round_half_away();
        }
        let floor = floor_extended(self);
        let fraction = self.minus(floor);
        let at_least_half =
            fraction.hi() > 0.5 || (fraction.hi() == 0.5 && fraction.lo() >= 0.0);
        if at_least_half {
            floor.plus(Self::one())
        } else {
            floor
        }
    }

    fn square_root(self) -> Self {
        sqrt_extended(self)
    }

    fn is_finite(self) -> bool {
        self.hi().is_finite() && self.lo().is_finite()
    }

    fn to_decimal_string(self, places: usize) -> String {
        if !Precision::is_finite(self) {
            return format!("{}", self.hi());
        }

        let negative = self.hi().is_sign_negative();
        let magnitude = if negative { -self } else { self };
        let whole = floor_extended(magnitude);
        let mut fraction = magnitude.minus(whole);

        let mut out = String::with_capacity(places + 24);
        if negative {
            out.push('-');
        }
        out.push_str(&integer_digits_extended(whole));
        if places > 0 {
            out.push('.');
            let ten = Self::ten();
            for _ in 0..places {
                fraction = fraction.times(ten);
                let digit = floor_extended(fraction);
                fraction = fraction.minus(digit);
                let digit = digit.hi().clamp(0.0, 9.0) as u8;
                out.push(char::from(b'0' + digit));
            }
        }
        out
    }

    fn to_f64_lossy(self) -> f64 {
        self.hi() + self.lo()
    }
}

/// An RMSSD value tagged with the width it was computed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rmssd {
    Narrow(f32),
    Standard(f64),
    Extended(TwoFloat),
}

impl Rmssd {
    pub fn width(&self) -> Width {
        match self {
            Rmssd::Narrow(_) => Width::Narrow,
            Rmssd::Standard(_) => Width::Standard,
            Rmssd::Extended(_) => Width::Extended,
        }
    }

    /// Formats the value in fixed notation with `places` digits after the decimal point.
    ///
    /// Double-double values are printed by digit extraction; their digits are truncated rather
    /// than rounded, and digits past roughly 32 significant places carry no information.
    pub fn to_decimal_string(&self, places: usize) -> String {
        match *self {
            Rmssd::Narrow(value) => value.to_decimal_string(places),
            Rmssd::Standard(value) => value.to_decimal_string(places),
            Rmssd::Extended(value) => value.to_decimal_string(places),
        }
    }

    pub fn to_f64_lossy(&self) -> f64 {
        match *self {
            Rmssd::Narrow(value) => value.to_f64_lossy(),
            Rmssd::Standard(value) => value,
            Rmssd::Extended(value) => value.to_f64_lossy(),
        }
    }
}

impl Display for Rmssd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = f.precision().unwrap_or(DEFAULT_DISPLAY_PLACES);
        f.write_str(&self.to_decimal_string(places))
    }
}

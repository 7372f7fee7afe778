//! Lexical scanning of decimal sample tokens.
//!
//! A sample token is accepted when it matches
//!
//! ```text
//! [+-]? digits? ( . digits? )? ( [eE] [+-]? digits )?
//! ```
//!
//! with at least one digit before the exponent. Infinities, NaN, hexadecimal literals and empty
//! tokens are rejected here, before any width gets to interpret the digits.

/// A lexically valid decimal number, borrowed from the token it was scanned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal<'a> {
    text: &'a str,
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: i64,
}

fn digit_run(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

impl<'a> Decimal<'a> {
    /// Scans `text` as a decimal number. `text` must already be trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use hrv_rmssd::preprocessing::decimal::Decimal;
    ///
    /// let decimal = Decimal::scan("-12.50e1").unwrap();
    /// assert!(decimal.is_negative());
    /// assert_eq!(decimal.digits().collect::<Vec<_>>(), vec![1, 2, 5, 0]);
    /// assert_eq!(decimal.fraction_len(), 2);
    /// assert_eq!(decimal.exponent(), 1);
    /// assert!(Decimal::scan("abc").is_none());
    /// ```
    pub fn scan(text: &'a str) -> Option<Self> {
        let bytes = text.as_bytes();
        let mut pos = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };

        let integer_len = digit_run(bytes, pos);
        let integer = &text[pos..pos + integer_len];
        pos += integer_len;

        let mut fraction = "";
        if bytes.get(pos) == Some(&b'.') {
            pos += 1;
            let fraction_len = digit_run(bytes, pos);
            fraction = &text[pos..pos + fraction_len];
            pos += fraction_len;
        }

        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        let mut exponent = 0i64;
        if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
            pos += 1;
            let exponent_negative = match bytes.get(pos) {
                Some(b'-') => {
                    pos += 1;
                    true
                }
                Some(b'+') => {
                    pos += 1;
                    false
                }
                _ => false,
            };
            let exponent_len = digit_run(bytes, pos);
            if exponent_len == 0 {
                return None;
            }
            // saturates; anything this large is out of range for every width anyway
            let magnitude = bytes[pos..pos + exponent_len]
                .iter()
                .fold(0i64, |acc, b| {
                    acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
                });
            exponent = if exponent_negative {
                -magnitude
            } else {
                magnitude
            };
            pos += exponent_len;
        }

        if pos != bytes.len() {
            return None;
        }

        Some(Self {
            text,
            negative,
            integer,
            fraction,
            exponent,
        })
    }

    /// The scanned text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Numeric values of the integer digits followed by the fraction digits.
    pub fn digits(&self) -> impl Iterator<Item = u8> + 'a {
        self.integer
            .bytes()
            .chain(self.fraction.bytes())
            .map(|b| b - b'0')
    }

    /// Whether any digit is nonzero, i.e. the number is not zero whatever its exponent.
    pub fn has_nonzero_digit(&self) -> bool {
        self.digits().any(|digit| digit != 0)
    }

    /// Number of digits after the decimal point.
    pub fn fraction_len(&self) -> usize {
        self.fraction.len()
    }

    /// The explicit decimal exponent, zero when absent.
    pub fn exponent(&self) -> i64 {
        self.exponent
    }
}

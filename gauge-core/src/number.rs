//! Arbitrary precision numbers using dashu
//!
//! Uses dashu-float (DBig) for arbitrary precision decimal arithmetic.
//! Decimal scales such as 0.01 or 0.0254 are represented exactly, so
//! conversions between decimal units do not accumulate binary rounding error.

use dashu_float::DBig;
use dashu_float::ops::Abs;
use dashu_int::{IBig, Sign, UBig};
use dashu_int::ops::BitTest;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Not a finite number: {0}")]
    NotFinite(String),

    #[error("Exponent out of range: {0}")]
    OutOfRange(String),
}

/// Default precision for calculations (significant decimal digits)
pub const DEFAULT_PRECISION: usize = 50;

/// Largest decimal exponent accepted from text; exact rendering grows with it
pub const MAX_EXPONENT: usize = 4096;

/// First 500 digits of pi, truncated to the requested precision in [`Number::pi`]
const PI_STR: &str = "3.14159265358979323846264338327950288419716939937510582097494459230781640628620899862803482534211706798214808651328230664709384460955058223172535940812848111745028410270193852110555964462294895493038196442881097566593344612847564823378678316527120190914564856692346034861045432664821339360726024914127372458700660631558817488152092096282925409171536436789259036001133053054882046652138414695194151160943305727036575959195309218611738193261179310511854807446237996274956735188575272489122793818301194912";

/// Arbitrary precision decimal number
///
/// Built on dashu-float's DBig. There is no NaN or infinity: every
/// `Number` is a finite decimal, so equality and ordering are total.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
}

impl Number {
    // ========== Construction ==========

    /// Ensure a DBig has adequate precision for calculations
    fn with_work_precision(val: DBig) -> DBig {
        val.with_precision(DEFAULT_PRECISION).value()
    }

    /// Reject parsed values whose exponent would make rendering unbounded
    fn within_exponent_range(inner: DBig, text: &str) -> Result<Self, NumberError> {
        if inner.repr().exponent().unsigned_abs() > MAX_EXPONENT {
            return Err(NumberError::ParseError(format!("{} (exponent out of range)", text)));
        }
        Ok(Self { inner })
    }

    /// Create from string representation
    /// Supports: "123", "3.14", "1/3", "1.5e10", "-42"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        // Handle rational format "a/b"
        if s.contains('/') && !s.contains('.') && !s.contains('e') && !s.contains('E') {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() == 2 {
                let num: DBig = parts[0].trim().parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                let den: DBig = parts[1].trim().parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;

                if den == DBig::ZERO {
                    return Err(NumberError::DivisionByZero);
                }

                let result = Self::with_work_precision(num) / Self::with_work_precision(den);
                return Self::within_exponent_range(result, s);
            }
        }

        // Scientific notation with integer mantissa: "602214076e15"
        if (s.contains('e') || s.contains('E')) && !s.contains('.') {
            let s_lower = s.to_lowercase();
            let parts: Vec<&str> = s_lower.split('e').collect();
            if parts.len() == 2 {
                let mantissa: IBig = parts[0].trim_start_matches('+').parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                let exp: isize = parts[1].parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                if exp.unsigned_abs() > MAX_EXPONENT {
                    return Err(NumberError::ParseError(format!("{} (exponent out of range)", s)));
                }

                let result = DBig::from_parts(mantissa, exp);
                return Self::within_exponent_range(Self::with_work_precision(result), s);
            }
        }

        let inner: DBig = s.trim_start_matches('+').parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;

        Self::within_exponent_range(Self::with_work_precision(inner), s)
    }

    /// Create from i64 with working precision
    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }

    /// Create from ratio (exact division where representable)
    pub fn from_ratio(num: i64, den: i64) -> Result<Self, NumberError> {
        Self::from_i64(num).checked_div(&Self::from_i64(den))
    }

    /// Create from f64, rejecting NaN and infinities
    ///
    /// The shortest decimal text that round-trips the float is used, so
    /// `0.1` becomes exactly `0.1` rather than its binary expansion.
    pub fn try_from_f64(f: f64) -> Result<Self, NumberError> {
        if !f.is_finite() {
            return Err(NumberError::NotFinite(f.to_string()));
        }
        Self::from_str(&format!("{}", f))
    }

    /// Create from f64; non-finite input becomes zero
    pub fn from_f64(f: f64) -> Self {
        Self::try_from_f64(f).unwrap_or_else(|_| Self::zero())
    }

    pub fn zero() -> Self {
        Self::from_i64(0)
    }

    pub fn one() -> Self {
        Self::from_i64(1)
    }

    /// Pi to `precision` significant digits (at most the length of the table)
    pub fn pi(precision: usize) -> Self {
        let end_pos = (precision.max(1) + 2).min(PI_STR.len());
        let inner = match PI_STR[..end_pos].parse::<DBig>() {
            Ok(pi) => pi.with_precision(precision.max(1)).value(),
            Err(_) => DBig::from(3u8),
        };
        Self { inner }
    }

    // ========== Predicates ==========

    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        let floor_val = self.inner.clone().floor();
        self.inner == floor_val
    }

    // ========== Basic Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        Self { inner: &self.inner + &other.inner }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self { inner: &self.inner - &other.inner }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self { inner: &self.inner * &other.inner }
    }

    pub fn neg(&self) -> Self {
        Self { inner: -&self.inner }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            Ok(Self { inner: &self.inner / &other.inner })
        }
    }

    /// Integer power by repeated squaring; `|exp|` is limited to [`MAX_EXPONENT`]
    pub fn pow(&self, exp: i32) -> Result<Self, NumberError> {
        if exp.unsigned_abs() as usize > MAX_EXPONENT {
            return Err(NumberError::OutOfRange(exp.to_string()));
        }

        let mut result = Self::one();
        let mut square = self.clone();
        let mut remaining = exp.unsigned_abs();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&square);
            }
            square = square.mul(&square);
            remaining >>= 1;
        }

        if exp < 0 {
            Self::one().checked_div(&result)
        } else {
            Ok(result)
        }
    }

    pub fn abs(&self) -> Self {
        Self { inner: Abs::abs(self.inner.clone()) }
    }

    // ========== Conversion ==========

    /// Try to convert to i64
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }

        // DBig stores as significand * 10^exponent
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let sig_i64: i64 = significand.try_into().ok()?;

        if exponent == 0 {
            Some(sig_i64)
        } else if exponent > 0 && exponent <= 18 {
            sig_i64.checked_mul(10_i64.checked_pow(exponent as u32)?)
        } else if exponent < 0 && exponent >= -18 {
            let divisor = 10_i64.checked_pow((-exponent) as u32)?;
            if sig_i64 % divisor == 0 {
                Some(sig_i64 / divisor)
            } else {
                None
            }
        } else {
            None
        }
    }

    /// Convert to f64 (may lose precision)
    pub fn to_f64(&self) -> Option<f64> {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();

        let sig_f64: f64 = if significand.bit_len() <= 53 {
            let is_neg = significand < IBig::ZERO;
            let abs_sig = if is_neg { -significand } else { significand };
            match TryInto::<u64>::try_into(abs_sig) {
                Ok(u) => if is_neg { -(u as f64) } else { u as f64 },
                Err(_) => return None,
            }
        } else {
            // Shift right to fit in 53 bits, accounting for the bits shifted out
            let extra_bits = significand.bit_len() - 53;
            let shifted = &significand >> extra_bits;
            let shifted_i64: i64 = shifted.try_into().ok()?;
            shifted_i64 as f64 * 2_f64.powi(extra_bits as i32)
        };

        let result = if exponent == 0 {
            sig_f64
        } else if exponent > 0 && exponent <= 308 {
            sig_f64 * 10_f64.powi(exponent as i32)
        } else if exponent < 0 && exponent >= -308 {
            sig_f64 / 10_f64.powi((-exponent) as i32)
        } else {
            return None;
        };

        if result.is_finite() {
            Some(result)
        } else {
            None
        }
    }

    // ========== Display ==========

    /// Lossless decimal rendering, e.g. "-0.0025" or "1500"
    pub fn to_exact_string(&self) -> String {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();
        let negative = significand < IBig::ZERO;
        let digits = if negative { (-significand).to_string() } else { significand.to_string() };

        let body = if exponent >= 0 {
            let mut s = digits;
            s.push_str(&"0".repeat(exponent as usize));
            s
        } else {
            let shift = exponent.unsigned_abs();
            let with_point = if digits.len() > shift {
                let (int_part, frac_part) = digits.split_at(digits.len() - shift);
                format!("{}.{}", int_part, frac_part)
            } else {
                format!("0.{}{}", "0".repeat(shift - digits.len()), digits)
            };
            with_point.trim_end_matches('0').trim_end_matches('.').to_string()
        };

        if negative && body != "0" {
            format!("-{}", body)
        } else {
            body
        }
    }

    /// `|self| * 10^places` rounded half away from zero, and whether `self` is negative
    fn scaled_magnitude(&self, places: isize) -> (bool, UBig) {
        let repr = self.inner.repr();
        let (sign, magnitude) = repr.significand().clone().into_parts();
        let shift = repr.exponent() + places;
        let ten = UBig::from(10u8);

        let scaled = if shift >= 0 {
            magnitude * ten.pow(shift as usize)
        } else {
            let divisor = ten.pow(shift.unsigned_abs());
            let quotient = &magnitude / &divisor;
            let remainder = &magnitude % &divisor;
            if &remainder + &remainder >= divisor {
                quotient + UBig::ONE
            } else {
                quotient
            }
        };
        (matches!(sign, Sign::Negative), scaled)
    }

    /// Render with exactly `places` decimal places, rounding half away from zero
    pub fn as_decimal(&self, places: u32) -> String {
        let places = places as usize;
        let (negative, scaled) = self.scaled_magnitude(places as isize);
        let mut digits = scaled.to_string();
        if digits.len() <= places {
            digits.insert_str(0, &"0".repeat(places + 1 - digits.len()));
        }

        let body = if places == 0 {
            digits
        } else {
            let (int_part, frac_part) = digits.split_at(digits.len() - places);
            format!("{}.{}", int_part, frac_part)
        };

        if negative && scaled != UBig::ZERO {
            format!("-{}", body)
        } else {
            body
        }
    }

    /// Render with N significant figures
    pub fn as_sigfigs(&self, sigfigs: u32) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let sigfigs = sigfigs.max(1) as isize;
        let repr = self.inner.repr();
        // Power of ten of the leading digit
        let leading = repr.digits() as isize - 1 + repr.exponent();
        let places = sigfigs - 1 - leading;
        if places >= 0 {
            return self.as_decimal(places as u32);
        }

        let (negative, scaled) = self.scaled_magnitude(places);
        let mut body = scaled.to_string();
        body.push_str(&"0".repeat(places.unsigned_abs()));
        if negative {
            format!("-{}", body)
        } else {
            body
        }
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match f.precision() {
            Some(places) => f.write_str(&self.as_decimal(places as u32)),
            None => f.pad(&self.to_exact_string()),
        }
    }
}

impl std::str::FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::from_str(s)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::from_i64(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::from_i64(n as i64)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::from_i64(n as i64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)) }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_exact_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        // DBig has no NaN, so partial_cmp always succeeds
        self.inner.partial_cmp(&other.inner).unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_forms() {
        assert_eq!(Number::from_str("123").unwrap().to_i64(), Some(123));
        assert_eq!(Number::from_str("+7").unwrap(), Number::from_i64(7));
        assert!(!Number::from_str("3.14").unwrap().is_integer());
        assert!(!Number::from_str("1/3").unwrap().is_integer());
        assert_eq!(Number::from_str("15e2").unwrap().to_i64(), Some(1500));
        assert_eq!(Number::from_str("1.5e3").unwrap().to_i64(), Some(1500));
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!(matches!(Number::from_str("abc"), Err(NumberError::ParseError(_))));
        assert!(matches!(Number::from_str("NaN"), Err(NumberError::ParseError(_))));
        assert!(matches!(Number::from_str("1/0"), Err(NumberError::DivisionByZero)));
    }

    #[test]
    fn test_try_from_f64() {
        assert_eq!(Number::try_from_f64(0.1).unwrap(), Number::from_str("0.1").unwrap());
        assert_eq!(Number::try_from_f64(-2.5).unwrap(), Number::from_str("-2.5").unwrap());
        assert!(matches!(Number::try_from_f64(f64::NAN), Err(NumberError::NotFinite(_))));
        assert!(matches!(Number::try_from_f64(f64::INFINITY), Err(NumberError::NotFinite(_))));
        assert!(Number::from_f64(f64::NAN).is_zero());
    }

    #[test]
    fn test_decimal_arithmetic_is_exact() {
        let a = Number::from_str("0.1").unwrap();
        let b = Number::from_str("0.2").unwrap();
        assert_eq!(a.add(&b), Number::from_str("0.3").unwrap());
        assert_eq!(b.sub(&a), a);
        assert_eq!(a.mul(&Number::from_i64(10)), Number::one());
        assert_eq!(a.neg(), Number::from_str("-0.1").unwrap());
    }

    #[test]
    fn test_checked_div() {
        let ten = Number::from_i64(10);
        assert_eq!(ten.checked_div(&Number::from_i64(4)).unwrap(), Number::from_str("2.5").unwrap());
        assert_eq!(ten.checked_div(&Number::zero()), Err(NumberError::DivisionByZero));
        assert!(Number::from_ratio(1, 0).is_err());
    }

    #[test]
    fn test_pow() {
        assert_eq!(Number::from_i64(2).pow(10).unwrap().to_i64(), Some(1024));
        assert_eq!(Number::from_i64(2).pow(-2).unwrap(), Number::from_str("0.25").unwrap());
        assert_eq!(Number::from_str("1.5").unwrap().pow(3).unwrap(), Number::from_str("3.375").unwrap());
        assert_eq!(Number::from_i64(7).pow(0).unwrap(), Number::one());
        assert!(Number::zero().pow(-1).is_err());
        assert!(matches!(Number::from_i64(10).pow(i32::MAX), Err(NumberError::OutOfRange(_))));
        assert!(matches!(Number::from_i64(10).pow(i32::MIN), Err(NumberError::OutOfRange(_))));
    }

    #[test]
    fn test_exponent_is_bounded() {
        assert_eq!(Number::from_str("1e300").unwrap().to_exact_string().len(), 301);
        assert!(Number::from_str("1e-300").is_ok());
        for text in ["1e5000000", "1.5e5000000", "1e-5000000", "-7E99999999999999999999"] {
            assert!(
                matches!(Number::from_str(text), Err(NumberError::ParseError(_))),
                "expected rejection of {}",
                text
            );
        }
    }

    #[test]
    fn test_ordering_is_total() {
        let small = Number::from_i64(-3);
        let large = Number::from_str("2.5").unwrap();
        assert!(small < large);
        assert_eq!(small.cmp(&small.clone()), Ordering::Equal);
        assert_eq!(large.abs(), large);
        assert_eq!(small.abs(), Number::from_i64(3));
    }

    #[test]
    fn test_pi() {
        let pi = Number::pi(50);
        assert!(pi.as_decimal(5).starts_with("3.14159"), "got: {}", pi.as_decimal(5));

        let wide = Number::pi(80);
        assert_ne!(wide, pi);
        assert_eq!(
            wide.as_decimal(70),
            "3.1415926535897932384626433832795028841971693993751058209749445923078164"
        );
    }

    #[test]
    fn test_exact_string() {
        assert_eq!(Number::from_i64(0).to_exact_string(), "0");
        assert_eq!(Number::from_i64(1500).to_exact_string(), "1500");
        assert_eq!(Number::from_str("-0.0025").unwrap().to_exact_string(), "-0.0025");
        assert_eq!(Number::from_str("12.5").unwrap().to_exact_string(), "12.5");
        assert_eq!(Number::from_str("1e-3").unwrap().to_exact_string(), "0.001");
    }

    #[test]
    fn test_display_honours_precision() {
        let n = Number::from_str("1.23456").unwrap();
        assert_eq!(format!("{}", n), "1.23456");
        assert_eq!(format!("{:.2}", n), "1.23");
        assert_eq!(format!("{:.0}", n), "1");
        assert_eq!(format!("{:.7}", n), "1.2345600");
    }

    #[test]
    fn test_decimal_rounding_is_exact() {
        let n = |s: &str| Number::from_str(s).unwrap();
        assert_eq!(n("2.675").as_decimal(2), "2.68");
        assert_eq!(n("-1.005").as_decimal(2), "-1.01");
        assert_eq!(n("2.5").as_decimal(0), "3");
        assert_eq!(n("-0.004").as_decimal(2), "0.00");
        assert_eq!(n("0.000000001").as_decimal(3), "0.000");
        assert_eq!(n("1500").as_decimal(1), "1500.0");
        assert_eq!(n("12345678901234567890.5").as_decimal(1), "12345678901234567890.5");
    }

    #[test]
    fn test_sigfigs() {
        let n = Number::from_str("1234.5678").unwrap();
        assert_eq!(n.as_sigfigs(3), "1230");
        assert_eq!(n.as_sigfigs(6), "1234.57");
        assert_eq!(Number::from_str("0.012345").unwrap().as_sigfigs(2), "0.012");
        assert_eq!(Number::from_str("-98765").unwrap().as_sigfigs(2), "-99000");
        assert_eq!(
            Number::from_str("123456789012345678901234").unwrap().as_sigfigs(3),
            format!("123{}", "0".repeat(21))
        );
    }

    #[test]
    fn test_serde_as_string() {
        let n = Number::from_str("0.125").unwrap();
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "\"0.125\"");
        let back: Number = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }
}

//! Quantity type - a magnitude with a unit of a known dimension

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use gauge_core::{LookupMode, Number, NumberFormat, QuantityError, Settings};
use crate::{AnyQuantity, Conversion, Dimension, ToMagnitude, UnitKind};

/// An immutable physical quantity: a magnitude and the unit it was given in
///
/// The originating unit is kept so reading the value back in that unit is
/// exact. Comparison and equality work on the magnitude in the base unit,
/// so `50 %` equals `0.5` of the base ratio unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity<U> {
    value: Number,
    unit: U,
}

/// Registered conversion of a unit
///
/// # Panics
///
/// Panics if `unit` is missing from its dimension's registry. Registries are
/// built from [`UnitKind::all`], so this indicates a broken unit table.
fn conversion<U: UnitKind>(unit: U) -> &'static Conversion {
    match U::registry().entry(unit) {
        Some(entry) => entry.conversion(),
        None => panic!("{:?} is not registered in {}", unit, U::DIMENSION),
    }
}

impl<U: UnitKind> Quantity<U> {
    pub fn new(value: Number, unit: U) -> Self {
        Quantity { value, unit }
    }

    /// Create from any supported numeric representation
    pub fn from_value(value: impl ToMagnitude, unit: U) -> Result<Self, QuantityError> {
        Ok(Self::new(value.to_magnitude()?, unit))
    }

    /// Additive identity: zero in the base unit
    pub fn zero() -> Self {
        Self::new(Number::zero(), U::BASE)
    }

    /// Magnitude in the originating unit
    pub fn value(&self) -> &Number {
        &self.value
    }

    pub fn unit(&self) -> U {
        self.unit
    }

    pub fn dimension(&self) -> Dimension {
        U::DIMENSION
    }

    /// Magnitude expressed in the dimension's base unit
    pub fn base_value(&self) -> Number {
        conversion(self.unit).to_base(&self.value)
    }

    /// Magnitude expressed in `unit`
    ///
    /// # Panics
    ///
    /// Panics if `unit` is not registered; see [`Quantity::try_as_unit`].
    pub fn as_unit(&self, unit: U) -> Number {
        if unit == self.unit {
            return self.value.clone();
        }
        conversion(unit).from_base(&self.base_value())
    }

    pub fn try_as_unit(&self, unit: U) -> Result<Number, QuantityError> {
        U::registry().convert(&self.value, self.unit, unit)
    }

    /// Same quantity, re-expressed in `unit`
    pub fn to_unit(&self, unit: U) -> Self {
        Self::new(self.as_unit(unit), unit)
    }

    /// Type-erased copy for comparisons across quantity types
    pub fn erase(&self) -> AnyQuantity {
        AnyQuantity::new(U::DIMENSION, self.base_value())
    }

    // ========== Arithmetic ==========

    /// Unit both operands can be combined in without going through the base
    fn shared_linear_unit(&self, other: &Self) -> Option<U> {
        (self.unit == other.unit && U::registry().is_linear(self.unit)).then_some(self.unit)
    }

    fn combine(&self, other: &Self, op: impl Fn(&Number, &Number) -> Number) -> Self {
        match self.shared_linear_unit(other) {
            Some(unit) => Self::new(op(&self.value, &other.value), unit),
            None => Self::new(op(&self.base_value(), &other.base_value()), U::BASE),
        }
    }

    fn scaled_by(&self, factor: &Number) -> Self {
        if U::registry().is_linear(self.unit) {
            Self::new(Number::mul(&self.value, factor), self.unit)
        } else {
            Self::new(Number::mul(&self.base_value(), factor), U::BASE)
        }
    }

    fn divided_by(&self, divisor: &Number) -> Result<Self, QuantityError> {
        if U::registry().is_linear(self.unit) {
            Ok(Self::new(self.value.checked_div(divisor)?, self.unit))
        } else {
            Ok(Self::new(self.base_value().checked_div(divisor)?, U::BASE))
        }
    }

    /// Multiply by a scalar given in any supported representation
    pub fn scale(&self, factor: impl ToMagnitude) -> Result<Self, QuantityError> {
        Ok(self.scaled_by(&factor.to_magnitude()?))
    }

    /// Divide by a scalar; zero yields [`QuantityError::DivisionByZero`]
    pub fn checked_div_scalar(&self, divisor: impl ToMagnitude) -> Result<Self, QuantityError> {
        self.divided_by(&divisor.to_magnitude()?)
    }

    /// Dimensionless ratio of two quantities
    pub fn ratio(&self, other: &Self) -> Result<Number, QuantityError> {
        let quotient = match self.shared_linear_unit(other) {
            Some(_) => self.value.checked_div(&other.value)?,
            None => self.base_value().checked_div(&other.base_value())?,
        };
        Ok(quotient)
    }

    // ========== Comparison ==========

    /// True when the quantities differ by no more than `tolerance`
    pub fn approx_eq(&self, other: &Self, tolerance: &Tolerance) -> bool {
        let a = self.base_value();
        let diff = a.sub(&other.base_value()).abs();
        match tolerance.kind {
            ToleranceKind::Absolute => diff <= tolerance.amount,
            ToleranceKind::Relative => diff <= Number::mul(&a.abs(), &tolerance.amount),
        }
    }

    /// Order against a dynamically typed value
    ///
    /// Fails with `NullArgument` when `other` is absent, `DimensionMismatch`
    /// for an [`AnyQuantity`] of another dimension, and `TypeMismatch` for
    /// anything that is neither this quantity type nor an [`AnyQuantity`].
    pub fn compare_to(&self, other: Option<&dyn Any>) -> Result<Ordering, QuantityError> {
        let other = other.ok_or(QuantityError::NullArgument("other"))?;

        if let Some(quantity) = other.downcast_ref::<Self>() {
            return Ok(self.cmp(quantity));
        }
        if let Some(erased) = other.downcast_ref::<AnyQuantity>() {
            return self.erase().try_cmp(erased);
        }

        Err(QuantityError::TypeMismatch {
            expected: format!("Quantity<{}>", U::DIMENSION),
            found: "non-quantity value".to_string(),
        })
    }

    /// Equality against a dynamically typed value; never fails
    pub fn equals_any(&self, other: Option<&dyn Any>) -> bool {
        matches!(self.compare_to(other), Ok(Ordering::Equal))
    }

    // ========== Text ==========

    /// Render in `unit` (default: the originating unit) with the given number format
    pub fn format(&self, unit: Option<U>, format: NumberFormat) -> String {
        let unit = unit.unwrap_or(self.unit);
        let value = format.render(&self.as_unit(unit));
        with_abbreviation(value, U::registry().abbreviation(unit).unwrap_or(""))
    }

    /// Render in `unit` using the global number format
    pub fn to_string_in(&self, unit: U) -> String {
        self.format(Some(unit), Settings::global().format)
    }

    /// Parse "<number> <abbreviation>" with an explicit lookup mode
    pub fn parse_with(text: &str, mode: LookupMode) -> Result<Self, QuantityError> {
        let (value, unit) = crate::parse::parse_quantity(text, U::registry(), mode)?;
        Ok(Self::new(value, unit))
    }

    /// Non-failing parse using the global lookup mode
    pub fn try_parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

fn with_abbreviation(value: String, abbreviation: &str) -> String {
    if abbreviation.is_empty() {
        value
    } else {
        format!("{} {}", value, abbreviation)
    }
}

/// How a [`Tolerance`] amount is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceKind {
    /// Maximum difference, in the dimension's base unit
    Absolute,
    /// Maximum difference as a fraction of the left-hand magnitude
    Relative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    amount: Number,
    kind: ToleranceKind,
}

impl Tolerance {
    pub fn absolute(amount: impl ToMagnitude) -> Result<Self, QuantityError> {
        Self::new(amount, ToleranceKind::Absolute)
    }

    pub fn relative(amount: impl ToMagnitude) -> Result<Self, QuantityError> {
        Self::new(amount, ToleranceKind::Relative)
    }

    fn new(amount: impl ToMagnitude, kind: ToleranceKind) -> Result<Self, QuantityError> {
        let amount = amount.to_magnitude()?;
        if amount.is_negative() {
            return Err(QuantityError::InvalidMagnitude(format!(
                "tolerance must not be negative: {}",
                amount
            )));
        }
        Ok(Tolerance { amount, kind })
    }

    pub fn amount(&self) -> &Number {
        &self.amount
    }

    pub fn kind(&self) -> ToleranceKind {
        self.kind
    }
}

// ========== Trait Implementations ==========

impl<U: UnitKind> Default for Quantity<U> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<U: UnitKind> PartialEq for Quantity<U> {
    fn eq(&self, other: &Self) -> bool {
        self.base_value() == other.base_value()
    }
}

impl<U: UnitKind> Eq for Quantity<U> {}

impl<U: UnitKind> PartialOrd for Quantity<U> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<U: UnitKind> Ord for Quantity<U> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.base_value().cmp(&other.base_value())
    }
}

impl<U: UnitKind> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match f.precision() {
            Some(places) => self.value.as_decimal(places as u32),
            None => self.value.to_exact_string(),
        };
        let abbreviation = U::registry().abbreviation(self.unit).unwrap_or("");
        f.write_str(&with_abbreviation(value, abbreviation))
    }
}

impl<U: UnitKind> FromStr for Quantity<U> {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, Settings::global().lookup)
    }
}

impl<U: UnitKind> Add for &Quantity<U> {
    type Output = Quantity<U>;

    fn add(self, rhs: Self) -> Quantity<U> {
        self.combine(rhs, Number::add)
    }
}

impl<U: UnitKind> Add for Quantity<U> {
    type Output = Quantity<U>;

    fn add(self, rhs: Self) -> Quantity<U> {
        &self + &rhs
    }
}

impl<U: UnitKind> Sub for &Quantity<U> {
    type Output = Quantity<U>;

    fn sub(self, rhs: Self) -> Quantity<U> {
        self.combine(rhs, Number::sub)
    }
}

impl<U: UnitKind> Sub for Quantity<U> {
    type Output = Quantity<U>;

    fn sub(self, rhs: Self) -> Quantity<U> {
        &self - &rhs
    }
}

impl<U: UnitKind> Neg for &Quantity<U> {
    type Output = Quantity<U>;

    fn neg(self) -> Quantity<U> {
        self.scaled_by(&Number::from_i64(-1))
    }
}

impl<U: UnitKind> Neg for Quantity<U> {
    type Output = Quantity<U>;

    fn neg(self) -> Quantity<U> {
        -&self
    }
}

impl<U: UnitKind> Mul<&Number> for &Quantity<U> {
    type Output = Quantity<U>;

    fn mul(self, rhs: &Number) -> Quantity<U> {
        self.scaled_by(rhs)
    }
}

impl<U: UnitKind> Mul<Number> for Quantity<U> {
    type Output = Quantity<U>;

    fn mul(self, rhs: Number) -> Quantity<U> {
        self.scaled_by(&rhs)
    }
}

impl<U: UnitKind> Mul<Quantity<U>> for Number {
    type Output = Quantity<U>;

    fn mul(self, rhs: Quantity<U>) -> Quantity<U> {
        rhs.scaled_by(&self)
    }
}

/// Panics on a zero divisor; use [`Quantity::checked_div_scalar`] to handle it
impl<U: UnitKind> Div<&Number> for &Quantity<U> {
    type Output = Quantity<U>;

    fn div(self, rhs: &Number) -> Quantity<U> {
        match self.divided_by(rhs) {
            Ok(q) => q,
            Err(_) => panic!("attempt to divide a quantity by zero"),
        }
    }
}

impl<U: UnitKind> Div<Number> for Quantity<U> {
    type Output = Quantity<U>;

    fn div(self, rhs: Number) -> Quantity<U> {
        &self / &rhs
    }
}

/// Dimensionless ratio; panics when `rhs` is zero (see [`Quantity::ratio`])
///
/// Units with an offset divide absolute magnitudes in the base unit, so
/// 10 °C / 5 °C is 283.15 / 278.15 rather than 2.
impl<U: UnitKind> Div for &Quantity<U> {
    type Output = Number;

    fn div(self, rhs: Self) -> Number {
        match self.ratio(rhs) {
            Ok(n) => n,
            Err(_) => panic!("attempt to divide by a zero quantity"),
        }
    }
}

impl<U: UnitKind> Div for Quantity<U> {
    type Output = Number;

    fn div(self, rhs: Self) -> Number {
        &self / &rhs
    }
}

macro_rules! scalar_ops {
    ($($t:ty),*) => {
        $(
            impl<U: UnitKind> Mul<$t> for Quantity<U> {
                type Output = Quantity<U>;

                fn mul(self, rhs: $t) -> Quantity<U> {
                    self.scaled_by(&Number::from(rhs))
                }
            }

            impl<U: UnitKind> Mul<$t> for &Quantity<U> {
                type Output = Quantity<U>;

                fn mul(self, rhs: $t) -> Quantity<U> {
                    self.scaled_by(&Number::from(rhs))
                }
            }

            impl<U: UnitKind> Mul<Quantity<U>> for $t {
                type Output = Quantity<U>;

                fn mul(self, rhs: Quantity<U>) -> Quantity<U> {
                    rhs.scaled_by(&Number::from(self))
                }
            }

            impl<U: UnitKind> Div<$t> for Quantity<U> {
                type Output = Quantity<U>;

                fn div(self, rhs: $t) -> Quantity<U> {
                    &self / &Number::from(rhs)
                }
            }

            impl<U: UnitKind> Div<$t> for &Quantity<U> {
                type Output = Quantity<U>;

                fn div(self, rhs: $t) -> Quantity<U> {
                    self / &Number::from(rhs)
                }
            }
        )*
    };
}

scalar_ops!(i32, i64);

/// Sums stay in the shared unit when every term uses the same linear unit
impl<U: UnitKind> Sum for Quantity<U> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(|acc, q| &acc + &q).unwrap_or_else(Self::zero)
    }
}

impl<'a, U: UnitKind> Sum<&'a Quantity<U>> for Quantity<U> {
    fn sum<I: Iterator<Item = &'a Quantity<U>>>(iter: I) -> Self {
        iter.fold(None, |acc: Option<Self>, q| match acc {
            Some(acc) => Some(&acc + q),
            None => Some(q.clone()),
        })
        .unwrap_or_else(Self::zero)
    }
}

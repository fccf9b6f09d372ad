//! Numeric inputs accepted by quantity factories
//!
//! [`ToMagnitude`] turns any supported primitive (or a [`Number`]) into a
//! magnitude. [`MagnitudeSource`] backs the per-dimension extension traits
//! (`5.degrees()`, `Some(20).percent()`): integers produce a quantity
//! directly, floats can be non-finite and so produce a `Result`, and
//! `Option` inputs keep absence as `None`.

use gauge_core::{Number, QuantityError};
use crate::{Quantity, UnitKind};

/// A value that can become the magnitude of a quantity
pub trait ToMagnitude {
    fn to_magnitude(self) -> Result<Number, QuantityError>;
}

macro_rules! int_magnitude {
    ($($t:ty),*) => {
        $(
            impl ToMagnitude for $t {
                fn to_magnitude(self) -> Result<Number, QuantityError> {
                    Ok(Number::from_i64(self as i64))
                }
            }
        )*
    };
}

int_magnitude!(i8, i16, i32, i64, u8, u16, u32);

impl ToMagnitude for u64 {
    fn to_magnitude(self) -> Result<Number, QuantityError> {
        Ok(Number::from(self))
    }
}

impl ToMagnitude for f64 {
    fn to_magnitude(self) -> Result<Number, QuantityError> {
        Ok(Number::try_from_f64(self)?)
    }
}

impl ToMagnitude for f32 {
    /// Uses the shortest text of the `f32` itself, so `0.1f32` is `0.1`
    fn to_magnitude(self) -> Result<Number, QuantityError> {
        if !self.is_finite() {
            return Err(QuantityError::InvalidMagnitude(self.to_string()));
        }
        Ok(Number::from_str(&format!("{}", self))?)
    }
}

impl ToMagnitude for Number {
    fn to_magnitude(self) -> Result<Number, QuantityError> {
        Ok(self)
    }
}

impl ToMagnitude for &Number {
    fn to_magnitude(self) -> Result<Number, QuantityError> {
        Ok(self.clone())
    }
}

/// Source of a quantity for the extension traits
///
/// `Output<Q>` is what the source produces once wrapped as quantity `Q`.
pub trait MagnitudeSource {
    type Output<Q>;

    fn into_quantity<U: UnitKind>(self, unit: U) -> Self::Output<Quantity<U>>;
}

macro_rules! exact_source {
    ($($t:ty),*) => {
        $(
            impl MagnitudeSource for $t {
                type Output<Q> = Q;

                fn into_quantity<U: UnitKind>(self, unit: U) -> Quantity<U> {
                    Quantity::new(Number::from(self), unit)
                }
            }

            impl MagnitudeSource for Option<$t> {
                type Output<Q> = Option<Q>;

                fn into_quantity<U: UnitKind>(self, unit: U) -> Option<Quantity<U>> {
                    self.map(|v| v.into_quantity(unit))
                }
            }
        )*
    };
}

exact_source!(i32, i64, u32, u64, Number);

macro_rules! float_source {
    ($($t:ty),*) => {
        $(
            impl MagnitudeSource for $t {
                type Output<Q> = Result<Q, QuantityError>;

                fn into_quantity<U: UnitKind>(self, unit: U) -> Result<Quantity<U>, QuantityError> {
                    Quantity::from_value(self, unit)
                }
            }

            impl MagnitudeSource for Option<$t> {
                type Output<Q> = Result<Option<Q>, QuantityError>;

                fn into_quantity<U: UnitKind>(self, unit: U) -> Result<Option<Quantity<U>>, QuantityError> {
                    self.map(|v| Quantity::from_value(v, unit)).transpose()
                }
            }
        )*
    };
}

float_source!(f32, f64);

//! Type-erased quantities
//!
//! [`AnyQuantity`] carries its dimension at runtime instead of in the type,
//! so mixing dimensions is a reported error rather than a compile error.

use std::cmp::Ordering;
use std::fmt;
use serde::Serialize;
use gauge_core::{Number, QuantityError};
use crate::{Dimension, Quantity, UnitKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnyQuantity {
    dimension: Dimension,
    base_value: Number,
}

impl AnyQuantity {
    /// Quantity of `dimension` with the given magnitude in its base unit
    pub fn new(dimension: Dimension, base_value: Number) -> Self {
        AnyQuantity { dimension, base_value }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn base_value(&self) -> &Number {
        &self.base_value
    }

    fn check_dimension(&self, other: Dimension) -> Result<(), QuantityError> {
        if self.dimension == other {
            Ok(())
        } else {
            Err(QuantityError::dimension_mismatch(self.dimension.name(), other.name()))
        }
    }

    pub fn try_add(&self, other: &AnyQuantity) -> Result<AnyQuantity, QuantityError> {
        self.check_dimension(other.dimension)?;
        Ok(Self::new(self.dimension, self.base_value.add(&other.base_value)))
    }

    pub fn try_sub(&self, other: &AnyQuantity) -> Result<AnyQuantity, QuantityError> {
        self.check_dimension(other.dimension)?;
        Ok(Self::new(self.dimension, self.base_value.sub(&other.base_value)))
    }

    pub fn try_cmp(&self, other: &AnyQuantity) -> Result<Ordering, QuantityError> {
        self.check_dimension(other.dimension)?;
        Ok(self.base_value.cmp(&other.base_value))
    }

    pub fn try_ratio(&self, other: &AnyQuantity) -> Result<Number, QuantityError> {
        self.check_dimension(other.dimension)?;
        Ok(self.base_value.checked_div(&other.base_value)?)
    }

    /// Recover the typed quantity, expressed in the base unit of `U`
    pub fn downcast<U: UnitKind>(&self) -> Result<Quantity<U>, QuantityError> {
        self.check_dimension(U::DIMENSION)?;
        Ok(Quantity::new(self.base_value.clone(), U::BASE))
    }
}

impl<U: UnitKind> From<Quantity<U>> for AnyQuantity {
    fn from(quantity: Quantity<U>) -> Self {
        quantity.erase()
    }
}

impl fmt::Display for AnyQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} base)", self.base_value, self.dimension)
    }
}

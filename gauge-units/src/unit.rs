//! Unit descriptors: how one unit relates to its dimension's base unit

use std::fmt::Debug;
use std::hash::Hash;
use gauge_core::{Number, NumberError};
use crate::{ConversionRegistry, Dimension};

/// The closed set of units of one dimension
///
/// Implemented by the unit enums generated with `define_dimension!`. Each
/// implementation owns a lazily built, immutable [`ConversionRegistry`]
/// holding every variant listed in [`UnitKind::all`].
pub trait UnitKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    const DIMENSION: Dimension;

    /// The unit all conversions route through
    const BASE: Self;

    fn all() -> &'static [Self];

    fn registry() -> &'static ConversionRegistry<Self>;
}

/// Conversion between a unit and its dimension's base unit
///
/// Scales are checked to be non-zero when the conversion is built, and the
/// inverse is computed once, so converting from the base unit cannot fail.
#[derive(Debug, Clone)]
pub struct Conversion {
    kind: Kind,
}

#[derive(Clone)]
enum Kind {
    Identity,
    /// base = value * scale + offset
    Linear { scale: Number, offset: Number, inverse: Number },
    /// base = (value + offset) * scale
    Shifted { offset: Number, scale: Number, inverse: Number },
    Custom { to_base: fn(&Number) -> Number, from_base: fn(&Number) -> Number },
}

impl std::fmt::Debug for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Identity => f.write_str("Identity"),
            Kind::Linear { scale, offset, .. } => f
                .debug_struct("Linear")
                .field("scale", scale)
                .field("offset", offset)
                .finish(),
            Kind::Shifted { offset, scale, .. } => f
                .debug_struct("Shifted")
                .field("offset", offset)
                .field("scale", scale)
                .finish(),
            Kind::Custom { .. } => f.write_str("Custom"),
        }
    }
}

impl Conversion {
    /// Conversion of the base unit itself
    pub fn identity() -> Self {
        Conversion { kind: Kind::Identity }
    }

    /// Proportional conversion: base = value * scale
    pub fn linear(scale: Number) -> Result<Self, NumberError> {
        Self::affine(scale, Number::zero())
    }

    /// Offset applied after scaling: base = value * scale + offset
    pub fn affine(scale: Number, offset: Number) -> Result<Self, NumberError> {
        let inverse = Number::one().checked_div(&scale)?;
        Ok(Conversion { kind: Kind::Linear { scale, offset, inverse } })
    }

    /// Offset applied before scaling: base = (value + offset) * scale
    ///
    /// Natural for units whose zero point is defined in their own terms,
    /// e.g. Fahrenheit: K = (°F + 459.67) * 5/9.
    pub fn shifted(offset: Number, scale: Number) -> Result<Self, NumberError> {
        let inverse = Number::one().checked_div(&scale)?;
        Ok(Conversion { kind: Kind::Shifted { offset, scale, inverse } })
    }

    /// Arbitrary function pair; the functions must be mutual inverses
    pub fn custom(to_base: fn(&Number) -> Number, from_base: fn(&Number) -> Number) -> Self {
        Conversion { kind: Kind::Custom { to_base, from_base } }
    }

    pub fn to_base(&self, value: &Number) -> Number {
        match &self.kind {
            Kind::Identity => value.clone(),
            Kind::Linear { scale, offset, .. } => value.mul(scale).add(offset),
            Kind::Shifted { offset, scale, .. } => value.add(offset).mul(scale),
            Kind::Custom { to_base, .. } => to_base(value),
        }
    }

    pub fn from_base(&self, base: &Number) -> Number {
        match &self.kind {
            Kind::Identity => base.clone(),
            Kind::Linear { offset, inverse, .. } => base.sub(offset).mul(inverse),
            Kind::Shifted { offset, inverse, .. } => base.mul(inverse).sub(offset),
            Kind::Custom { from_base, .. } => from_base(base),
        }
    }

    /// True when the conversion is a pure scale: zero maps to zero and sums
    /// are preserved, so arithmetic may stay in this unit.
    pub fn is_linear(&self) -> bool {
        match &self.kind {
            Kind::Identity => true,
            Kind::Linear { offset, .. } => offset.is_zero(),
            Kind::Shifted { offset, .. } => offset.is_zero(),
            Kind::Custom { .. } => false,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self.kind, Kind::Identity)
    }
}

/// One registered unit: its tag, display name, abbreviations and conversion
#[derive(Debug, Clone)]
pub struct UnitEntry<U> {
    pub(crate) unit: U,
    pub(crate) name: &'static str,
    pub(crate) abbreviations: Vec<String>,
    pub(crate) conversion: Conversion,
}

impl<U: Copy> UnitEntry<U> {
    pub fn unit(&self) -> U {
        self.unit
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Default display abbreviation (the first registered one)
    pub fn abbreviation(&self) -> &str {
        self.abbreviations.first().map(|s| s.as_str()).unwrap_or("")
    }

    pub fn abbreviations(&self) -> &[String] {
        &self.abbreviations
    }

    pub fn conversion(&self) -> &Conversion {
        &self.conversion
    }
}

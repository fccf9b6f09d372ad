//! Conversion registry - one per dimension, built once, read-only afterwards

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use gauge_core::{LookupMode, Number, QuantityError};
use crate::{Conversion, Dimension, UnitEntry};

/// Registry of the units of one dimension
///
/// Every conversion is routed through the base unit: `convert(v, a, b)` is
/// `b.from_base(a.to_base(v))`. Entries keep registration order.
#[derive(Debug, Clone)]
pub struct ConversionRegistry<U> {
    dimension: Dimension,
    base: U,
    entries: Vec<UnitEntry<U>>,
    by_unit: HashMap<U, usize>,
    by_abbreviation: HashMap<String, U>,
}

impl<U: Copy + Eq + Hash + Debug> ConversionRegistry<U> {
    /// Start a registry; the base unit is registered with the identity conversion
    pub fn builder(
        dimension: Dimension,
        base: U,
        name: &'static str,
        abbreviations: &[&str],
    ) -> ConversionRegistryBuilder<U> {
        let registry = ConversionRegistry {
            dimension,
            base,
            entries: Vec::new(),
            by_unit: HashMap::new(),
            by_abbreviation: HashMap::new(),
        };
        ConversionRegistryBuilder { registry }
            .register(base, name, Conversion::identity(), abbreviations)
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn base_unit(&self) -> U {
        self.base
    }

    pub fn entry(&self, unit: U) -> Option<&UnitEntry<U>> {
        self.by_unit.get(&unit).map(|&i| &self.entries[i])
    }

    /// All entries in registration order
    pub fn entries(&self) -> &[UnitEntry<U>] {
        &self.entries
    }

    pub fn units(&self) -> Vec<U> {
        self.entries.iter().map(|e| e.unit).collect()
    }

    /// Default display abbreviation of a unit
    pub fn abbreviation(&self, unit: U) -> Option<&str> {
        self.entry(unit).map(|e| e.abbreviation())
    }

    pub fn is_linear(&self, unit: U) -> bool {
        self.entry(unit).is_some_and(|e| e.conversion.is_linear())
    }

    fn require(&self, unit: U) -> Result<&UnitEntry<U>, QuantityError> {
        self.entry(unit)
            .ok_or_else(|| QuantityError::unit_not_found(self.dimension.name(), format!("{:?}", unit)))
    }

    pub fn to_base(&self, value: &Number, unit: U) -> Result<Number, QuantityError> {
        Ok(self.require(unit)?.conversion.to_base(value))
    }

    pub fn from_base(&self, base_value: &Number, unit: U) -> Result<Number, QuantityError> {
        Ok(self.require(unit)?.conversion.from_base(base_value))
    }

    /// Convert a value between two units of this dimension
    ///
    /// Identical units return the value unchanged, without a round trip
    /// through the base unit.
    pub fn convert(&self, value: &Number, from: U, to: U) -> Result<Number, QuantityError> {
        let source = self.require(from)?;
        let target = self.require(to)?;
        if from == to {
            return Ok(value.clone());
        }
        Ok(target.conversion.from_base(&source.conversion.to_base(value)))
    }

    /// Resolve an abbreviation to a unit
    ///
    /// `CaseSensitive` accepts exact matches only. `CaseInsensitive` still
    /// prefers an exact match, then accepts a single case-insensitive
    /// candidate and reports every candidate when there are several.
    pub fn lookup(&self, text: &str, mode: LookupMode) -> Result<U, QuantityError> {
        let text = text.trim();

        if let Some(unit) = self.by_abbreviation.get(text) {
            return Ok(*unit);
        }

        if mode == LookupMode::CaseSensitive {
            return Err(QuantityError::unit_not_found(self.dimension.name(), text));
        }

        let lowered = text.to_lowercase();
        let candidates: Vec<&UnitEntry<U>> = self.entries.iter()
            .filter(|entry| {
                entry.abbreviations.iter().any(|abbr| {
                    abbr.to_lowercase() == lowered && self.by_abbreviation.get(abbr) == Some(&entry.unit)
                })
            })
            .collect();

        match candidates.as_slice() {
            [] => Err(QuantityError::unit_not_found(self.dimension.name(), text)),
            [only] => Ok(only.unit),
            many => Err(QuantityError::AmbiguousAbbreviation {
                dimension: self.dimension.name().to_string(),
                abbreviation: text.to_string(),
                candidates: many.iter().map(|e| e.name.to_string()).collect(),
            }),
        }
    }
}

/// Builder for a [`ConversionRegistry`]
pub struct ConversionRegistryBuilder<U> {
    registry: ConversionRegistry<U>,
}

impl<U: Copy + Eq + Hash + Debug> ConversionRegistryBuilder<U> {
    /// Register a unit with its conversion and abbreviations
    ///
    /// Re-registering a unit replaces its entry. An abbreviation already
    /// taken by another unit is reassigned to this one (last registered
    /// wins); the collision is logged as a defect in the unit table.
    pub fn register(
        mut self,
        unit: U,
        name: &'static str,
        conversion: Conversion,
        abbreviations: &[&str],
    ) -> Self {
        let dimension = self.registry.dimension;
        let entry = UnitEntry {
            unit,
            name,
            abbreviations: abbreviations.iter().map(|a| a.to_string()).collect(),
            conversion,
        };

        for abbr in abbreviations {
            if let Some(previous) = self.registry.by_abbreviation.insert(abbr.to_string(), unit) {
                if previous != unit {
                    tracing::warn!(
                        %dimension,
                        abbreviation = %abbr,
                        previous = ?previous,
                        unit = ?unit,
                        "abbreviation registered twice, last registration wins"
                    );
                }
            }
        }

        match self.registry.by_unit.get(&unit) {
            Some(&index) => {
                tracing::warn!(%dimension, unit = ?unit, "unit registered twice, replacing entry");
                self.registry.entries[index] = entry;
            }
            None => {
                self.registry.by_unit.insert(unit, self.registry.entries.len());
                self.registry.entries.push(entry);
            }
        }

        self
    }

    /// Register a unit whose conversion is built from a fallible expression,
    /// reporting a bad scale as an invalid conversion of that unit
    pub fn try_register(
        self,
        unit: U,
        name: &'static str,
        conversion: Result<Conversion, gauge_core::NumberError>,
        abbreviations: &[&str],
    ) -> Result<Self, QuantityError> {
        let conversion = conversion.map_err(|e| QuantityError::InvalidConversion {
            unit: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self.register(unit, name, conversion, abbreviations))
    }

    pub fn build(self) -> ConversionRegistry<U> {
        tracing::debug!(
            dimension = %self.registry.dimension,
            units = self.registry.entries.len(),
            "built conversion registry"
        );
        self.registry
    }
}

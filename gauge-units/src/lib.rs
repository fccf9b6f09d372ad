//! Gauge Units - Typed physical quantities and unit conversion
//!
//! Each dimension is a unit enum plus a registry of conversions to and from
//! its base unit. `Quantity<U>` pairs a magnitude with a unit of that
//! dimension, so mixing dimensions is a compile error.
//!
//! Dimensions:
//! - Angle (rad, °, g, ′, ″, rev)
//! - Ratio (decimal fraction, %, ‰, ppm, ppb, ppt)
//! - Temperature (K, °C, °F, °R)
//!
//! ```
//! use gauge_units::prelude::*;
//!
//! let share = 25i32.percent();
//! assert_eq!(share.decimal_fractions().to_string(), "0.25");
//! assert_eq!(share.to_string(), "25 %");
//!
//! let boiling: Temperature = "100 °C".parse().unwrap();
//! assert_eq!(boiling.kelvins().to_string(), "373.15");
//! ```

#[macro_use]
mod macros;

mod dimension;
mod unit;
mod registry;
mod extensions;
mod quantity;
mod any;
mod parse;
mod units;

pub use dimension::Dimension;
pub use unit::{Conversion, UnitEntry, UnitKind};
pub use registry::{ConversionRegistry, ConversionRegistryBuilder};
pub use extensions::{MagnitudeSource, ToMagnitude};
pub use quantity::{Quantity, Tolerance, ToleranceKind};
pub use any::AnyQuantity;
pub use parse::{parse_quantity, split_quantity};
pub use units::{
    Angle, AngleUnit, NumberToAngle,
    Ratio, RatioUnit, NumberToRatio,
    Temperature, TemperatureUnit, NumberToTemperature,
};

pub use gauge_core::{codes, LookupMode, Number, NumberError, NumberFormat, QuantityError, Settings};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AnyQuantity, Quantity, Tolerance, UnitKind,
        Angle, AngleUnit, NumberToAngle,
        Ratio, RatioUnit, NumberToRatio,
        Temperature, TemperatureUnit, NumberToTemperature,
    };
    pub use gauge_core::prelude::*;
}

/// Properties every dimension must satisfy, checked generically
#[cfg(test)]
mod harness {
    use super::*;
    use std::cmp::Ordering;

    fn n(s: &str) -> Number {
        Number::from_str(s).unwrap()
    }

    fn assert_close(actual: &Number, expected: &Number, tolerance: &Number, context: &str) {
        let diff = actual.sub(expected).abs();
        assert!(
            diff <= *tolerance,
            "{}: expected {} ± {}, got {}",
            context, expected, tolerance, actual
        );
    }

    fn check_registry_complete<U: UnitKind>() {
        let registry = U::registry();
        assert_eq!(registry.dimension(), U::DIMENSION);
        assert_eq!(registry.base_unit(), U::BASE);
        assert_eq!(registry.units(), U::all().to_vec(), "{} registry order", U::DIMENSION);

        let identities: Vec<U> = registry.entries().iter()
            .filter(|e| e.conversion().is_identity())
            .map(|e| e.unit())
            .collect();
        assert_eq!(identities, vec![U::BASE], "{} must have exactly one base unit", U::DIMENSION);
    }

    fn check_round_trip<U: UnitKind>(tolerance: &Number) {
        let value = n("12.5");
        for &from in U::all() {
            let q = Quantity::new(value.clone(), from);
            assert_eq!(q.as_unit(from), value, "{:?} read back in its own unit", from);

            for &to in U::all() {
                let there = q.as_unit(to);
                let back = Quantity::new(there, to).as_unit(from);
                assert_close(&back, &value, tolerance, &format!("{:?} -> {:?} -> {:?}", from, to, from));
            }
        }
    }

    fn check_identity_and_additive_identity<U: UnitKind>() {
        let zero = Quantity::<U>::zero();
        assert_eq!(zero.unit(), U::BASE);
        assert!(zero.value().is_zero());

        for &unit in U::all() {
            let q = Quantity::new(n("7.25"), unit);
            assert_eq!(&q + &zero, q, "{:?} + 0", unit);
            assert_eq!(&q - &q, zero, "{:?} - itself", unit);
        }
    }

    fn check_scalar_arithmetic<U: UnitKind>(tolerance: &Number) {
        for &unit in U::all() {
            let ten = Quantity::new(n("10"), unit);
            let five = Quantity::new(n("5"), unit);

            let sum = &ten + &five;
            let distributed = ten.scale(3).unwrap() + five.scale(3).unwrap();
            assert_close(
                &sum.scale(3).unwrap().base_value(),
                &distributed.base_value(),
                tolerance,
                &format!("{:?} distributivity", unit),
            );

            // Offset units divide absolute magnitudes, so only offset-free units give 2
            let expected = if U::registry().is_linear(unit) {
                n("2")
            } else {
                ten.base_value().checked_div(&five.base_value()).unwrap()
            };
            assert_eq!(&ten / &five, expected, "{:?} 10/5", unit);
            let halved = ten.checked_div_scalar(2).unwrap();
            assert_close(&halved.scale(2).unwrap().base_value(), &ten.base_value(), tolerance, "halve then double");
        }
    }

    fn check_ordering<U: UnitKind>() {
        for &unit in U::all() {
            let small = Quantity::new(n("1"), unit);
            let large = Quantity::new(n("2"), unit);
            assert!(small < large);
            assert_eq!(small.cmp(&large), Ordering::Less);
            assert_eq!(large.cmp(&small), Ordering::Greater);
            assert_eq!(small.cmp(&small.clone()), Ordering::Equal);
            assert_eq!(small.compare_to(Some(&large)).unwrap(), Ordering::Less);
        }
    }

    fn check_dynamic_comparison<U: UnitKind>() {
        let q = Quantity::new(n("1"), U::BASE);
        assert!(matches!(q.compare_to(None), Err(QuantityError::NullArgument(_))));
        assert!(matches!(q.compare_to(Some(&"text")), Err(QuantityError::TypeMismatch { .. })));
        assert!(!q.equals_any(None));
        assert!(!q.equals_any(Some(&1.0f64)));
        assert!(q.equals_any(Some(&q.clone())));
    }

    fn check_parse_round_trip<U: UnitKind>() {
        for entry in U::registry().entries() {
            for abbreviation in entry.abbreviations() {
                let text = format!("{} {}", "-3.75", abbreviation);
                let q = Quantity::<U>::parse_with(&text, LookupMode::CaseSensitive)
                    .unwrap_or_else(|e| panic!("parsing {:?}: {}", text, e));
                assert_eq!(q.unit(), entry.unit());
                assert_eq!(q.value(), &n("-3.75"));
            }

            let q = Quantity::new(n("42.125"), entry.unit());
            let parsed: Quantity<U> = q.to_string().parse().unwrap();
            assert_eq!(parsed.unit(), q.unit());
            assert_eq!(parsed.value(), q.value());
        }

        assert!(matches!(
            Quantity::<U>::parse_with("1 no-such-unit", LookupMode::CaseSensitive),
            Err(QuantityError::UnitNotFound { .. })
        ));
        assert!(matches!(
            Quantity::<U>::parse_with("not a number", LookupMode::CaseSensitive),
            Err(QuantityError::Format(_))
        ));
    }

    fn check_serde<U: UnitKind + serde::Serialize + serde::de::DeserializeOwned>() {
        for &unit in U::all() {
            let q = Quantity::new(n("-0.5"), unit);
            let json = serde_json::to_string(&q).unwrap();
            let back: Quantity<U> = serde_json::from_str(&json).unwrap();
            assert_eq!(back.unit(), unit);
            assert_eq!(back.value(), q.value());
        }
    }

    fn check_dimension<U: UnitKind + serde::Serialize + serde::de::DeserializeOwned>(tolerance: &str) {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let tolerance = n(tolerance);

        check_registry_complete::<U>();
        check_round_trip::<U>(&tolerance);
        check_identity_and_additive_identity::<U>();
        check_scalar_arithmetic::<U>(&tolerance);
        check_ordering::<U>();
        check_dynamic_comparison::<U>();
        check_parse_round_trip::<U>();
        check_serde::<U>();
    }

    #[test]
    fn test_angle() {
        check_dimension::<AngleUnit>("1e-40");
    }

    #[test]
    fn test_ratio() {
        check_dimension::<RatioUnit>("1e-40");
    }

    #[test]
    fn test_temperature() {
        check_dimension::<TemperatureUnit>("1e-40");
    }

    #[test]
    fn test_dimensions_do_not_mix() {
        let angle = Angle::from_degrees(1).unwrap().erase();
        let ratio = Ratio::from_percent(1).unwrap().erase();
        let err = angle.try_cmp(&ratio).unwrap_err();
        assert_eq!(err.code(), codes::DIMENSION_MISMATCH);
        assert!(err.suggestion().is_some());
    }
}

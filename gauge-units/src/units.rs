//! Built-in dimensions: Angle, Ratio, Temperature

use gauge_core::Number;
use crate::Conversion;

/// Scale `pi / divisor`, for angle units defined as fractions of a half turn
fn pi_over(precision: usize, divisor: i64) -> Result<Conversion, gauge_core::NumberError> {
    Number::pi(precision)
        .checked_div(&Number::from_i64(divisor))
        .and_then(Conversion::linear)
}

fn decimal_scale(scale: &str) -> Result<Conversion, gauge_core::NumberError> {
    Number::from_str(scale).and_then(Conversion::linear)
}

define_dimension! {
    /// Plane angle; base unit radian
    quantity: Angle,
    unit: AngleUnit,
    extension: NumberToAngle,
    dimension: "Angle",
    precision: precision,
    base: Radian {
        name: "Radian",
        abbreviations: ["rad"],
        factory: from_radians,
        accessor: radians,
        extension: radians,
    },
    units: {
        Degree {
            name: "Degree",
            abbreviations: ["°", "deg"],
            conversion: pi_over(precision, 180),
            factory: from_degrees,
            accessor: degrees,
            extension: degrees,
        },
        Gradian {
            name: "Gradian",
            abbreviations: ["g", "gon"],
            conversion: pi_over(precision, 200),
            factory: from_gradians,
            accessor: gradians,
            extension: gradians,
        },
        Arcminute {
            name: "Arcminute",
            abbreviations: ["′", "arcmin"],
            conversion: pi_over(precision, 10_800),
            factory: from_arcminutes,
            accessor: arcminutes,
            extension: arcminutes,
        },
        Arcsecond {
            name: "Arcsecond",
            abbreviations: ["″", "arcsec"],
            conversion: pi_over(precision, 648_000),
            factory: from_arcseconds,
            accessor: arcseconds,
            extension: arcseconds,
        },
        Revolution {
            name: "Revolution",
            abbreviations: ["r", "rev"],
            conversion: Conversion::linear(Number::pi(precision).mul(&Number::from_i64(2))),
            factory: from_revolutions,
            accessor: revolutions,
            extension: revolutions,
        },
    },
}

define_dimension! {
    /// Dimensionless ratio; base unit decimal fraction (1 = whole)
    quantity: Ratio,
    unit: RatioUnit,
    extension: NumberToRatio,
    dimension: "Ratio",
    precision: precision,
    base: DecimalFraction {
        name: "DecimalFraction",
        abbreviations: [""],
        factory: from_decimal_fractions,
        accessor: decimal_fractions,
        extension: decimal_fractions,
    },
    units: {
        PartPerBillion {
            name: "PartPerBillion",
            abbreviations: ["ppb"],
            conversion: decimal_scale("1e-9"),
            factory: from_parts_per_billion,
            accessor: parts_per_billion,
            extension: parts_per_billion,
        },
        PartPerMillion {
            name: "PartPerMillion",
            abbreviations: ["ppm"],
            conversion: decimal_scale("1e-6"),
            factory: from_parts_per_million,
            accessor: parts_per_million,
            extension: parts_per_million,
        },
        PartPerThousand {
            name: "PartPerThousand",
            abbreviations: ["‰"],
            conversion: decimal_scale("0.001"),
            factory: from_parts_per_thousand,
            accessor: parts_per_thousand,
            extension: parts_per_thousand,
        },
        PartPerTrillion {
            name: "PartPerTrillion",
            abbreviations: ["ppt"],
            conversion: decimal_scale("1e-12"),
            factory: from_parts_per_trillion,
            accessor: parts_per_trillion,
            extension: parts_per_trillion,
        },
        Percent {
            name: "Percent",
            abbreviations: ["%"],
            conversion: decimal_scale("0.01"),
            factory: from_percent,
            accessor: percent,
            extension: percent,
        },
    },
}

define_dimension! {
    /// Thermodynamic temperature; base unit kelvin
    ///
    /// Celsius and Fahrenheit carry offsets, so arithmetic on them is done
    /// on absolute temperatures and the result is expressed in kelvin.
    quantity: Temperature,
    unit: TemperatureUnit,
    extension: NumberToTemperature,
    dimension: "Temperature",
    precision: precision,
    base: Kelvin {
        name: "Kelvin",
        abbreviations: ["K"],
        factory: from_kelvins,
        accessor: kelvins,
        extension: kelvins,
    },
    units: {
        DegreeCelsius {
            name: "DegreeCelsius",
            abbreviations: ["°C"],
            conversion: Number::from_str("273.15")
                .and_then(|offset| Conversion::affine(Number::one(), offset)),
            factory: from_degrees_celsius,
            accessor: degrees_celsius,
            extension: degrees_celsius,
        },
        DegreeFahrenheit {
            name: "DegreeFahrenheit",
            abbreviations: ["°F"],
            // K = (°F + 459.67) * 5/9
            conversion: Number::from_str("459.67")
                .and_then(|offset| Conversion::shifted(offset, Number::from_ratio(5, 9)?)),
            factory: from_degrees_fahrenheit,
            accessor: degrees_fahrenheit,
            extension: degrees_fahrenheit,
        },
        DegreeRankine {
            name: "DegreeRankine",
            abbreviations: ["°R"],
            conversion: Number::from_ratio(5, 9).and_then(Conversion::linear),
            factory: from_degrees_rankine,
            accessor: degrees_rankine,
            extension: degrees_rankine,
        },
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tolerance, UnitKind};

    fn n(s: &str) -> Number {
        Number::from_str(s).unwrap()
    }

    fn assert_close(actual: Number, expected: &str, tolerance: &str) {
        let diff = actual.sub(&n(expected)).abs();
        assert!(diff <= n(tolerance), "expected {} ± {}, got {}", expected, tolerance, actual);
    }

    #[test]
    fn test_one_degree() {
        let degree = Angle::from_degrees(1).unwrap();
        assert_eq!(degree.degrees(), Number::one());
        assert_close(degree.gradians(), "1.111111", "1e-5");
        assert_close(degree.radians(), "0.0174533", "1e-5");
        assert_close(degree.arcminutes(), "60", "1e-40");
        assert_close(degree.arcseconds(), "3600", "1e-40");
    }

    #[test]
    fn test_factories_round_trip() {
        assert_eq!(Angle::from_degrees(1).unwrap().degrees(), Number::one());
        assert_eq!(Angle::from_gradians(1).unwrap().gradians(), Number::one());
        assert_eq!(Angle::from_radians(1).unwrap().radians(), Number::one());

        let degree = Angle::from_degrees(1).unwrap();
        assert_close(Angle::from_gradians(degree.gradians()).unwrap().degrees(), "1", "1e-5");
        assert_close(Angle::from_radians(degree.radians()).unwrap().degrees(), "1", "1e-5");
    }

    #[test]
    fn test_angle_arithmetic() {
        let v = Angle::from_degrees(1).unwrap();
        assert_eq!((-v.clone()).degrees(), n("-1"));
        assert_eq!((Angle::from_degrees(3).unwrap() - v.clone()).degrees(), n("2"));
        assert_eq!((v.clone() + v.clone()).degrees(), n("2"));
        assert_eq!((v.clone() * 10i32).degrees(), n("10"));
        assert_eq!((10i32 * v.clone()).degrees(), n("10"));
        assert_eq!((Angle::from_degrees(10).unwrap() / 5i32).degrees(), n("2"));
        assert_eq!(Angle::from_degrees(10).unwrap() / Angle::from_degrees(5).unwrap(), n("2"));
    }

    #[test]
    fn test_revolution() {
        let half = Angle::from_revolutions(0.5).unwrap();
        assert_close(half.degrees(), "180", "1e-40");
        assert_close(half.radians(), "3.14159265358979323846", "1e-20");
    }

    #[test]
    fn test_temperature_offsets() {
        let freezing = Temperature::from_degrees_celsius(0).unwrap();
        assert_eq!(freezing.kelvins(), n("273.15"));
        assert_close(freezing.degrees_fahrenheit(), "32", "1e-40");
        assert_close(freezing.degrees_rankine(), "491.67", "1e-40");

        let body = Temperature::from_degrees_fahrenheit(98.6).unwrap();
        assert_close(body.degrees_celsius(), "37", "1e-40");

        assert_close(Temperature::from_degrees_fahrenheit(32).unwrap().degrees_celsius(), "0", "1e-40");
        assert_eq!(Temperature::from_kelvins(0).unwrap().degrees_celsius(), n("-273.15"));

        let tolerance = Tolerance::absolute(n("1e-40")).unwrap();
        assert!(freezing.approx_eq(&Temperature::from_degrees_fahrenheit(32).unwrap(), &tolerance));
    }

    #[test]
    fn test_temperature_linearity() {
        let registry = TemperatureUnit::registry();
        assert!(registry.is_linear(TemperatureUnit::Kelvin));
        assert!(registry.is_linear(TemperatureUnit::DegreeRankine));
        assert!(!registry.is_linear(TemperatureUnit::DegreeCelsius));
        assert!(!registry.is_linear(TemperatureUnit::DegreeFahrenheit));
    }

    #[test]
    fn test_ratio_scale() {
        let whole = Ratio::from_decimal_fractions(1).unwrap();
        assert_eq!(whole.percent(), n("100"));
        assert_eq!(whole.parts_per_thousand(), n("1000"));
        assert_eq!(whole.parts_per_million(), n("1000000"));
        assert_eq!(whole.parts_per_billion(), n("1000000000"));
        assert_eq!(whole.parts_per_trillion(), n("1000000000000"));

        assert_eq!(whole, Ratio::from_percent(100).unwrap());
        assert_eq!(whole, Ratio::from_parts_per_million(1_000_000).unwrap());
        assert_eq!(Ratio::from_percent(12.5).unwrap().decimal_fractions(), n("0.125"));
    }

    #[test]
    fn test_extension_traits() {
        assert_eq!(5i32.degrees(), Angle::from_degrees(5).unwrap());
        assert_eq!(5i64.gradians().unit(), AngleUnit::Gradian);
        assert_eq!(7u32.percent(), Ratio::from_percent(7).unwrap());
        assert_eq!(u64::MAX.parts_per_trillion().unit(), RatioUnit::PartPerTrillion);
        assert_eq!(Number::from_i64(20).degrees_celsius().kelvins(), n("293.15"));

        assert_eq!(12.5f64.percent().unwrap(), Ratio::from_percent(12.5).unwrap());
        assert_eq!(0.5f32.revolutions().unwrap().unit(), AngleUnit::Revolution);
        assert!(f64::NAN.kelvins().is_err());

        assert_eq!(Some(3i32).radians(), Some(Angle::from_radians(3).unwrap()));
        assert_eq!(None::<i32>.radians(), None);
        assert_eq!(Some(1.5f64).kelvins().unwrap(), Some(Temperature::from_kelvins(1.5).unwrap()));
        assert_eq!(None::<f64>.kelvins().unwrap(), None);
        assert!(Some(f64::INFINITY).kelvins().is_err());
    }

    #[test]
    fn test_unit_names() {
        assert_eq!(AngleUnit::Degree.to_string(), "Degree");
        assert_eq!(RatioUnit::PartPerMillion.name(), "PartPerMillion");
        assert_eq!(TemperatureUnit::all().len(), 4);
        assert_eq!(AngleUnit::BASE, AngleUnit::Radian);
        assert_eq!(RatioUnit::DIMENSION.name(), "Ratio");
    }

    #[test]
    fn test_build_registry_with_settings() {
        let settings = gauge_core::Settings::new().with_precision(80);
        let registry = AngleUnit::build_registry(&settings).unwrap();
        let radians = registry.convert(&Number::from_i64(180), AngleUnit::Degree, AngleUnit::Radian).unwrap();
        let pi_75 = "3.141592653589793238462643383279502884197169399375105820974944592307816406286";
        assert_close(radians.clone(), pi_75, "1e-70");
        assert!(radians.sub(&Number::pi(50)).abs() > n("1e-60"));
    }
}

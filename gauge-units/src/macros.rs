//! Declarative dimension tables
//!
//! `define_dimension!` turns one table (quantity name, unit enum, base unit,
//! per-unit conversion and abbreviations, method names) into:
//! - a `Quantity<Unit>` alias,
//! - the unit enum with its [`UnitKind`](crate::UnitKind) impl and lazily built registry,
//! - `from_x` factories and `x()` accessors on the quantity,
//! - a blanket extension trait for numeric sources (`5.degrees()`).
//!
//! Each `conversion` is an expression of type `Result<Conversion, NumberError>`.
//! The `precision` identifier names the working precision (from
//! [`Settings`](gauge_core::Settings)) inside those expressions.

macro_rules! define_dimension {
    (
        $(#[$meta:meta])*
        quantity: $quantity:ident,
        unit: $unit:ident,
        extension: $ext:ident,
        dimension: $dim:literal,
        precision: $prec:ident,
        base: $base:ident {
            name: $base_name:literal,
            abbreviations: [$($base_abbr:literal),* $(,)?],
            factory: $base_factory:ident,
            accessor: $base_accessor:ident,
            extension: $base_ext:ident $(,)?
        },
        units: {
            $(
                $variant:ident {
                    name: $name:literal,
                    abbreviations: [$($abbr:literal),* $(,)?],
                    conversion: $conv:expr,
                    factory: $factory:ident,
                    accessor: $accessor:ident,
                    extension: $extension:ident $(,)?
                }
            ),* $(,)?
        } $(,)?
    ) => {
        $(#[$meta])*
        pub type $quantity = $crate::Quantity<$unit>;

        #[doc = concat!("Units of ", $dim)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $unit {
            #[doc = concat!($base_name, " (base unit)")]
            $base,
            $(
                #[doc = $name]
                $variant,
            )*
        }

        impl $unit {
            const ALL: &'static [$unit] = &[$unit::$base, $($unit::$variant),*];

            pub fn name(&self) -> &'static str {
                match self {
                    $unit::$base => $base_name,
                    $($unit::$variant => $name,)*
                }
            }

            /// Build this dimension's registry with explicit settings
            pub fn build_registry(
                settings: &$crate::Settings,
            ) -> Result<$crate::ConversionRegistry<$unit>, $crate::QuantityError> {
                #[allow(unused_variables)]
                let $prec = settings.precision;
                let builder = $crate::ConversionRegistry::builder(
                    <$unit as $crate::UnitKind>::DIMENSION,
                    $unit::$base,
                    $base_name,
                    &[$($base_abbr),*],
                );
                $(
                    let builder = builder.try_register($unit::$variant, $name, $conv, &[$($abbr),*])?;
                )*
                Ok(builder.build())
            }
        }

        impl ::std::fmt::Display for $unit {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl $crate::UnitKind for $unit {
            const DIMENSION: $crate::Dimension = $crate::Dimension::new($dim);
            const BASE: Self = $unit::$base;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn registry() -> &'static $crate::ConversionRegistry<Self> {
                static REGISTRY: ::std::sync::LazyLock<$crate::ConversionRegistry<$unit>> =
                    ::std::sync::LazyLock::new(|| {
                        match $unit::build_registry($crate::Settings::global()) {
                            Ok(registry) => registry,
                            Err(e) => panic!("invalid {} unit table: {}", $dim, e),
                        }
                    });
                &REGISTRY
            }
        }

        impl $crate::Quantity<$unit> {
            #[doc = concat!("Create from a value in ", $base_name)]
            pub fn $base_factory(value: impl $crate::ToMagnitude) -> Result<Self, $crate::QuantityError> {
                Self::from_value(value, $unit::$base)
            }

            #[doc = concat!("Magnitude in ", $base_name)]
            pub fn $base_accessor(&self) -> $crate::Number {
                self.as_unit($unit::$base)
            }

            $(
                #[doc = concat!("Create from a value in ", $name)]
                pub fn $factory(value: impl $crate::ToMagnitude) -> Result<Self, $crate::QuantityError> {
                    Self::from_value(value, $unit::$variant)
                }

                #[doc = concat!("Magnitude in ", $name)]
                pub fn $accessor(&self) -> $crate::Number {
                    self.as_unit($unit::$variant)
                }
            )*
        }

        #[doc = concat!("Numeric sources convertible to ", $dim)]
        pub trait $ext: $crate::MagnitudeSource + Sized {
            fn $base_ext(self) -> Self::Output<$quantity> {
                self.into_quantity($unit::$base)
            }

            $(
                fn $extension(self) -> Self::Output<$quantity> {
                    self.into_quantity($unit::$variant)
                }
            )*
        }

        impl<T: $crate::MagnitudeSource> $ext for T {}
    };
}

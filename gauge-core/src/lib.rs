//! Gauge Core - Fundamental types
//!
//! This crate provides the core types used throughout Gauge:
//! - `Number`: Arbitrary precision decimal magnitudes
//! - `QuantityError`: Typed failures for quantity operations
//! - `Settings`: Precision, lookup and formatting configuration

mod number;
mod error;
mod settings;

pub use number::{Number, NumberError, DEFAULT_PRECISION};
pub use error::{QuantityError, codes};
pub use settings::{Settings, LookupMode, NumberFormat, PRECISION_VAR, LOOKUP_VAR};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, QuantityError, Settings, LookupMode, NumberFormat};
    pub use crate::error::codes;
}

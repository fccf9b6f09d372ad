//! Quantity text parsing: "<number> <abbreviation>"
//!
//! The leading numeric token is an optionally signed decimal with an
//! optional exponent ("-12.5", "1e-6", "+3"). Whatever follows, with
//! surrounding whitespace removed, is the abbreviation; it may be empty for
//! units displayed without one.

use std::fmt::Debug;
use std::hash::Hash;
use gauge_core::{LookupMode, Number, QuantityError};
use crate::ConversionRegistry;

/// Split text into its numeric token and the remainder
pub fn split_quantity(text: &str) -> Result<(&str, &str), QuantityError> {
    let text = text.trim();
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        digits += pos - frac_start;
    }

    if digits == 0 {
        return Err(QuantityError::Format(format!("expected a number at the start of '{}'", text)));
    }

    // Exponent only when digits follow, so "2 e" keeps "e" as the abbreviation
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            pos = exp;
        }
    }

    let (number, rest) = text.split_at(pos);
    if rest.starts_with(|c: char| c.is_ascii_digit() || c == '.' || c == '/') {
        return Err(QuantityError::Format(format!("malformed number in '{}'", text)));
    }

    Ok((number, rest.trim()))
}

/// Parse text into a magnitude and a unit of `registry`'s dimension
pub fn parse_quantity<U: Copy + Eq + Hash + Debug>(
    text: &str,
    registry: &ConversionRegistry<U>,
    mode: LookupMode,
) -> Result<(Number, U), QuantityError> {
    let result = split_quantity(text).and_then(|(number, abbreviation)| {
        let value = Number::from_str(number)?;
        let unit = registry.lookup(abbreviation, mode)?;
        Ok((value, unit))
    });

    if let Err(err) = &result {
        tracing::trace!(dimension = %registry.dimension(), input = text, error = %err, "quantity parse failed");
    }
    result
}

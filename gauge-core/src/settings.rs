//! Library settings
//!
//! Settings are read once from the environment on first use
//! ([`Settings::global`]) and are immutable afterwards. Callers that need
//! different behaviour build their own [`Settings`] and pass it explicitly.

use crate::Number;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::LazyLock;

pub const PRECISION_VAR: &str = "GAUGE_PRECISION";
pub const LOOKUP_VAR: &str = "GAUGE_LOOKUP";

/// Smallest working precision accepted from configuration
const MIN_PRECISION: usize = 17;

static GLOBAL: LazyLock<Settings> = LazyLock::new(Settings::from_env);

/// How abbreviations are matched when resolving a unit from text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    /// Exact, case-sensitive match only
    #[default]
    CaseSensitive,
    /// Exact match first, then a unique case-insensitive match.
    /// More than one case-insensitive candidate is an error, never a guess.
    CaseInsensitive,
}

impl FromStr for LookupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "case-sensitive" | "sensitive" | "exact" => Ok(LookupMode::CaseSensitive),
            "case-insensitive" | "insensitive" | "ignore-case" => Ok(LookupMode::CaseInsensitive),
            other => Err(format!("unknown lookup mode: {}", other)),
        }
    }
}

/// How a magnitude is rendered as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// Lossless decimal text; parses back to the identical value
    #[default]
    Exact,
    /// Fixed number of decimal places
    Decimal(u32),
    SignificantFigures(u32),
}

impl NumberFormat {
    pub fn render(&self, value: &Number) -> String {
        match self {
            NumberFormat::Exact => value.to_exact_string(),
            NumberFormat::Decimal(places) => value.as_decimal(*places),
            NumberFormat::SignificantFigures(n) => value.as_sigfigs(*n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Working precision (significant digits) for derived constants such as pi
    pub precision: usize,
    /// Default abbreviation lookup for parsing
    pub lookup: LookupMode,
    /// Default rendering for formatted quantities
    pub format: NumberFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            precision: crate::number::DEFAULT_PRECISION,
            lookup: LookupMode::default(),
            format: NumberFormat::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision.max(MIN_PRECISION);
        self
    }

    pub fn with_lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }

    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Process-wide settings, read from the environment on first access
    pub fn global() -> &'static Settings {
        &GLOBAL
    }

    /// Read `GAUGE_PRECISION` and `GAUGE_LOOKUP`; invalid values fall back to defaults
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    fn from_source(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = get(PRECISION_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(p) if p >= MIN_PRECISION => settings.precision = p,
                _ => tracing::warn!(
                    var = PRECISION_VAR,
                    value = %raw,
                    min = MIN_PRECISION,
                    "ignoring invalid precision setting"
                ),
            }
        }

        if let Some(raw) = get(LOOKUP_VAR) {
            match raw.parse::<LookupMode>() {
                Ok(mode) => settings.lookup = mode,
                Err(e) => tracing::warn!(var = LOOKUP_VAR, error = %e, "ignoring invalid lookup setting"),
            }
        }

        settings
    }
}

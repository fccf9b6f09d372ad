//! Dimension identity
//!
//! Each physical quantity kind (angle, ratio, temperature) has exactly one
//! family of mutually convertible units. The [`Dimension`] tag identifies
//! that family at runtime, for type-erased quantities and error messages.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Dimension(&'static str);

impl Dimension {
    pub const fn new(name: &'static str) -> Self {
        Dimension(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

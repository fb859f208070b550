//! Error types for time-scale conversions.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from Julian Day ↔ civil conversions.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// Julian Day is not finite or outside the range `chrono` can represent.
    OutOfRange(f64),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(jd) => write!(f, "Julian Day {jd} outside representable range"),
        }
    }
}

impl Error for TimeError {}

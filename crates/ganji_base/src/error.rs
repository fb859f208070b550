//! Error type for symbol parsing.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from parsing calendar symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BaseError {
    /// Text is not a known stem, branch, pair, or solar-term name.
    UnknownSymbol(String),
    /// Stem and branch have different yin/yang parity.
    ParityMismatch,
}

impl Display for BaseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSymbol(s) => write!(f, "unknown calendar symbol: {s:?}"),
            Self::ParityMismatch => write!(f, "stem and branch differ in parity"),
        }
    }
}

impl Error for BaseError {}

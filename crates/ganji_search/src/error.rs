//! Error types for solar-term search and table operations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use ganji_base::Jieqi;
use ganji_time::TimeError;

/// Errors from locating solar terms or reading the solar-term table.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// The longitude target was not bracketed by the search window.
    AstronomicalSearch { year: i32, term: Jieqi },
    /// Year outside the range covered by the table.
    UnsupportedYear(i32),
    /// A year's events failed validation.
    DataQuality { year: i32, reason: String },
    /// Year is covered but the term is absent.
    NotFound { year: i32, term: Jieqi },
    /// Invalid configuration parameter.
    InvalidConfig(&'static str),
    /// File read or write failure.
    Io(String),
    /// Malformed table data.
    Parse(String),
    /// Time conversion failure.
    Time(TimeError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AstronomicalSearch { year, term } => {
                write!(f, "solar longitude {}° not bracketed for {term} of {year}", term.longitude_deg())
            }
            Self::UnsupportedYear(y) => write!(f, "year {y} outside the solar-term table"),
            Self::DataQuality { year, reason } => {
                write!(f, "solar-term data for {year} failed validation: {reason}")
            }
            Self::NotFound { year, term } => write!(f, "no {term} entry for {year}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Time(e) => write!(f, "time error: {e}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Time(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TimeError> for SearchError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

impl From<std::io::Error> for SearchError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

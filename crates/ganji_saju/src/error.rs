//! Error types for pillar and fortune calculation.

use std::error::Error;
use std::fmt::{Display, Formatter};

use ganji_search::SearchError;

/// Errors from pillar and fortune calculation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SajuError {
    /// Solar-term table failure other than an uncovered year.
    Search(SearchError),
    /// A year the calculation needs lies outside the solar-term table.
    UnsupportedYear(i32),
    InvalidGender(String),
    /// Unparsable or out-of-range civil date-time.
    InvalidDate(String),
    InvalidConfig(&'static str),
}

impl Display for SajuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "solar-term error: {e}"),
            Self::UnsupportedYear(y) => write!(f, "year {y} outside the supported range"),
            Self::InvalidGender(s) => write!(f, "invalid gender {s:?} (expected male/female/m/f)"),
            Self::InvalidDate(s) => write!(f, "invalid date: {s}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl Error for SajuError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SearchError> for SajuError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::UnsupportedYear(y) => Self::UnsupportedYear(y),
            other => Self::Search(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncovered_year_keeps_its_kind() {
        let e: SajuError = SearchError::UnsupportedYear(1850).into();
        assert_eq!(e, SajuError::UnsupportedYear(1850));
    }

    #[test]
    fn other_search_errors_wrap() {
        let e: SajuError = SearchError::Parse("bad".into()).into();
        assert!(matches!(e, SajuError::Search(SearchError::Parse(_))));
        assert!(e.source().is_some());
    }
}

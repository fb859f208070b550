//! Configuration for building a solar-term table.

use std::ops::RangeInclusive;

use crate::locator_types::LocatorConfig;

/// First year of the default table range.
pub const DEFAULT_FIRST_YEAR: i32 = 1900;
/// Last year of the default table range.
pub const DEFAULT_LAST_YEAR: i32 = 2109;

/// Configuration for [`SolarTermTable::build`](crate::SolarTermTable::build).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TableConfig {
    pub locator: LocatorConfig,
    /// Fail the build on the first data-quality violation instead of
    /// marking the year incomplete.
    pub strict: bool,
}

impl TableConfig {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    /// Supported year span, [`DEFAULT_FIRST_YEAR`] through [`DEFAULT_LAST_YEAR`].
    pub const fn default_years() -> RangeInclusive<i32> {
        DEFAULT_FIRST_YEAR..=DEFAULT_LAST_YEAR
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        self.locator.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lenient() {
        let c = TableConfig::default();
        assert!(!c.strict);
        assert!(c.validate().is_ok());
        assert!(TableConfig::strict().strict);
    }

    #[test]
    fn default_years_span() {
        let r = TableConfig::default_years();
        assert_eq!((*r.start(), *r.end()), (1900, 2109));
        assert_eq!(r.count(), 210);
    }

    #[test]
    fn locator_errors_surface() {
        let mut c = TableConfig::default();
        c.locator.max_iterations = 0;
        assert!(c.validate().is_err());
    }
}

//! Types for the solar-term locator.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use ganji_base::Jieqi;
use serde::{Deserialize, Serialize};

/// UTC+8, the zone in which traditional almanacs tabulate solar terms.
pub const CHINA_STANDARD_OFFSET_SECS: i32 = 8 * 3600;

/// How an event instant was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Bisection met the longitude tolerance.
    Converged,
    /// Bisection hit `max_iterations`; instant is the final bracket midpoint.
    IterationCap,
    /// Search failed; instant is the term's typical civil date at 12:00.
    Estimated,
    /// Read from a persisted or reference table.
    Tabulated,
}

/// The instant a month-starting solar term begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolarTermEvent {
    pub term: Jieqi,
    /// Sexagenary year the term belongs to. Xiaohan's civil date is in
    /// January of `calendar_year + 1`.
    pub calendar_year: i32,
    /// Whole-second instant in the table's civil zone.
    pub instant: DateTime<FixedOffset>,
    pub precision: Precision,
}

/// Configuration for the bisection search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatorConfig {
    /// Half-width of the search window around the typical date, in days.
    pub window_days: f64,
    /// Maximum bisection iterations (default 100).
    pub max_iterations: u32,
    /// Longitude tolerance in degrees (default 1e-5, about 1 s of time).
    pub tolerance_deg: f64,
    /// Zone in which event instants are expressed.
    pub civil_offset: FixedOffset,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            window_days: 20.0,
            max_iterations: 100,
            tolerance_deg: 1e-5,
            civil_offset: FixedOffset::east_opt(CHINA_STANDARD_OFFSET_SECS).unwrap_or(Utc.fix()),
        }
    }
}

impl LocatorConfig {
    /// Default search expressed in another civil zone.
    pub fn with_offset(civil_offset: FixedOffset) -> Self {
        Self {
            civil_offset,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.window_days.is_finite() || self.window_days <= 0.0 {
            return Err("window_days must be positive");
        }
        if self.window_days > 90.0 {
            return Err("window_days must not exceed 90");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.tolerance_deg.is_finite() || self.tolerance_deg <= 0.0 {
            return Err("tolerance_deg must be positive");
        }
        Ok(())
    }
}
